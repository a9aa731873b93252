// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and inertia state machine driving a [`WindowManager`].

use kurbo::{Point, Rect, Vec2};
use understory_slot_grid::{
    GridConfig, RecordSource, SlotId, SlotView, WindowChanges, WindowManager,
};

use crate::restriction::{Boundary, restricted_position, restriction_weight};
use crate::{ConfigError, PointerButtons, ScrollConfig};

/// Smoothing rate for the velocity estimate taken while dragging, per second.
const VELOCITY_SMOOTHING: f64 = 10.0;

/// Motion state of a [`ScrollController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollPhase {
    /// No gesture and no inertia.
    #[default]
    Idle,
    /// A drag gesture owns the content offset.
    Dragging,
    /// Content coasts on decaying velocity after a release.
    Settling,
}

/// Result of a drag move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The event was dropped: no active drag, primary button not held, or
    /// the pointer left the viewport.
    Ignored,
    /// The move pushed against a hard boundary and was rubber-banded.
    Restricted,
    /// The move was applied and the window maintained.
    Moved(WindowChanges),
}

/// Result of an inertia step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was settling.
    Idle,
    /// The step ran past a hard boundary and was rubber-banded.
    Restricted,
    /// The step was applied and the window maintained.
    Moved(WindowChanges),
}

/// Vertical drag/momentum controller with elastic boundaries.
///
/// The controller owns the content offset and velocity and forwards every
/// accepted position change to its [`WindowManager`]. Offsets use a y-up
/// space: a positive `y` delta moves content up and reveals tail rows. Only
/// the vertical axis scrolls.
///
/// All handlers are total: out-of-range input is ignored rather than
/// reported, and the controller is driven by discrete calls from a single
/// owner (pointer events plus a per-frame [`tick`](Self::tick)).
#[derive(Debug)]
pub struct ScrollController<D: RecordSource, V> {
    window: WindowManager<D, V>,
    config: ScrollConfig,
    pointer_bounds: Option<Rect>,

    phase: ScrollPhase,
    content_offset: Vec2,
    velocity: Vec2,

    content_start: Vec2,
    drag_start: Point,
    drag_last: Point,
    needs_settle: bool,
    last_tick_offset: Vec2,
}

impl<D, V> ScrollController<D, V>
where
    D: RecordSource + Default,
    V: SlotView<D::Record>,
{
    /// Validates both configurations, builds the window, and binds `records` to it.
    ///
    /// An empty record list is rejected with [`ConfigError::EmptyRecords`].
    pub fn initialize(
        records: D,
        grid: GridConfig,
        config: ScrollConfig,
        new_view: impl FnMut(SlotId) -> V + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut window = WindowManager::new(grid, new_view)?;
        if records.is_empty() {
            return Err(ConfigError::EmptyRecords);
        }
        window.create_window(records);
        Self::new(window, config)
    }
}

impl<D: RecordSource, V> ScrollController<D, V> {
    /// Wraps an existing window at content offset zero.
    pub fn new(window: WindowManager<D, V>, config: ScrollConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            window,
            config,
            pointer_bounds: None,
            phase: ScrollPhase::Idle,
            content_offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            content_start: Vec2::ZERO,
            drag_start: Point::ZERO,
            drag_last: Point::ZERO,
            needs_settle: false,
            last_tick_offset: Vec2::ZERO,
        })
    }

    /// Only accepts drag moves whose position lies inside `bounds`.
    #[must_use]
    pub fn with_pointer_bounds(mut self, bounds: Rect) -> Self {
        self.pointer_bounds = Some(bounds);
        self
    }

    /// Sets or clears the region drag moves must stay inside.
    pub fn set_pointer_bounds(&mut self, bounds: Option<Rect>) {
        self.pointer_bounds = bounds;
    }

    /// Returns the controlled window.
    #[must_use]
    pub const fn window(&self) -> &WindowManager<D, V> {
        &self.window
    }

    /// Returns the controlled window mutably, for view access.
    pub fn window_mut(&mut self) -> &mut WindowManager<D, V> {
        &mut self.window
    }

    /// Returns the resistance and inertia settings.
    #[must_use]
    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Returns the current motion state.
    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Returns the current content offset.
    #[must_use]
    pub const fn content_offset(&self) -> Vec2 {
        self.content_offset
    }

    /// Returns the current velocity, in offset units per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` if the last drag move was rubber-banded.
    #[must_use]
    pub const fn needs_settle(&self) -> bool {
        self.needs_settle
    }

    /// Anchored offset of the window's head slot.
    #[must_use]
    pub fn first_item_offset(&self) -> Point {
        self.window.first_item_offset()
    }

    /// Anchored offset of the window's tail slot.
    #[must_use]
    pub fn last_item_offset(&self) -> Point {
        self.window.last_item_offset()
    }

    /// Returns `false` if moving by `delta_y` would push against a hard boundary.
    ///
    /// A forward (positive) move is blocked when the window holds the last
    /// record and the content already sits at or past the tail limit. A
    /// backward move is blocked when the window holds the first record and
    /// the content sits at or past the origin.
    ///
    /// Moves that start inside the bounds and would end past them are also
    /// resisted; see [`on_drag_move`](Self::on_drag_move).
    #[must_use]
    pub fn is_vertical_move_valid(&self, delta_y: f64) -> bool {
        let offset = self.content_offset.y;
        match Boundary::toward(delta_y) {
            Some(Boundary::Tail) => {
                self.window.can_add_into_tail() || offset < self.window.tail_limit()
            }
            Some(Boundary::Head) => self.window.can_add_into_head() || offset > 0.0,
            None => true,
        }
    }

    /// Hard boundary `naive` sits past, if the window cannot grow beyond it.
    fn overrun_boundary(&self, naive: f64) -> Option<Boundary> {
        if naive > self.window.tail_limit() && !self.window.can_add_into_tail() {
            Some(Boundary::Tail)
        } else if naive < 0.0 && !self.window.can_add_into_head() {
            Some(Boundary::Head)
        } else {
            None
        }
    }

    /// Blends the resisted offset for a move toward `naive` past `boundary`.
    ///
    /// Travel up to the boundary is free; only the overrun is resisted, so
    /// the committed overflow always stays below `overflow_range`.
    fn restricted_offset(&self, boundary: Boundary, naive: f64) -> f64 {
        let tail_limit = self.window.tail_limit();
        let current = self.content_offset.y;
        let anchor = match boundary {
            Boundary::Head => current.min(0.0),
            Boundary::Tail => current.max(tail_limit),
        };
        let overflow = boundary.overflow(naive, tail_limit);
        let weight = restriction_weight(overflow, self.config.overflow_range);
        restricted_position(anchor, naive, weight)
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "scroll phase changed");
            self.phase = phase;
        }
    }
}

impl<D, V> ScrollController<D, V>
where
    D: RecordSource,
    V: SlotView<D::Record>,
{
    /// Starts a drag gesture at `position`, interrupting any inertia.
    pub fn on_drag_begin(&mut self, position: Point) {
        self.content_start = self.content_offset;
        self.drag_start = position;
        self.drag_last = position;
        self.velocity = Vec2::ZERO;
        self.needs_settle = false;
        self.last_tick_offset = self.content_offset;
        self.set_phase(ScrollPhase::Dragging);
    }

    /// Moves the content to follow the pointer.
    ///
    /// The requested offset is the drag-start offset plus the pointer's total
    /// travel. A request past a boundary the window cannot grow beyond is
    /// rubber-banded and does not touch the window. While restricted, moving
    /// the pointer back never carries the content further out.
    pub fn on_drag_move(&mut self, position: Point, buttons: PointerButtons) -> MoveOutcome {
        if self.phase != ScrollPhase::Dragging
            || !buttons.contains(PointerButtons::PRIMARY)
            || !position.is_finite()
            || self.pointer_bounds.is_some_and(|bounds| !bounds.contains(position))
        {
            return MoveOutcome::Ignored;
        }

        let naive = self.content_start.y + (position.y - self.drag_start.y);
        let pointer_dy = position.y - self.drag_last.y;
        let current = self.content_offset.y;
        self.drag_last = position;

        if let Some(boundary) = self.overrun_boundary(naive) {
            let mut restricted = self.restricted_offset(boundary, naive);
            let retreating = Boundary::toward(pointer_dy).is_some_and(|toward| toward != boundary);
            let tail_limit = self.window.tail_limit();
            if retreating
                && boundary.overflow(restricted, tail_limit) > boundary.overflow(current, tail_limit)
            {
                restricted = current;
            }
            tracing::trace!(?boundary, naive, restricted, "drag restricted");
            self.needs_settle = true;
            self.content_offset.y = restricted;
            return MoveOutcome::Restricted;
        }

        self.needs_settle = false;
        self.content_offset.y = naive;
        let delta = Vec2::new(0.0, naive - current);
        MoveOutcome::Moved(self.window.update_window(delta, self.content_offset))
    }

    /// Ends the drag gesture.
    ///
    /// Releasing after a rubber-banded move drops all velocity; otherwise
    /// the content keeps coasting if it was moving fast enough.
    pub fn on_drag_end(&mut self) {
        if self.phase != ScrollPhase::Dragging {
            return;
        }
        if self.needs_settle {
            tracing::debug!(offset = self.content_offset.y, "released past a boundary, stopping");
            self.velocity = Vec2::ZERO;
        }
        self.needs_settle = false;
        if self.velocity.y.abs() > self.config.min_settle_speed {
            self.set_phase(ScrollPhase::Settling);
        } else {
            self.velocity = Vec2::ZERO;
            self.set_phase(ScrollPhase::Idle);
        }
    }

    /// Advances the controller by `dt` seconds and returns the resulting phase.
    ///
    /// While dragging this samples the drag velocity; while settling it runs
    /// one [`on_scroll_tick`](Self::on_scroll_tick). Non-positive or
    /// non-finite steps are ignored.
    pub fn tick(&mut self, dt: f64) -> ScrollPhase {
        if !dt.is_finite() || dt <= 0.0 {
            return self.phase;
        }
        match self.phase {
            ScrollPhase::Idle => {}
            ScrollPhase::Dragging => {
                let instant = (self.content_offset - self.last_tick_offset) / dt;
                let blend = (dt * VELOCITY_SMOOTHING).min(1.0);
                self.velocity = self.velocity.lerp(instant, blend);
                self.last_tick_offset = self.content_offset;
            }
            ScrollPhase::Settling => {
                self.on_scroll_tick(dt);
            }
        }
        self.phase
    }

    /// Runs one inertia step of `dt` seconds.
    ///
    /// A free step moves the content by `velocity * dt`, maintains the
    /// window, and decays the velocity by `deceleration_rate^dt`. A step
    /// that would end past a hard boundary is rubber-banded and scales the velocity by
    /// `overflow_deceleration`, stopping once the per-step displacement falls
    /// below `stop_displacement`.
    pub fn on_scroll_tick(&mut self, dt: f64) -> TickOutcome {
        if self.phase != ScrollPhase::Settling || !dt.is_finite() || dt <= 0.0 {
            return TickOutcome::Idle;
        }
        let naive = self.content_offset.y + self.velocity.y * dt;

        if let Some(boundary) = self.overrun_boundary(naive) {
            let restricted = self.restricted_offset(boundary, naive);
            tracing::trace!(?boundary, naive, restricted, "inertia restricted");
            self.content_offset.y = restricted;
            self.velocity.y *= self.config.overflow_deceleration;
            if (self.velocity.y * dt).abs() < self.config.stop_displacement {
                self.stop_movement();
            }
            return TickOutcome::Restricted;
        }

        self.content_offset.y = naive;
        let changes = self.window.update_window(self.velocity, self.content_offset);
        self.velocity.y *= self.config.deceleration_rate.powf(dt);
        if self.velocity.y.abs() < self.config.min_settle_speed {
            self.stop_movement();
        }
        TickOutcome::Moved(changes)
    }

    /// Drops all velocity; a settling controller becomes idle.
    pub fn stop_movement(&mut self) {
        self.velocity = Vec2::ZERO;
        if self.phase == ScrollPhase::Settling {
            self.set_phase(ScrollPhase::Idle);
        }
    }

    /// Tears the window down, keeping every slot for reuse.
    pub fn clear_content(&mut self) {
        self.window.clear_content();
        self.needs_settle = false;
        self.velocity = Vec2::ZERO;
        self.set_phase(ScrollPhase::Idle);
    }
}
