// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slot pool and the contiguous index window it maintains.

use std::collections::VecDeque;
use std::fmt;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::{Binding, GridConfig, GridConfigError, GridLayout, RecordSource, Slot, SlotId, SlotView};

bitflags::bitflags! {
    /// Rows added to or removed from a window by one maintenance pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct WindowChanges: u8 {
        /// A row was activated before the previous head.
        const ADDED_HEAD   = 0b0000_0001;
        /// A row was activated after the previous tail.
        const ADDED_TAIL   = 0b0000_0010;
        /// The head row was deactivated.
        const REMOVED_HEAD = 0b0000_0100;
        /// The tail row was deactivated.
        const REMOVED_TAIL = 0b0000_1000;
    }
}

/// Owns a pool of [`Slot`]s and keeps a contiguous run of record indices bound to them.
///
/// Slots are split between an *active* sequence, sorted ascending by bound
/// index, and an *inactive* queue of recycled slots. Activating an index
/// reuses the oldest inactive slot and only creates a new one (through the
/// host's view factory) when the queue is empty. Slots are never disposed.
///
/// The window grows and shrinks one full row at a time at either end, driven
/// by [`update_window`](Self::update_window) as content scrolls.
pub struct WindowManager<D: RecordSource, V> {
    config: GridConfig,
    layout: GridLayout,
    records: D,
    slots: Vec<Slot<V>>,
    active: VecDeque<SlotId>,
    inactive: VecDeque<SlotId>,
    new_view: Box<dyn FnMut(SlotId) -> V>,
}

impl<D, V> fmt::Debug for WindowManager<D, V>
where
    D: RecordSource,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("config", &self.config)
            .field("records", &self.records.len())
            .field("slots", &self.slots)
            .field("active", &self.active)
            .field("inactive", &self.inactive)
            .finish_non_exhaustive()
    }
}

impl<D, V> WindowManager<D, V>
where
    D: RecordSource + Default,
{
    /// Creates an empty window; `new_view` builds the view of every slot the pool allocates.
    ///
    /// Call [`create_window`](Self::create_window) to bind records.
    pub fn new(
        config: GridConfig,
        new_view: impl FnMut(SlotId) -> V + 'static,
    ) -> Result<Self, GridConfigError> {
        let layout = config.layout()?;
        Ok(Self {
            config,
            layout,
            records: D::default(),
            slots: Vec::new(),
            active: VecDeque::new(),
            inactive: VecDeque::new(),
            new_view: Box::new(new_view),
        })
    }
}

impl<D> WindowManager<D, ()>
where
    D: RecordSource + Default,
{
    /// Creates an empty window whose slots carry no view.
    pub fn headless(config: GridConfig) -> Result<Self, GridConfigError> {
        Self::new(config, |_| ())
    }
}

impl<D: RecordSource, V> WindowManager<D, V> {
    /// Returns the configuration the window was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns the grid geometry.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Returns the height of the viewport the window fills.
    #[must_use]
    pub const fn viewport_height(&self) -> f64 {
        self.config.viewport_height
    }

    /// Returns the bound record list.
    #[must_use]
    pub const fn records(&self) -> &D {
        &self.records
    }

    /// Number of active slots.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of recycled slots waiting for reuse.
    #[must_use]
    pub fn inactive_len(&self) -> usize {
        self.inactive.len()
    }

    /// Total number of slots ever created by this window.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Lowest active record index.
    #[must_use]
    pub fn head_index(&self) -> Option<usize> {
        self.active.front().and_then(|&id| self.bound_index(id))
    }

    /// Highest active record index.
    #[must_use]
    pub fn tail_index(&self) -> Option<usize> {
        self.active.back().and_then(|&id| self.bound_index(id))
    }

    /// Active record indices in ascending order.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().filter_map(|&id| self.bound_index(id))
    }

    /// Active slots in ascending index order.
    pub fn active_slots(&self) -> impl Iterator<Item = &Slot<V>> + '_ {
        self.active.iter().map(|&id| &self.slots[id.idx()])
    }

    /// Recycled slots in the order they will be reused.
    pub fn inactive_slots(&self) -> impl Iterator<Item = &Slot<V>> + '_ {
        self.inactive.iter().map(|&id| &self.slots[id.idx()])
    }

    /// Returns the slot with the given id.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&Slot<V>> {
        self.slots.get(id.idx())
    }

    /// Returns the view of the slot with the given id.
    pub fn view_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.slots.get_mut(id.idx()).map(Slot::view_mut)
    }

    /// Anchored offset of the head slot, or [`Point::ZERO`] for an empty window.
    #[must_use]
    pub fn first_item_offset(&self) -> Point {
        self.active
            .front()
            .map_or(Point::ZERO, |&id| self.slots[id.idx()].anchored_position())
    }

    /// Anchored offset of the tail slot, or [`Point::ZERO`] for an empty window.
    #[must_use]
    pub fn last_item_offset(&self) -> Point {
        self.active
            .back()
            .map_or(Point::ZERO, |&id| self.slots[id.idx()].anchored_position())
    }

    /// Content offset at which the tail row's bottom edge meets the viewport's bottom edge.
    ///
    /// Never negative: content shorter than the viewport is limited at the origin.
    #[must_use]
    pub fn tail_limit(&self) -> f64 {
        let bottom = self.last_item_offset().y - self.layout.slot_size().height;
        (-bottom - self.viewport_height()).max(0.0)
    }

    /// Returns `true` if the record before the head exists.
    #[must_use]
    pub fn can_add_into_head(&self) -> bool {
        self.head_index().is_some_and(|head| head > 0)
    }

    /// Returns `true` if the record after the tail exists.
    #[must_use]
    pub fn can_add_into_tail(&self) -> bool {
        self.tail_index()
            .is_some_and(|tail| tail + 1 < self.records.len())
    }

    fn bound_index(&self, id: SlotId) -> Option<usize> {
        self.slots.get(id.idx()).and_then(Slot::index)
    }

    fn row_of_slot(&self, id: Option<&SlotId>) -> Option<usize> {
        id.and_then(|&id| self.slots[id.idx()].grid_position())
            .map(|grid| grid.row)
    }

    fn is_single_row(&self) -> bool {
        self.row_of_slot(self.active.front()) == self.row_of_slot(self.active.back())
    }
}

impl<D, V> WindowManager<D, V>
where
    D: RecordSource,
    V: SlotView<D::Record>,
{
    /// Binds a fresh window over `records`, starting at index 0.
    ///
    /// Any previous window is cleared first. Activates
    /// `min(initial_window_len, records.len())` indices in row-major order and
    /// returns how many were activated; an empty list activates nothing.
    pub fn create_window(&mut self, records: D) -> usize {
        self.clear_content();
        self.records = records;
        let len = self.config.initial_window_len().min(self.records.len());
        for index in 0..len {
            self.activate(index);
        }
        tracing::debug!(len, pool = self.slots.len(), "created window");
        len
    }

    /// Binds the record at `index` to a slot and inserts it into the active sequence.
    ///
    /// The window only grows at its ends: `index` must be the one just
    /// before the head or just after the tail, or any index when the window
    /// is empty. Returns `None` without side effects if `index` is out of
    /// range, already active, or not adjacent to the window.
    pub fn activate(&mut self, index: usize) -> Option<SlotId> {
        if index >= self.records.len() {
            tracing::trace!(index, len = self.records.len(), "activate skipped: out of range");
            return None;
        }
        let position = match (self.head_index(), self.tail_index()) {
            (Some(head), _) if index + 1 == head => 0,
            (_, Some(tail)) if index == tail + 1 => self.active.len(),
            (None, None) => 0,
            (head, tail) => {
                tracing::trace!(index, ?head, ?tail, "activate skipped: not adjacent to the window");
                return None;
            }
        };

        let grid = self.layout.grid_position(index);
        let binding = Binding {
            index,
            grid,
            anchored: self.layout.anchored_position(grid),
        };
        let id = self.acquire();
        let Some(record) = self.records.record(index) else {
            self.inactive.push_front(id);
            return None;
        };
        let slot = &mut self.slots[id.idx()];
        slot.bind(binding, record);
        slot.set_visible::<D::Record>(true);
        self.active.insert(position, id);
        Some(id)
    }

    /// Unbinds `id`, hides it, and queues it for reuse.
    ///
    /// Returns `false` if the slot was not active.
    pub fn deactivate(&mut self, id: SlotId) -> bool {
        let Some(position) = self.active.iter().position(|&active| active == id) else {
            return false;
        };
        self.active.remove(position);
        self.release(id);
        true
    }

    /// Extends the window by one row before the head.
    ///
    /// Returns the number of indices activated; zero when the head is already index 0.
    pub fn add_into_head(&mut self) -> usize {
        let mut added = 0;
        while added < self.layout.columns() && self.can_add_into_head() {
            let Some(index) = self.head_index().and_then(|head| head.checked_sub(1)) else {
                break;
            };
            if self.activate(index).is_none() {
                break;
            }
            added += 1;
        }
        if added > 0 {
            tracing::trace!(added, head = ?self.head_index(), "extended window at head");
        }
        added
    }

    /// Extends the window by one row after the tail.
    ///
    /// Stops at the end of the record list, so the last row may be partial.
    /// Returns the number of indices activated.
    pub fn add_into_tail(&mut self) -> usize {
        let mut added = 0;
        while added < self.layout.columns() && self.can_add_into_tail() {
            let Some(index) = self.tail_index().map(|tail| tail + 1) else {
                break;
            };
            if self.activate(index).is_none() {
                break;
            }
            added += 1;
        }
        if added > 0 {
            tracing::trace!(added, tail = ?self.tail_index(), "extended window at tail");
        }
        added
    }

    /// Deactivates every active slot in the head's row. Returns how many were removed.
    pub fn delete_from_head(&mut self) -> usize {
        match self.row_of_slot(self.active.front()) {
            Some(row) => self.delete_row(row),
            None => 0,
        }
    }

    /// Deactivates every active slot in the tail's row. Returns how many were removed.
    pub fn delete_from_tail(&mut self) -> usize {
        match self.row_of_slot(self.active.back()) {
            Some(row) => self.delete_row(row),
            None => 0,
        }
    }

    /// Moves every active slot to the inactive queue, keeping all instances.
    pub fn clear_content(&mut self) {
        let drained = self.active.len();
        while let Some(id) = self.active.pop_front() {
            self.release(id);
        }
        if drained > 0 {
            tracing::debug!(drained, pool = self.slots.len(), "cleared window");
        }
    }

    /// Grows or shrinks the window after the content moved by `delta` to `content_offset`.
    ///
    /// Offsets are in a y-up space where a positive `delta.y` reveals tail
    /// content. Moving forward adds a tail row once the tail row's top is
    /// within one viewport height plus spacing of the viewport top, and drops
    /// the head row once it sits two slot heights plus spacing above the
    /// viewport. Moving backward adds a head row once the head row's top comes
    /// within one slot height plus spacing of the viewport top, and drops the
    /// tail row once it sits a viewport height plus a slot height plus spacing
    /// below the viewport top. At most one row is added and one removed per
    /// call, and the last remaining row is never removed.
    pub fn update_window(&mut self, delta: Vec2, content_offset: Vec2) -> WindowChanges {
        let mut changes = WindowChanges::empty();
        if self.active.is_empty() || delta.y == 0.0 || delta.y.is_nan() {
            return changes;
        }
        let offset = content_offset.y;
        let slot_height = self.layout.slot_size().height;
        let spacing = self.layout.spacing().y;
        let viewport = self.viewport_height();

        if delta.y > 0.0 {
            let tail_depth = -self.last_item_offset().y - offset;
            if tail_depth <= viewport + spacing && self.add_into_tail() > 0 {
                changes |= WindowChanges::ADDED_TAIL;
            }
            let head_height = offset + self.first_item_offset().y;
            if head_height >= 2.0 * slot_height + spacing
                && !self.is_single_row()
                && self.delete_from_head() > 0
            {
                changes |= WindowChanges::REMOVED_HEAD;
            }
        } else {
            let head_height = offset + self.first_item_offset().y;
            if head_height <= slot_height + spacing && self.add_into_head() > 0 {
                changes |= WindowChanges::ADDED_HEAD;
            }
            let tail_depth = -self.last_item_offset().y - offset;
            if tail_depth >= viewport + slot_height + spacing
                && !self.is_single_row()
                && self.delete_from_tail() > 0
            {
                changes |= WindowChanges::REMOVED_TAIL;
            }
        }
        changes
    }

    fn acquire(&mut self) -> SlotId {
        if let Some(id) = self.inactive.pop_front() {
            return id;
        }
        let id = SlotId::new(self.slots.len());
        let view = (self.new_view)(id);
        self.slots.push(Slot::new(id, view));
        tracing::debug!(pool = self.slots.len(), "slot pool grew");
        id
    }

    fn release(&mut self, id: SlotId) {
        let slot = &mut self.slots[id.idx()];
        slot.unbind();
        slot.set_visible::<D::Record>(false);
        self.inactive.push_back(id);
    }

    fn delete_row(&mut self, row: usize) -> usize {
        let doomed: SmallVec<[SlotId; 8]> = self
            .active
            .iter()
            .copied()
            .filter(|&id| self.row_of_slot(Some(&id)) == Some(row))
            .collect();
        for &id in &doomed {
            self.deactivate(id);
        }
        tracing::trace!(row, removed = doomed.len(), "removed row");
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::{Point, Size, Vec2};

    use super::{WindowChanges, WindowManager};
    use crate::{Binding, GridConfig, SlotView};

    type Headless = WindowManager<Vec<u32>, ()>;

    fn records(len: u32) -> Vec<u32> {
        (0..len).collect()
    }

    fn single_column(viewport_height: f64) -> Headless {
        WindowManager::headless(GridConfig::new(1, Size::new(100.0, 50.0), viewport_height))
            .unwrap()
    }

    fn three_columns() -> Headless {
        let config = GridConfig::new(3, Size::new(100.0, 50.0), 400.0)
            .with_spacing(Vec2::new(10.0, 10.0));
        WindowManager::headless(config).unwrap()
    }

    fn assert_contiguous(window: &Headless) {
        let indices: Vec<usize> = window.active_indices().collect();
        for pair in indices.windows(2) {
            assert_eq!(pair[1], pair[0] + 1, "active indices must be contiguous: {indices:?}");
        }
    }

    #[test]
    fn create_window_binds_overscanned_rows() {
        let mut window = three_columns();
        // 3 * (8 + ceil(400 / 60)) = 45.
        assert_eq!(window.create_window(records(100)), 45);
        assert_eq!(window.active_indices().collect::<Vec<_>>(), (0..45).collect::<Vec<_>>());
        assert_eq!(window.slot_count(), 45);
        assert_eq!(window.inactive_len(), 0);
        assert!(window.active_slots().all(|slot| slot.is_visible()));
        assert_eq!(window.first_item_offset(), Point::ZERO);
        // Index 44 is row 14, column 2.
        assert_eq!(window.last_item_offset(), Point::new(220.0, -840.0));
    }

    #[test]
    fn create_window_is_bounded_by_the_list() {
        let mut window = three_columns();
        assert_eq!(window.create_window(records(7)), 7);
        assert!(!window.can_add_into_tail());
        assert!(!window.can_add_into_head());

        assert_eq!(window.create_window(Vec::new()), 0);
        assert_eq!(window.active_len(), 0);
        assert_eq!(window.inactive_len(), 7, "slots survive an empty rebuild");
        assert_eq!(window.first_item_offset(), Point::ZERO);
    }

    #[test]
    fn activate_skips_out_of_range_and_duplicates() {
        let mut window = single_column(100.0);
        window.create_window(records(20));
        let before = window.slot_count();

        assert!(window.activate(20).is_none());
        assert!(window.activate(3).is_none());
        assert_eq!(window.slot_count(), before);
        assert_contiguous(&window);
    }

    #[test]
    fn activate_rejects_indices_that_would_leave_a_gap() {
        let mut window = single_column(0.0);
        window.create_window(records(40));
        window.delete_from_head();
        assert_eq!(window.head_index(), Some(1));
        assert_eq!(window.tail_index(), Some(7));
        let pool = window.slot_count();

        assert!(window.activate(12).is_none(), "tail + 5 is not adjacent");
        assert!(window.activate(4).is_none(), "already active");
        assert_eq!(window.tail_index(), Some(7));
        assert_eq!(window.slot_count(), pool);
        assert_contiguous(&window);

        assert!(window.activate(8).is_some());
        assert!(window.activate(0).is_some());
        assert_eq!(window.active_indices().collect::<Vec<_>>(), (0..=8).collect::<Vec<_>>());
    }

    #[test]
    fn activation_keeps_ascending_order() {
        let mut window = single_column(0.0);
        window.create_window(records(40));
        window.delete_from_head();
        window.delete_from_head();
        assert_eq!(window.head_index(), Some(2));

        // Head insert for a smaller index, tail append for a larger one.
        window.activate(1);
        window.activate(8);
        assert_eq!(window.head_index(), Some(1));
        assert_eq!(window.tail_index(), Some(8));
        assert_contiguous(&window);
    }

    #[test]
    fn add_into_tail_is_a_noop_at_the_end() {
        let mut window = single_column(400.0);
        window.create_window(records(10));
        assert_eq!(window.tail_index(), Some(9));
        assert!(!window.can_add_into_tail());

        let pool = window.slot_count();
        assert_eq!(window.add_into_tail(), 0);
        assert_eq!(window.slot_count(), pool);
        assert_eq!(window.active_len(), 10);
    }

    #[test]
    fn rows_are_recycled_between_ends() {
        let mut window = three_columns();
        window.create_window(records(100));

        assert_eq!(window.delete_from_head(), 3);
        assert_eq!(window.head_index(), Some(3));
        assert_eq!(window.inactive_len(), 3);
        assert!(window.inactive_slots().all(|slot| slot.index().is_none() && !slot.is_visible()));

        assert_eq!(window.add_into_tail(), 3);
        assert_eq!(window.tail_index(), Some(47));
        assert_eq!(window.slot_count(), 45, "tail row must reuse the head row's slots");
        assert_eq!(window.inactive_len(), 0);

        assert_eq!(window.delete_from_tail(), 3);
        assert_eq!(window.add_into_head(), 3);
        assert_eq!(window.head_index(), Some(0));
        assert_eq!(window.slot_count(), 45);
        assert_contiguous(&window);
    }

    #[test]
    fn tail_extension_stops_at_a_partial_row() {
        // An empty viewport keeps 8 rows: 24 of 26 records.
        let config = GridConfig::new(3, Size::new(10.0, 10.0), 0.0);
        let mut window: Headless = WindowManager::headless(config).unwrap();
        assert_eq!(window.create_window(records(26)), 24);

        assert_eq!(window.add_into_tail(), 2);
        assert_eq!(window.tail_index(), Some(25));
        assert_eq!(window.add_into_tail(), 0);

        // The partial row is removed as a whole.
        assert_eq!(window.delete_from_tail(), 2);
        assert_eq!(window.tail_index(), Some(23));
    }

    #[test]
    fn clear_then_create_reproduces_the_window() {
        let mut window = three_columns();
        window.create_window(records(100));
        let first: Vec<_> = window.active_slots().map(|s| (s.index(), s.anchored_position())).collect();

        window.clear_content();
        assert_eq!(window.active_len(), 0);
        assert_eq!(window.inactive_len(), 45);

        window.create_window(records(100));
        let second: Vec<_> = window.active_slots().map(|s| (s.index(), s.anchored_position())).collect();
        assert_eq!(first, second);
        assert_eq!(window.slot_count(), 45);
    }

    #[test]
    fn forward_scroll_adds_tail_and_drops_head() {
        // 1 * (8 + 2) = 10 rows of 50: tail row top sits 450 below the origin.
        let mut window = single_column(100.0);
        window.create_window(records(100));

        let forward = Vec2::new(0.0, 5.0);
        assert_eq!(window.update_window(forward, Vec2::new(0.0, 10.0)), WindowChanges::empty());

        let changes = window.update_window(forward, Vec2::new(0.0, 350.0));
        assert_eq!(changes, WindowChanges::ADDED_TAIL | WindowChanges::REMOVED_HEAD);
        assert_eq!(window.head_index(), Some(1));
        assert_eq!(window.tail_index(), Some(10));
        assert_contiguous(&window);
    }

    #[test]
    fn backward_scroll_adds_head_and_drops_tail() {
        let mut window = single_column(100.0);
        window.create_window(records(100));
        let forward = Vec2::new(0.0, 5.0);
        let backward = Vec2::new(0.0, -5.0);
        window.update_window(forward, Vec2::new(0.0, 350.0));

        // Tail row top is 500 - 350 = 150 below the viewport top.
        let changes = window.update_window(backward, Vec2::new(0.0, 350.0));
        assert_eq!(changes, WindowChanges::REMOVED_TAIL);
        assert_eq!(window.tail_index(), Some(9));

        // Head row top is 90 - 50 = 40 above the viewport top.
        let changes = window.update_window(backward, Vec2::new(0.0, 90.0));
        assert_eq!(changes, WindowChanges::ADDED_HEAD | WindowChanges::REMOVED_TAIL);
        assert_eq!(window.head_index(), Some(0));
        assert_eq!(window.tail_index(), Some(8));
        assert_contiguous(&window);
    }

    #[test]
    fn update_window_ignores_zero_delta_and_keeps_last_row() {
        let mut window = single_column(100.0);
        window.create_window(records(100));
        assert_eq!(window.update_window(Vec2::ZERO, Vec2::new(0.0, 350.0)), WindowChanges::empty());

        let mut lone = single_column(100.0);
        lone.create_window(records(1));
        let changes = lone.update_window(Vec2::new(0.0, 5.0), Vec2::new(0.0, 1000.0));
        assert_eq!(changes, WindowChanges::empty());
        assert_eq!(lone.active_len(), 1);
    }

    #[test]
    fn tail_limit_aligns_bottom_edges() {
        let mut window = single_column(400.0);
        window.create_window(records(10));
        // Tail row spans 450..500 below the origin; viewport is 400 tall.
        assert_eq!(window.tail_limit(), 100.0);

        window.create_window(records(3));
        assert_eq!(window.tail_limit(), 0.0, "short content is limited at the origin");
    }

    #[derive(Debug)]
    struct Card {
        log: Rc<RefCell<Vec<(usize, &'static str)>>>,
    }

    impl SlotView<&'static str> for Card {
        fn bind(&mut self, binding: &Binding, record: &&'static str) {
            self.log.borrow_mut().push((binding.index, *record));
        }
    }

    #[test]
    fn views_are_created_on_miss_and_rebound_on_reuse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let created = Rc::new(RefCell::new(0_usize));
        let config = GridConfig::new(1, Size::new(100.0, 50.0), 0.0);
        let mut window = WindowManager::new(config, {
            let log = Rc::clone(&log);
            let created = Rc::clone(&created);
            move |_| {
                *created.borrow_mut() += 1;
                Card { log: Rc::clone(&log) }
            }
        })
        .unwrap();

        let names: Vec<&'static str> = (0..12).map(|i| ["barracks", "power plant"][i % 2]).collect();
        window.create_window(names);
        assert_eq!(*created.borrow(), 8);

        window.delete_from_head();
        window.add_into_tail();
        assert_eq!(*created.borrow(), 8, "reuse must not build a new view");
        assert_eq!(log.borrow().last(), Some(&(8, "barracks")));
        assert_eq!(window.active_slots().last().map(|s| s.name()), Some("(0, 8)"));
    }
}
