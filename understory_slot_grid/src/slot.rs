// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recyclable slots and the view seam they drive.

use kurbo::Point;

use crate::GridPosition;

/// Stable identifier of a slot in a window's pool.
///
/// Slots are never disposed, so an id stays valid for the life of its window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) u32);

impl SlotId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pools are bounded by the window size, far below u32::MAX slots."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identity of an active slot: which record it shows and where.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Binding {
    /// Index of the bound record.
    pub index: usize,
    /// Grid cell derived from `index`.
    pub grid: GridPosition,
    /// Anchored top-left offset derived from `grid`.
    pub anchored: Point,
}

/// Host-side visual for a slot.
///
/// A window calls [`bind`](SlotView::bind) whenever a slot is (re)bound to a
/// record and [`set_visible`](SlotView::set_visible) when it enters or leaves
/// the active pool. The view owns whatever the rendering layer needs; the
/// window only reads identity and placement back from the [`Slot`].
pub trait SlotView<R: ?Sized> {
    /// Refreshes the visual for a newly bound record.
    fn bind(&mut self, binding: &Binding, record: &R);

    /// Shows or hides the visual without discarding it.
    fn set_visible(&mut self, visible: bool) {
        let _ = visible;
    }
}

/// Headless view: identity bookkeeping only.
impl<R: ?Sized> SlotView<R> for () {
    fn bind(&mut self, _binding: &Binding, _record: &R) {}
}

/// A recyclable visual unit owned by a window's pool.
#[derive(Clone, Debug)]
pub struct Slot<V> {
    id: SlotId,
    binding: Option<Binding>,
    visible: bool,
    name: String,
    view: V,
}

impl<V> Slot<V> {
    pub(crate) const fn new(id: SlotId, view: V) -> Self {
        Self {
            id,
            binding: None,
            visible: false,
            name: String::new(),
            view,
        }
    }

    /// Returns this slot's pool identifier.
    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    /// Returns the current binding, or `None` while the slot is inactive.
    #[must_use]
    pub const fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Returns the bound record index, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.binding.map(|b| b.index)
    }

    /// Returns the bound grid cell, if any.
    #[must_use]
    pub fn grid_position(&self) -> Option<GridPosition> {
        self.binding.map(|b| b.grid)
    }

    /// Returns the anchored offset of the last binding.
    ///
    /// Inactive slots report [`Point::ZERO`].
    #[must_use]
    pub fn anchored_position(&self) -> Point {
        self.binding.map_or(Point::ZERO, |b| b.anchored)
    }

    /// Returns `true` while the slot is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Display name of the last bound cell, formatted `"(column, row)"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the host view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Returns the host view mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Stores identity and hands the record to the view.
    pub(crate) fn bind<R: ?Sized>(&mut self, binding: Binding, record: &R)
    where
        V: SlotView<R>,
    {
        self.name = format!("({}, {})", binding.grid.column, binding.grid.row);
        self.binding = Some(binding);
        self.view.bind(&binding, record);
    }

    /// Drops identity; the name is kept for debugging.
    pub(crate) fn unbind(&mut self) {
        self.binding = None;
    }

    pub(crate) fn set_visible<R: ?Sized>(&mut self, visible: bool)
    where
        V: SlotView<R>,
    {
        self.visible = visible;
        self.view.set_visible(visible);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Binding, Slot, SlotId, SlotView};
    use crate::GridPosition;

    #[derive(Debug, Default)]
    struct Recorder {
        shown: Option<&'static str>,
        visible: bool,
    }

    impl SlotView<&'static str> for Recorder {
        fn bind(&mut self, _binding: &Binding, record: &&'static str) {
            self.shown = Some(*record);
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    #[test]
    fn bind_names_and_forwards_to_view() {
        let mut slot = Slot::new(SlotId::new(0), Recorder::default());
        let binding = Binding {
            index: 4,
            grid: GridPosition { row: 1, column: 1 },
            anchored: Point::new(110.0, -60.0),
        };
        slot.bind(binding, &"barracks");
        slot.set_visible::<&'static str>(true);

        assert_eq!(slot.index(), Some(4));
        assert_eq!(slot.name(), "(1, 1)");
        assert_eq!(slot.anchored_position(), Point::new(110.0, -60.0));
        assert_eq!(slot.view().shown, Some("barracks"));
        assert!(slot.is_visible() && slot.view().visible);

        slot.unbind();
        slot.set_visible::<&'static str>(false);
        assert_eq!(slot.index(), None);
        assert_eq!(slot.anchored_position(), Point::ZERO);
        assert!(!slot.is_visible() && !slot.view().visible);
    }
}
