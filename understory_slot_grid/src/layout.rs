// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major placement of a flat index strip onto a fixed-column grid.
//!
//! A [`GridLayout`] maps a linear record index onto a [`GridPosition`] and
//! then onto an anchored offset relative to the content origin:
//!
//! - `row = index / columns`, `column = index % columns`.
//! - `x = column * (slot_width + spacing_x)`.
//! - `y = -row * (slot_height + spacing_y)`: rows grow downward, so the
//!   anchored `y` of every row below the first is negative.
//!
//! Anchored positions describe the top-left corner of a slot.

use std::num::NonZeroUsize;

use kurbo::{Point, Size, Vec2};

/// Row and column of a cell in a fixed-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Zero-based row, counted from the head of the strip.
    pub row: usize,
    /// Zero-based column within the row.
    pub column: usize,
}

/// Fixed slot geometry shared by every cell in a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    columns: NonZeroUsize,
    slot_size: Size,
    spacing: Vec2,
}

impl GridLayout {
    /// Creates a layout with `columns` slots per row.
    ///
    /// Callers are expected to pass a finite positive `slot_size` and a
    /// finite non-negative `spacing`; [`GridConfig::layout`](crate::GridConfig::layout)
    /// checks both.
    #[must_use]
    pub const fn new(columns: NonZeroUsize, slot_size: Size, spacing: Vec2) -> Self {
        Self {
            columns,
            slot_size,
            spacing,
        }
    }

    /// Returns the number of slots per row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Returns the size of every slot.
    #[must_use]
    pub const fn slot_size(&self) -> Size {
        self.slot_size
    }

    /// Returns the gap between columns (`x`) and rows (`y`).
    #[must_use]
    pub const fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Vertical distance between the tops of two consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.slot_size.height + self.spacing.y
    }

    /// Horizontal distance between the left edges of two consecutive columns.
    #[must_use]
    pub fn column_pitch(&self) -> f64 {
        self.slot_size.width + self.spacing.x
    }

    /// Returns the row containing `index`.
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns.get()
    }

    /// Returns the position of `index` within its row.
    #[must_use]
    pub const fn column_of(&self, index: usize) -> usize {
        index % self.columns.get()
    }

    /// Returns the grid cell for a linear `index`.
    #[must_use]
    pub const fn grid_position(&self, index: usize) -> GridPosition {
        GridPosition {
            row: self.row_of(index),
            column: self.column_of(index),
        }
    }

    /// Returns the anchored top-left offset of the slot at `position`.
    #[must_use]
    pub fn anchored_position(&self, position: GridPosition) -> Point {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Grid coordinates stay far below 2^52"
        )]
        let (row, column) = (position.row as f64, position.column as f64);
        Point::new(column * self.column_pitch(), -row * self.row_pitch())
    }

    /// Returns the anchored offset of the slot at linear `index`.
    #[must_use]
    pub fn anchored_position_of(&self, index: usize) -> Point {
        self.anchored_position(self.grid_position(index))
    }

    /// Returns the number of rows needed to hold `len` cells.
    #[must_use]
    pub const fn row_count(&self, len: usize) -> usize {
        len.div_ceil(self.columns.get())
    }
}
