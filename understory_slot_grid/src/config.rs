// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and validation.

use std::num::NonZeroUsize;

use kurbo::{Size, Vec2};

use crate::{GridConfigError, GridLayout};

/// Rows activated beyond the viewport when a window is first created.
///
/// Keeps the next window-maintenance check ahead of the visible edge.
pub const OVERSCAN_ROWS: usize = 8;

/// Construction parameters for a [`WindowManager`](crate::WindowManager).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of slots per row. Must be at least 1.
    pub fixed_columns: usize,
    /// Size of every slot.
    pub slot_size: Size,
    /// Gap between columns (`x`) and rows (`y`).
    pub spacing: Vec2,
    /// Height of the viewport the grid scrolls in.
    pub viewport_height: f64,
}

impl GridConfig {
    /// Creates a config with zero spacing.
    #[must_use]
    pub const fn new(fixed_columns: usize, slot_size: Size, viewport_height: f64) -> Self {
        Self {
            fixed_columns,
            slot_size,
            spacing: Vec2::ZERO,
            viewport_height,
        }
    }

    /// Sets the gap between columns (`x`) and rows (`y`).
    #[must_use]
    pub const fn with_spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    /// Checks every parameter without coercing any of them.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.fixed_columns == 0 {
            return Err(GridConfigError::ZeroColumns);
        }
        let Size { width, height } = self.slot_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GridConfigError::InvalidSlotSize { width, height });
        }
        let Vec2 { x, y } = self.spacing;
        if !(x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0) {
            return Err(GridConfigError::InvalidSpacing { x, y });
        }
        if !(self.viewport_height.is_finite() && self.viewport_height >= 0.0) {
            return Err(GridConfigError::InvalidViewportHeight(self.viewport_height));
        }
        Ok(())
    }

    /// Validates the config and derives the [`GridLayout`] it describes.
    pub fn layout(&self) -> Result<GridLayout, GridConfigError> {
        self.validate()?;
        let columns = NonZeroUsize::new(self.fixed_columns).ok_or(GridConfigError::ZeroColumns)?;
        Ok(GridLayout::new(columns, self.slot_size, self.spacing))
    }

    /// Number of slots activated by a fresh window:
    /// `fixed_columns * (OVERSCAN_ROWS + ceil(viewport_height / row_pitch))`.
    ///
    /// Assumes a validated config.
    #[must_use]
    pub fn initial_window_len(&self) -> usize {
        let pitch = self.slot_size.height + self.spacing.y;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Row count is finite and non-negative for validated configs"
        )]
        let visible_rows = (self.viewport_height / pitch).ceil() as usize;
        self.fixed_columns
            .saturating_mul(OVERSCAN_ROWS.saturating_add(visible_rows))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::GridConfig;
    use crate::GridConfigError;

    #[test]
    fn rejects_malformed_parameters() {
        let good = GridConfig::new(3, Size::new(100.0, 50.0), 400.0);
        assert_eq!(good.validate(), Ok(()));

        let zero_columns = GridConfig { fixed_columns: 0, ..good };
        assert_eq!(zero_columns.validate(), Err(GridConfigError::ZeroColumns));

        let flat = GridConfig { slot_size: Size::new(100.0, 0.0), ..good };
        assert!(matches!(
            flat.validate(),
            Err(GridConfigError::InvalidSlotSize { .. })
        ));

        let negative_gap = good.with_spacing(Vec2::new(-1.0, 0.0));
        assert!(matches!(
            negative_gap.validate(),
            Err(GridConfigError::InvalidSpacing { .. })
        ));

        let nan_viewport = GridConfig { viewport_height: f64::NAN, ..good };
        assert!(matches!(
            nan_viewport.validate(),
            Err(GridConfigError::InvalidViewportHeight(_))
        ));
    }

    #[test]
    fn initial_window_rounds_visible_rows_up() {
        // 400 / 60 = 6.67 rows visible -> 7, plus 8 rows of overscan.
        let config =
            GridConfig::new(3, Size::new(100.0, 50.0), 400.0).with_spacing(Vec2::new(10.0, 10.0));
        assert_eq!(config.initial_window_len(), 3 * (8 + 7));

        // Exact fit does not add a partial row.
        let exact = GridConfig::new(1, Size::new(100.0, 50.0), 400.0);
        assert_eq!(exact.initial_window_len(), 8 + 8);

        // An empty viewport still keeps the overscan rows.
        let empty = GridConfig::new(2, Size::new(10.0, 10.0), 0.0);
        assert_eq!(empty.initial_window_len(), 16);
    }
}
