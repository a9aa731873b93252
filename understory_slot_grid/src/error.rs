// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors for grid windows.

use thiserror::Error;

/// A [`GridConfig`](crate::GridConfig) that cannot describe a usable grid.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GridConfigError {
    /// `fixed_columns` was zero.
    #[error("a grid needs at least one column")]
    ZeroColumns,

    /// The slot size was non-positive or non-finite in either dimension.
    #[error("slot size must be finite and positive, got {width}x{height}")]
    InvalidSlotSize {
        /// Requested slot width.
        width: f64,
        /// Requested slot height.
        height: f64,
    },

    /// A spacing component was negative or non-finite.
    #[error("spacing must be finite and non-negative, got ({x}, {y})")]
    InvalidSpacing {
        /// Horizontal spacing between columns.
        x: f64,
        /// Vertical spacing between rows.
        y: f64,
    },

    /// The viewport height was negative or non-finite.
    #[error("viewport height must be finite and non-negative, got {0}")]
    InvalidViewportHeight(f64),
}
