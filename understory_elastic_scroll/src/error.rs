// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while setting up a scroll controller.

use thiserror::Error;
use understory_slot_grid::GridConfigError;

/// Invalid construction parameters for a [`ScrollController`](crate::ScrollController).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The grid half of the configuration was rejected.
    #[error(transparent)]
    Grid(#[from] GridConfigError),

    /// The overflow range was non-positive or non-finite.
    #[error("overflow range must be finite and positive, got {0}")]
    InvalidOverflowRange(f64),

    /// The overflow deceleration factor was outside `[0, 1]`.
    #[error("overflow deceleration must be within [0, 1], got {0}")]
    InvalidOverflowDeceleration(f64),

    /// The inertia deceleration rate was outside `[0, 1]`.
    #[error("deceleration rate must be within [0, 1], got {0}")]
    InvalidDecelerationRate(f64),

    /// A stop threshold was negative or non-finite.
    #[error("stop thresholds must be finite and non-negative, got {0}")]
    InvalidStopThreshold(f64),

    /// The record list handed to initialization was empty.
    #[error("cannot initialize a scroll view over an empty record list")]
    EmptyRecords,
}
