// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary resistance and inertia settings.

use crate::ConfigError;

/// Tuning for drag resistance past the list boundaries and for post-release inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig {
    /// Distance past a hard boundary over which resistance builds before saturating.
    pub overflow_range: f64,
    /// Velocity multiplier applied on every inertia step spent past a boundary, in `[0, 1]`.
    pub overflow_deceleration: f64,
    /// Fraction of inertia velocity kept after one second, in `[0, 1]`.
    pub deceleration_rate: f64,
    /// Per-step displacement below which motion past a boundary stops.
    pub stop_displacement: f64,
    /// Speed below which free inertia stops.
    pub min_settle_speed: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            overflow_range: 125.0,
            overflow_deceleration: 0.5,
            deceleration_rate: 0.135,
            stop_displacement: 5.0,
            min_settle_speed: 1.0,
        }
    }
}

impl ScrollConfig {
    /// Sets the overflow range.
    #[must_use]
    pub const fn with_overflow_range(mut self, overflow_range: f64) -> Self {
        self.overflow_range = overflow_range;
        self
    }

    /// Sets the velocity multiplier used past a boundary.
    #[must_use]
    pub const fn with_overflow_deceleration(mut self, overflow_deceleration: f64) -> Self {
        self.overflow_deceleration = overflow_deceleration;
        self
    }

    /// Sets the per-second inertia retention.
    #[must_use]
    pub const fn with_deceleration_rate(mut self, deceleration_rate: f64) -> Self {
        self.deceleration_rate = deceleration_rate;
        self
    }

    /// Checks every parameter without coercing any of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.overflow_range.is_finite() && self.overflow_range > 0.0) {
            return Err(ConfigError::InvalidOverflowRange(self.overflow_range));
        }
        if !(0.0..=1.0).contains(&self.overflow_deceleration) {
            return Err(ConfigError::InvalidOverflowDeceleration(
                self.overflow_deceleration,
            ));
        }
        if !(0.0..=1.0).contains(&self.deceleration_rate) {
            return Err(ConfigError::InvalidDecelerationRate(self.deceleration_rate));
        }
        for threshold in [self.stop_displacement, self.min_settle_speed] {
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(ConfigError::InvalidStopThreshold(threshold));
            }
        }
        Ok(())
    }
}
