// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band resistance past the ends of a list.
//!
//! When a move would carry content past a hard boundary, the committed
//! position is a blend of where the content is and where the move asked it to
//! go:
//!
//! ```text
//! w         = clamp(overflow / overflow_range, 0, 1)
//! committed = w * current + (1 - w) * naive
//! ```
//!
//! `overflow` is how far the naive position sits past the boundary. Small
//! overflows barely resist; once the overflow reaches `overflow_range` the
//! weight saturates at 1 and net movement stops. Both functions are pure, so
//! every drag event and inertia step is evaluated from its inputs alone.

/// The hard boundary a move pushes against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The start of the list, at content offset 0.
    Head,
    /// The end of the list, at the window's tail limit.
    Tail,
}

impl Boundary {
    /// Boundary a vertical move of `delta_y` heads toward in a y-up space.
    ///
    /// Positive deltas reveal tail content. A zero or NaN delta has no direction.
    #[must_use]
    pub fn toward(delta_y: f64) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Tail)
        } else if delta_y < 0.0 {
            Some(Self::Head)
        } else {
            None
        }
    }

    /// Distance `offset` sits past this boundary; negative when inside.
    ///
    /// `tail_limit` is the content offset of the tail boundary.
    #[must_use]
    pub fn overflow(self, offset: f64, tail_limit: f64) -> f64 {
        match self {
            Self::Head => -offset,
            Self::Tail => offset - tail_limit,
        }
    }
}

/// Interpolation weight toward the current position for a given overflow.
///
/// Zero at or inside the boundary (and for NaN), strictly increasing on
/// `(0, overflow_range)`, and clamped to 1 beyond it.
#[must_use]
pub fn restriction_weight(overflow: f64, overflow_range: f64) -> f64 {
    if overflow.is_nan() || overflow <= 0.0 {
        return 0.0;
    }
    if overflow_range.is_nan() || overflow_range <= 0.0 {
        return 1.0;
    }
    (overflow / overflow_range).min(1.0)
}

/// Blends `current` and `naive` by `weight`, clamped to `[0, 1]`.
#[must_use]
pub fn restricted_position(current: f64, naive: f64, weight: f64) -> f64 {
    let weight = weight.clamp(0.0, 1.0);
    weight * current + (1.0 - weight) * naive
}

#[cfg(test)]
mod tests {
    use super::{Boundary, restricted_position, restriction_weight};

    #[test]
    fn weight_is_zero_inside_and_saturates_outside() {
        assert_eq!(restriction_weight(-10.0, 125.0), 0.0);
        assert_eq!(restriction_weight(0.0, 125.0), 0.0);
        assert_eq!(restriction_weight(f64::NAN, 125.0), 0.0);
        assert_eq!(restriction_weight(125.0, 125.0), 1.0);
        assert_eq!(restriction_weight(1e9, 125.0), 1.0);
        assert_eq!(restriction_weight(f64::INFINITY, 125.0), 1.0);
    }

    #[test]
    fn weight_increases_strictly_within_range() {
        let mut previous = restriction_weight(0.0, 125.0);
        for step in 1..125 {
            let weight = restriction_weight(f64::from(step), 125.0);
            assert!(weight > previous, "weight must grow at overflow {step}");
            previous = weight;
        }
        assert!(previous < 1.0);
    }

    #[test]
    fn blend_hits_endpoints() {
        assert_eq!(restricted_position(100.0, 300.0, 0.0), 300.0);
        assert_eq!(restricted_position(100.0, 300.0, 1.0), 100.0);
        assert_eq!(restricted_position(100.0, 300.0, 0.25), 250.0);
        // Out-of-range weights clamp instead of extrapolating.
        assert_eq!(restricted_position(100.0, 300.0, 2.0), 100.0);
        assert_eq!(restricted_position(100.0, 300.0, -1.0), 300.0);
    }

    #[test]
    fn boundaries_follow_delta_sign() {
        assert_eq!(Boundary::toward(3.0), Some(Boundary::Tail));
        assert_eq!(Boundary::toward(-3.0), Some(Boundary::Head));
        assert_eq!(Boundary::toward(0.0), None);
        assert_eq!(Boundary::Head.overflow(-40.0, 100.0), 40.0);
        assert_eq!(Boundary::Tail.overflow(160.0, 100.0), 60.0);
        assert_eq!(Boundary::Tail.overflow(60.0, 100.0), -40.0);
    }
}
