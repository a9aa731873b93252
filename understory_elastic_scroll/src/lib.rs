// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_elastic_scroll --heading-base-level=0

//! Understory Elastic Scroll: drag and momentum scrolling over a recycling slot grid.
//!
//! [`ScrollController`] turns pointer drags and per-frame ticks into content
//! offsets for an `understory_slot_grid` window. It owns three concerns:
//!
//! - Drag tracking: the content follows the pointer's total travel since the
//!   drag began, and a smoothed velocity is sampled on every
//!   [`tick`](ScrollController::tick).
//! - Inertia: after release, content coasts on a velocity that decays by
//!   [`ScrollConfig::deceleration_rate`] per second.
//! - Boundary resistance: when the window already holds the first or last
//!   record and a move pushes further, the committed offset is blended toward
//!   the current one (see [`restriction`]). The push weakens with overflow and
//!   stops entirely at [`ScrollConfig::overflow_range`].
//!
//! Every accepted offset change is forwarded to
//! [`WindowManager::update_window`](understory_slot_grid::WindowManager::update_window),
//! which recycles rows as they leave the viewport. Moves pushing against a
//! boundary never touch the window.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_elastic_scroll::{
//!     MoveOutcome, PointerButtons, ScrollConfig, ScrollController, ScrollPhase,
//! };
//! use understory_slot_grid::GridConfig;
//!
//! // Ten 50px rows in a 400px viewport can scroll 100px.
//! let grid = GridConfig::new(1, Size::new(100.0, 50.0), 400.0);
//! let records: Vec<u32> = (0..10).collect();
//! let mut scroll =
//!     ScrollController::initialize(records, grid, ScrollConfig::default(), |_| ()).unwrap();
//!
//! scroll.on_drag_begin(Point::new(0.0, 0.0));
//! let outcome = scroll.on_drag_move(Point::new(0.0, 100.0), PointerButtons::PRIMARY);
//! assert!(matches!(outcome, MoveOutcome::Moved(_)));
//! assert_eq!(scroll.content_offset().y, 100.0);
//!
//! // Past the end, the drag is rubber-banded instead of applied.
//! let outcome = scroll.on_drag_move(Point::new(0.0, 200.0), PointerButtons::PRIMARY);
//! assert_eq!(outcome, MoveOutcome::Restricted);
//! assert!(scroll.content_offset().y < 200.0);
//!
//! // Releasing past a boundary drops all motion.
//! scroll.on_drag_end();
//! assert_eq!(scroll.phase(), ScrollPhase::Idle);
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`ScrollConfig`] and the
//!   grid configuration types.

mod config;
mod controller;
mod error;
mod pointer;
pub mod restriction;

pub use config::ScrollConfig;
pub use controller::{MoveOutcome, ScrollController, ScrollPhase, TickOutcome};
pub use error::ConfigError;
pub use pointer::PointerButtons;
