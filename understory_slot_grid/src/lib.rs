// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_slot_grid --heading-base-level=0

//! Understory Slot Grid: a recycling slot pool over a fixed-column grid.
//!
//! This crate renders a bounded window of visual slots over a potentially large
//! ordered list of records. Instead of materializing one view per record, it
//! keeps a small pool of [`Slot`]s and rebinds them as the window moves.
//!
//! The core concepts are:
//!
//! - [`RecordSource`]: the ordered, read-only list that slots are bound to.
//! - [`GridLayout`]: maps a linear index to a [`GridPosition`] (row-major, fixed
//!   column count) and then to an anchored offset. Rows grow downward, so
//!   anchored `y` values are non-positive.
//! - [`SlotView`]: the seam to the host's rendering layer. A view is notified
//!   on bind and on visibility changes; the window only tracks identity.
//! - [`WindowManager`]: owns the pool, keeps the active slots sorted and
//!   contiguous by index, and grows or shrinks the window one row at a time at
//!   either end. [`WindowManager::update_window`] applies the add/remove
//!   thresholds for a scroll step.
//!
//! Scroll input, momentum, and boundary resistance live in
//! `understory_elastic_scroll`, which drives a [`WindowManager`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_slot_grid::{GridConfig, WindowManager};
//!
//! // Three columns of 100x50 slots with a 10px gap, in a 400px viewport.
//! let config = GridConfig::new(3, Size::new(100.0, 50.0), 400.0)
//!     .with_spacing(Vec2::new(10.0, 10.0));
//! let mut window = WindowManager::headless(config).unwrap();
//!
//! // 1000 records, but only the overscanned window is bound.
//! let records: Vec<u32> = (0..1000).collect();
//! let bound = window.create_window(records);
//! assert_eq!(bound, 45);
//! assert_eq!(window.slot_count(), 45);
//!
//! // Dropping the head row recycles its slots for the next tail row.
//! window.delete_from_head();
//! window.add_into_tail();
//! assert_eq!(window.head_index(), Some(3));
//! assert_eq!(window.tail_index(), Some(47));
//! assert_eq!(window.slot_count(), 45);
//! ```
//!
//! Positions and offsets use a y-up convention: a positive content offset
//! moves the grid up and reveals tail rows.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`GridConfig`],
//!   [`GridLayout`], and [`GridPosition`].

mod config;
mod error;
mod layout;
mod slot;
mod source;
mod window;

pub use config::{GridConfig, OVERSCAN_ROWS};
pub use error::GridConfigError;
pub use layout::{GridLayout, GridPosition};
pub use slot::{Binding, Slot, SlotId, SlotView};
pub use source::RecordSource;
pub use window::{WindowChanges, WindowManager};
