// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Production menu: a recycled building catalog driven by drag and momentum.
//!
//! This example shows how to combine:
//! - `understory_slot_grid` for a pooled three-column window over a long catalog,
//! - `understory_elastic_scroll` for dragging, inertia, and rubber-band resistance.
//!
//! Run:
//! - `cargo run -p understory_demos --example production_menu`
//! - `RUST_LOG=understory_elastic_scroll=debug cargo run -p understory_demos --example production_menu`

use kurbo::{Point, Rect, Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_elastic_scroll::{
    ConfigError, MoveOutcome, PointerButtons, ScrollConfig, ScrollController, ScrollPhase,
};
use understory_slot_grid::{Binding, GridConfig, SlotId, SlotView};

const FRAME: f64 = 1.0 / 60.0;

/// One entry in the production menu.
#[derive(Clone, Debug)]
struct BuildingRecord {
    name: &'static str,
    footprint: (u8, u8),
}

/// Repeats the base catalog `copies` times, like a menu padded for scrolling.
fn building_catalog(copies: usize) -> Vec<BuildingRecord> {
    let base = [
        BuildingRecord { name: "Barracks", footprint: (4, 4) },
        BuildingRecord { name: "Power Plant", footprint: (2, 3) },
        BuildingRecord { name: "Farm", footprint: (3, 2) },
        BuildingRecord { name: "Workshop", footprint: (3, 3) },
    ];
    base.iter().cloned().cycle().take(base.len() * copies).collect()
}

/// Stand-in for a menu button: remembers what it was last bound to.
#[derive(Debug, Default)]
struct Card {
    label: String,
    visible: bool,
}

impl SlotView<BuildingRecord> for Card {
    fn bind(&mut self, binding: &Binding, record: &BuildingRecord) {
        let (w, h) = record.footprint;
        self.label = format!("#{} {} {w}x{h}", binding.index, record.name);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

type Menu = ScrollController<Vec<BuildingRecord>, Card>;

fn print_window(stage: &str, menu: &Menu) {
    let window = menu.window();
    println!(
        "{stage}: offset {:.1}, phase {:?}, rows {:?}..={:?}, pool {} ({} idle)",
        menu.content_offset().y,
        menu.phase(),
        window.head_index().map(|i| i / 3),
        window.tail_index().map(|i| i / 3),
        window.slot_count(),
        window.inactive_len(),
    );
    for slot in window.active_slots().take(3) {
        let card = slot.view();
        println!("  {} {} (visible: {})", slot.name(), card.label, card.visible);
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let viewport = Rect::new(0.0, -480.0, 376.0, 0.0);
    let grid = GridConfig::new(3, Size::new(120.0, 120.0), viewport.height())
        .with_spacing(Vec2::new(8.0, 8.0));
    let mut menu = ScrollController::initialize(
        building_catalog(12),
        grid,
        ScrollConfig::default(),
        |_: SlotId| Card::default(),
    )?
    .with_pointer_bounds(viewport);
    print_window("initial", &menu);

    // Drag content up by 440 px, one 11 px step per frame.
    let mut pointer = Point::new(180.0, -470.0);
    menu.on_drag_begin(pointer);
    for _ in 0..40 {
        pointer.y += 11.0;
        menu.on_drag_move(pointer, PointerButtons::PRIMARY);
        menu.tick(FRAME);
    }
    print_window("after drag", &menu);

    // Release and let the fling coast.
    menu.on_drag_end();
    let mut frames = 0;
    while menu.tick(FRAME) == ScrollPhase::Settling {
        frames += 1;
    }
    tracing::info!(frames, "fling settled");
    print_window("after fling", &menu);

    // Drag to the end of the catalog, then keep pulling.
    let mut pushes = 0;
    loop {
        pointer = Point::new(180.0, -460.0);
        menu.on_drag_begin(pointer);
        let mut restricted = false;
        while pointer.y < -40.0 {
            pointer.y += 20.0;
            if menu.on_drag_move(pointer, PointerButtons::PRIMARY) == MoveOutcome::Restricted {
                restricted = true;
                pushes += 1;
            }
        }
        menu.on_drag_end();
        menu.stop_movement();
        if restricted {
            break;
        }
    }
    tracing::info!(
        pushes,
        overflow = menu.content_offset().y - menu.window().tail_limit(),
        "pushed past the last row"
    );
    print_window("boundary push", &menu);

    menu.clear_content();
    print_window("cleared", &menu);
    Ok(())
}
