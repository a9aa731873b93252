// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer button state carried by drag events.

bitflags::bitflags! {
    /// Buttons held while a pointer event was produced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        /// Primary button (usually left).
        const PRIMARY   = 0b0000_0001;
        /// Secondary button (usually right).
        const SECONDARY = 0b0000_0010;
        /// Auxiliary button (usually the wheel).
        const AUXILIARY = 0b0000_0100;
    }
}
