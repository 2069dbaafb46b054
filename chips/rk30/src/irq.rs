// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interrupt trigger types and helpers for the cascade demultiplexer.

use crate::errorcode::GpioError;
use crate::hil::CascadeIrq;

/// Raw trigger flags as passed in by the interrupt framework.
pub mod flags {
    pub const EDGE_RISING: u32 = 0x1;
    pub const EDGE_FALLING: u32 = 0x2;
    pub const EDGE_BOTH: u32 = EDGE_RISING | EDGE_FALLING;
    pub const LEVEL_HIGH: u32 = 0x4;
    pub const LEVEL_LOW: u32 = 0x8;
}

/// Interrupt trigger of a pin.
///
/// The hardware detects one edge or one level per pin. `EdgeBoth` is
/// emulated: the pin is armed for the edge opposite to its current level and
/// re-armed after every interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqType {
    LevelLow,
    LevelHigh,
    EdgeRising,
    EdgeFalling,
    EdgeBoth,
}

impl IrqType {
    pub const fn is_edge(self) -> bool {
        matches!(
            self,
            IrqType::EdgeRising | IrqType::EdgeFalling | IrqType::EdgeBoth
        )
    }

    /// Flow handler the interrupt framework should use for this trigger.
    pub const fn flow(self) -> IrqFlow {
        if self.is_edge() {
            IrqFlow::Edge
        } else {
            IrqFlow::Level
        }
    }
}

impl TryFrom<u32> for IrqType {
    type Error = GpioError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            flags::EDGE_RISING => Ok(IrqType::EdgeRising),
            flags::EDGE_FALLING => Ok(IrqType::EdgeFalling),
            flags::EDGE_BOTH => Ok(IrqType::EdgeBoth),
            flags::LEVEL_HIGH => Ok(IrqType::LevelHigh),
            flags::LEVEL_LOW => Ok(IrqType::LevelLow),
            _ => Err(GpioError::UnsupportedTrigger),
        }
    }
}

/// How the interrupt framework must handle a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqFlow {
    /// Keep the line masked until the handler has run.
    Level,
    /// Acknowledge the line before running the handler.
    Edge,
}

/// Iterator over the set bits of a word, most significant first.
pub(crate) struct BitsMsbFirst(pub(crate) u32);

impl Iterator for BitsMsbFirst {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }
        let bit = 31 - self.0.leading_zeros();
        self.0 &= !(1 << bit);
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let popcnt = self.0.count_ones() as usize;
        (popcnt, Some(popcnt))
    }
}

impl ExactSizeIterator for BitsMsbFirst {}

/// Chained handling of a cascade line.
///
/// Entering happens on construction. `exit` may be called early, and only
/// the first call reaches the parent controller; if it is never called the
/// line is exited on drop.
pub(crate) struct Chained<'a> {
    parent: &'a dyn CascadeIrq,
    cascade_irq: u32,
    exited: bool,
}

impl<'a> Chained<'a> {
    pub(crate) fn enter(parent: &'a dyn CascadeIrq, cascade_irq: u32) -> Chained<'a> {
        parent.chained_enter(cascade_irq);
        Chained {
            parent,
            cascade_irq,
            exited: false,
        }
    }

    pub(crate) fn exit(&mut self) {
        if !self.exited {
            self.exited = true;
            self.parent.chained_exit(self.cascade_irq);
        }
    }
}

impl Drop for Chained<'_> {
    fn drop(&mut self) {
        self.exit();
    }
}
