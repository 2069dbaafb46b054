// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! One GPIO bank: pin configuration, cascade demultiplexing and the
//! suspend/resume bookkeeping for its pins.
//!
//! Pins are not objects. All per-pin state lives in bits of the bank's
//! hardware registers and of three software bitmasks (`wake_mask`,
//! `saved_enable`, `toggle_edge`), indexed by the pin offset in the bank.
//!
//! Locking
//! -------
//!
//! Each bank has one interrupt-safe spin lock ([`IrqSafeMutex`]). Every
//! sequence that reads a register and
//! writes it back, or that touches more than one register as a unit, holds
//! the lock from the first access to the last. Single writes that the
//! hardware applies atomically (acknowledge) and plain reads of the pad or
//! status registers do not take it. The cascade handler only takes the lock
//! to rewrite the polarity of both-edge pins, after all handlers have run,
//! so handlers are free to mask, unmask or reconfigure their own pins.
//!
//! Interrupts are masked on the local core while the lock is held. A cascade
//! raised on the core that is configuring the bank is taken once the
//! configuration call has released the lock.

use core::sync::atomic::{AtomicU32, Ordering};

use log::{debug, trace};

use crate::config::CONFIG;
use crate::gpio::GpioConfig;
use crate::hil::{CascadeIrq, ClockInterface, Direction, InterruptDispatch};
use crate::irq::{BitsMsbFirst, Chained, IrqFlow, IrqType};
use crate::registers::{BankRegisters, Reg};
use crate::sync::IrqSafeMutex;

/// Pins per bank in the global pin and interrupt numbering. Partial banks
/// leave a hole at the end of their range.
pub const PINS_PER_BANK: u32 = 32;

/// Static description of one bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankConfig {
    /// Hardware bank number. Pin numbers of the bank start at
    /// `pin_base + id * 32`.
    pub id: u8,
    /// Number of pins, 32 or fewer for a partial bank.
    pub ngpio: u8,
    /// Parent interrupt the bank's combined interrupt output is wired to.
    pub cascade_irq: u32,
}

/// Bank state guarded by the bank lock.
struct BankState {
    /// Pins armed to wake the system.
    wake_mask: u32,
    /// `INTEN` as it was when the bank was suspended.
    saved_enable: u32,
    suspended: bool,
    /// The bank clock was turned off by `suspend`.
    clock_gated: bool,
}

pub struct GpioBank<'a, R: BankRegisters> {
    id: u8,
    ngpio: u8,
    base: u32,
    irq_base: u32,
    cascade_irq: u32,
    registers: R,
    clock: &'a (dyn ClockInterface + Sync),
    state: IrqSafeMutex<BankState>,
    /// Pins emulating both-edge triggering. Read without the lock by the
    /// cascade handler; only written with the lock held.
    toggle_edge: AtomicU32,
}

#[inline]
const fn bit(offset: u32) -> u32 {
    1 << offset
}

/// Polarity that arms the edge opposite to the level just observed: falling
/// if the pin is high, rising if it is low.
#[inline]
const fn opposite_edge(polarity: u32, level: u32, mask: u32) -> u32 {
    if level & mask != 0 {
        polarity & !mask
    } else {
        polarity | mask
    }
}

impl<'a, R: BankRegisters> GpioBank<'a, R> {
    pub const fn new(
        config: &GpioConfig,
        bank: BankConfig,
        registers: R,
        clock: &'a (dyn ClockInterface + Sync),
    ) -> GpioBank<'a, R> {
        assert!(
            bank.ngpio > 0 && bank.ngpio as u32 <= PINS_PER_BANK,
            "a bank has between 1 and 32 pins"
        );
        let first = bank.id as u32 * PINS_PER_BANK;
        assert!(
            config.pin_base.checked_add(first + PINS_PER_BANK).is_some()
                && config.irq_base.checked_add(first + PINS_PER_BANK).is_some(),
            "bank id outside the pin numbering space"
        );
        GpioBank {
            id: bank.id,
            ngpio: bank.ngpio,
            base: config.pin_base + first,
            irq_base: config.irq_base + first,
            cascade_irq: bank.cascade_irq,
            registers,
            clock,
            state: IrqSafeMutex::new(BankState {
                wake_mask: 0,
                saved_enable: 0,
                suspended: false,
                clock_gated: false,
            }),
            toggle_edge: AtomicU32::new(0),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn ngpio(&self) -> u8 {
        self.ngpio
    }

    /// Global number of the bank's first pin.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Logical interrupt number of the bank's first pin.
    pub fn irq_base(&self) -> u32 {
        self.irq_base
    }

    pub fn cascade_irq(&self) -> u32 {
        self.cascade_irq
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    pub fn wake_mask(&self) -> u32 {
        self.state.lock().wake_mask
    }

    pub fn toggle_edge_mask(&self) -> u32 {
        self.toggle_edge.load(Ordering::Relaxed)
    }

    /// Turn the clock on and disable every pin interrupt.
    pub(crate) fn init(&self) {
        let _state = self.state.lock();
        self.clock.enable();
        self.registers.write(Reg::IntEnable, 0);
    }

    pub fn set_direction(&self, offset: u32, direction: Direction) {
        let _state = self.state.lock();
        self.registers
            .set_bits(Reg::Direction, bit(offset), direction == Direction::Output);
    }

    pub fn get_direction(&self, offset: u32) -> Direction {
        if self.registers.is_set(Reg::Direction, bit(offset)) {
            Direction::Output
        } else {
            Direction::Input
        }
    }

    /// Latch `value` and then turn the pin into an output, so the pad never
    /// drives a stale level.
    pub fn direction_output(&self, offset: u32, value: bool) {
        let _state = self.state.lock();
        self.registers.set_bits(Reg::PortData, bit(offset), value);
        self.registers.set_bits(Reg::Direction, bit(offset), true);
    }

    pub fn set_level(&self, offset: u32, value: bool) {
        let _state = self.state.lock();
        self.registers.set_bits(Reg::PortData, bit(offset), value);
    }

    pub fn get_level(&self, offset: u32) -> bool {
        self.registers.is_set(Reg::ExtPort, bit(offset))
    }

    pub fn set_debounce(&self, offset: u32, enable: bool) {
        let _state = self.state.lock();
        self.registers.set_bits(Reg::Debounce, bit(offset), enable);
    }

    /// Program the interrupt trigger of a pin.
    ///
    /// The pin is turned into an input first, since the detector samples the
    /// pad. For `EdgeBoth` the pad level is sampled and the opposite edge is
    /// armed; the pin is then re-armed by the cascade handler after each
    /// interrupt.
    pub fn set_type(&self, offset: u32, irq_type: IrqType) -> IrqFlow {
        let mask = bit(offset);
        let _state = self.state.lock();

        self.registers.set_bits(Reg::Direction, mask, false);
        if CONFIG.debounce_inputs {
            self.registers.set_bits(Reg::Debounce, mask, true);
        }

        let hw_type = match irq_type {
            IrqType::EdgeBoth => {
                self.toggle_edge.fetch_or(mask, Ordering::Relaxed);
                if self.registers.is_set(Reg::ExtPort, mask) {
                    IrqType::EdgeFalling
                } else {
                    IrqType::EdgeRising
                }
            }
            other => {
                self.toggle_edge.fetch_and(!mask, Ordering::Relaxed);
                other
            }
        };

        let (edge, active_high) = match hw_type {
            IrqType::LevelLow => (false, false),
            IrqType::LevelHigh => (false, true),
            IrqType::EdgeFalling => (true, false),
            IrqType::EdgeRising | IrqType::EdgeBoth => (true, true),
        };
        self.registers.set_bits(Reg::IntTypeLevel, mask, edge);
        self.registers.set_bits(Reg::IntPolarity, mask, active_high);

        irq_type.flow()
    }

    /// Acknowledge an edge interrupt. A single write, safe without the lock.
    pub fn ack(&self, offset: u32) {
        self.registers.write(Reg::Eoi, bit(offset));
    }

    pub fn mask(&self, offset: u32) {
        let _state = self.state.lock();
        self.registers.set_bits(Reg::IntEnable, bit(offset), false);
    }

    pub fn unmask(&self, offset: u32) {
        let _state = self.state.lock();
        self.registers.set_bits(Reg::IntEnable, bit(offset), true);
    }

    pub fn set_wake(&self, offset: u32, on: bool) {
        let mut state = self.state.lock();
        if on {
            state.wake_mask |= bit(offset);
        } else {
            state.wake_mask &= !bit(offset);
        }
    }

    /// Demultiplex one assertion of the bank's cascade line.
    ///
    /// Pending pins are dispatched from the highest offset down. The cascade
    /// line is released before the handler of the first edge-triggered pin
    /// runs, so an edge arriving while handlers execute raises the line
    /// again; if only level-triggered pins are pending it is released once
    /// the pass is over. Later edge-triggered pins in the same pass do not
    /// release it a second time.
    ///
    /// Both-edge pins are re-armed for the opposite edge from a snapshot of
    /// the pad levels taken before any handler runs. A pin that changes
    /// twice between that snapshot and the polarity rewrite loses the second
    /// change.
    pub fn handle_interrupt(&self, parent: &dyn CascadeIrq, dispatch: &dyn InterruptDispatch) {
        let mut chained = Chained::enter(parent, self.cascade_irq);

        let isr = self.registers.read(Reg::IntStatus);
        let ilr = self.registers.read(Reg::IntTypeLevel);
        if CONFIG.trace_interrupts {
            trace!("gpio{}: isr {:#010x} ilr {:#010x}", self.id, isr, ilr);
        }

        let toggle = self.toggle_edge.load(Ordering::Relaxed);
        let (mut polarity, level) = if toggle != 0 {
            (
                self.registers.read(Reg::IntPolarity),
                self.registers.read(Reg::ExtPort),
            )
        } else {
            (0, 0)
        };

        let mut rearm = 0;
        for pin in BitsMsbFirst(isr) {
            let mask = bit(pin);
            if ilr & mask != 0 {
                chained.exit();
            }
            if toggle & mask != 0 {
                polarity = opposite_edge(polarity, level, mask);
                rearm |= mask;
            }
            dispatch.handle_irq(self.irq_base + pin);
        }

        if rearm != 0 {
            self.rearm_edges(polarity, rearm);
        }
    }

    /// Write the polarity bits selected by `rearm` with every pin interrupt
    /// disabled, so that a half updated polarity word cannot raise an
    /// interrupt.
    fn rearm_edges(&self, polarity: u32, rearm: u32) {
        let _state = self.state.lock();
        let current = self.registers.read(Reg::IntPolarity);
        let enabled = self.registers.read(Reg::IntEnable);
        self.registers.write(Reg::IntEnable, 0);
        self.registers
            .write(Reg::IntPolarity, (current & !rearm) | (polarity & rearm));
        self.registers.write(Reg::IntEnable, enabled);
    }

    /// Narrow the enabled interrupts to the wakeup sources. A bank with no
    /// wakeup source also has its clock turned off.
    pub(crate) fn suspend(&self) {
        let mut state = self.state.lock();
        if state.suspended {
            return;
        }

        state.saved_enable = self.registers.read(Reg::IntEnable);
        self.registers.write(Reg::IntEnable, state.wake_mask);
        state.suspended = true;

        if state.wake_mask == 0 {
            self.clock.disable();
            state.clock_gated = true;
        }
        debug!(
            "gpio{}: suspend, inten {:#010x} -> {:#010x}{}",
            self.id,
            state.saved_enable,
            state.wake_mask,
            if state.clock_gated { ", clock off" } else { "" }
        );
    }

    /// Restore the interrupts enabled before `suspend`, keeping wakeup
    /// sources that fired while suspended enabled so their interrupt is
    /// delivered.
    pub(crate) fn resume(&self) {
        let mut state = self.state.lock();
        if !state.suspended {
            return;
        }

        if state.clock_gated {
            self.clock.enable();
            state.clock_gated = false;
        }

        let isr = self.registers.read(Reg::IntStatus);
        let fired = state.wake_mask & isr;
        self.registers
            .write(Reg::IntEnable, state.saved_enable | fired);
        state.suspended = false;
        debug!(
            "gpio{}: resume, inten {:#010x}, woken by {:#010x}",
            self.id, state.saved_enable, fired
        );
    }
}
