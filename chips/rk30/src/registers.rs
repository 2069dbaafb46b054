// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register bank abstraction.
//!
//! Every GPIO bank is a DesignWare APB GPIO block with a single 32-bit port
//! (port A). All banks of one SoC share the same layout; only the pull
//! configuration registers, which live outside the bank in the GRF and PMU
//! register files, differ between SoCs (see [`crate::pull`]).
//!
//! The rest of the driver talks to a bank through the [`BankRegisters`]
//! trait, so that the interrupt and configuration logic can run against
//! simulated hardware on a host.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::register_structs;
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

use crate::errorcode::GpioError;
use crate::static_ref::StaticRef;

register_structs! {
    /// GPIO bank registers.
    pub GpioRegisters {
        /// Port A data register, drives output pins
        (0x00 => swporta_dr: ReadWrite<u32>),
        /// Port A data direction register, 1 = output
        (0x04 => swporta_ddr: ReadWrite<u32>),
        (0x08 => _reserved0),
        /// Interrupt enable
        (0x30 => inten: ReadWrite<u32>),
        /// Interrupt mask
        (0x34 => intmask: ReadWrite<u32>),
        /// Interrupt level, 0 = level sensitive, 1 = edge sensitive
        (0x38 => inttype_level: ReadWrite<u32>),
        /// Interrupt polarity, 0 = active low / falling, 1 = active high / rising
        (0x3c => int_polarity: ReadWrite<u32>),
        /// Interrupt status, after masking
        (0x40 => int_status: ReadOnly<u32>),
        /// Raw interrupt status, before masking
        (0x44 => int_rawstatus: ReadOnly<u32>),
        /// Debounce enable
        (0x48 => debounce: ReadWrite<u32>),
        /// Clear edge interrupts, write 1 to clear
        (0x4c => porta_eoi: WriteOnly<u32>),
        /// External port A, the level currently seen on the pads
        (0x50 => ext_porta: ReadOnly<u32>),
        (0x54 => _reserved1),
        /// Synchronize level sensitive interrupts to pclk
        (0x60 => ls_sync: ReadWrite<u32>),
        (0x64 => @END),
    }
}

/// Registers of a bank, named by function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Reg {
    PortData = 0x00,
    Direction = 0x04,
    IntEnable = 0x30,
    IntMask = 0x34,
    IntTypeLevel = 0x38,
    IntPolarity = 0x3c,
    IntStatus = 0x40,
    RawIntStatus = 0x44,
    Debounce = 0x48,
    Eoi = 0x4c,
    ExtPort = 0x50,
    LevelSync = 0x60,
}

impl Reg {
    /// Byte offset of the register from the bank base.
    pub const fn offset(self) -> usize {
        self as usize
    }

    pub const fn is_readable(self) -> bool {
        !matches!(self, Reg::Eoi)
    }

    pub const fn is_writable(self) -> bool {
        !matches!(self, Reg::IntStatus | Reg::RawIntStatus | Reg::ExtPort)
    }
}

/// Access to the registers of one bank.
///
/// `set_bits` is a plain read-modify-write and is not atomic against other
/// writers of the same register. Any caller that performs more than one
/// access as a unit must hold the bank lock for the whole sequence.
///
/// Reading a write-only register or writing a read-only one is a
/// programming error. Implementations assert on it in debug builds.
pub trait BankRegisters {
    /// Return the current raw value of `reg`. Status and pad registers are
    /// always read from hardware, never cached.
    fn read(&self, reg: Reg) -> u32;

    /// Write `value` to `reg`.
    fn write(&self, reg: Reg, value: u32);

    /// Set (`enable == true`) or clear the bits of `mask` in `reg`, leaving
    /// all other bits untouched.
    fn set_bits(&self, reg: Reg, mask: u32, enable: bool) {
        let value = self.read(reg);
        let value = if enable { value | mask } else { value & !mask };
        self.write(reg, value);
    }

    /// Whether any bit of `mask` is set in `reg`.
    fn is_set(&self, reg: Reg, mask: u32) -> bool {
        self.read(reg) & mask != 0
    }
}

/// A bank backed by memory mapped registers.
pub struct MmioBank {
    registers: StaticRef<GpioRegisters>,
}

impl MmioBank {
    pub const fn new(registers: StaticRef<GpioRegisters>) -> MmioBank {
        MmioBank { registers }
    }
}

// SAFETY: every access is a single volatile load or store of an aligned
// 32-bit word. Sequences of accesses are serialized by the bank lock in
// `GpioBank`, never by this type.
unsafe impl Sync for MmioBank {}
unsafe impl Send for MmioBank {}

impl BankRegisters for MmioBank {
    fn read(&self, reg: Reg) -> u32 {
        let regs = self.registers;
        match reg {
            Reg::PortData => regs.swporta_dr.get(),
            Reg::Direction => regs.swporta_ddr.get(),
            Reg::IntEnable => regs.inten.get(),
            Reg::IntMask => regs.intmask.get(),
            Reg::IntTypeLevel => regs.inttype_level.get(),
            Reg::IntPolarity => regs.int_polarity.get(),
            Reg::IntStatus => regs.int_status.get(),
            Reg::RawIntStatus => regs.int_rawstatus.get(),
            Reg::Debounce => regs.debounce.get(),
            Reg::ExtPort => regs.ext_porta.get(),
            Reg::LevelSync => regs.ls_sync.get(),
            Reg::Eoi => {
                debug_assert!(false, "read of write-only register {:?}", reg);
                0
            }
        }
    }

    fn write(&self, reg: Reg, value: u32) {
        let regs = self.registers;
        match reg {
            Reg::PortData => regs.swporta_dr.set(value),
            Reg::Direction => regs.swporta_ddr.set(value),
            Reg::IntEnable => regs.inten.set(value),
            Reg::IntMask => regs.intmask.set(value),
            Reg::IntTypeLevel => regs.inttype_level.set(value),
            Reg::IntPolarity => regs.int_polarity.set(value),
            Reg::Debounce => regs.debounce.set(value),
            Reg::Eoi => regs.porta_eoi.set(value),
            Reg::LevelSync => regs.ls_sync.set(value),
            Reg::IntStatus | Reg::RawIntStatus | Reg::ExtPort => {
                debug_assert!(false, "write of read-only register {:?}", reg);
            }
        }
    }
}

register_structs! {
    /// A window of pull configuration words in the GRF or PMU register file.
    ///
    /// Each word carries a write-enable mask in its upper half: a data bit
    /// `n` is only updated if bit `n + 16` is set in the same write, so a
    /// single store changes one pin's field without a prior read.
    pub PullRegisters {
        (0x00 => pull: [WriteOnly<u32>; 32]),
        (0x80 => @END),
    }
}

impl PullRegisters {
    /// Number of words in the window.
    pub const WORDS: usize = 32;

    /// Store `value` to word `index`. Indexes past the window belong to no
    /// pin this layout can reach.
    pub(crate) fn write_word(&self, index: usize, value: u32) -> Result<(), GpioError> {
        let word = self.pull.get(index).ok_or(GpioError::UnsupportedPull)?;
        word.set(value);
        Ok(())
    }
}
