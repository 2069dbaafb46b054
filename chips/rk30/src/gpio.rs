// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! The GPIO controller: a fixed set of banks behind one global pin and
//! interrupt numbering.
//!
//! Pin `pin_base + id * 32 + offset` and interrupt `irq_base + id * 32 +
//! offset` both name pin `offset` of bank `id`. Numbers that fall into a
//! missing bank, or past the end of a partial bank, are rejected with
//! [`GpioError::OutOfRange`].
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! const GPIO_CONFIG: GpioConfig = GpioConfig { pin_base: 0, irq_base: 160 };
//! let layout = SocVariant::Rk30.banks();
//! let bank = |i: usize| {
//!     GpioBank::new(
//!         &GPIO_CONFIG,
//!         layout[i].with_cascade(GPIO_CASCADE_IRQS[i]),
//!         MmioBank::new(GPIO_BASES[i]),
//!         &peripheral_clocks[i],
//!     )
//! };
//! let gpio = static_init!(
//!     Gpio<'static, MmioBank, 6>,
//!     Gpio::new(
//!         GPIO_CONFIG,
//!         [bank(0), bank(1), bank(2), bank(3), bank(4), bank(5)],
//!         PullLayout::Rk30(Rk30Pull::new(GRF_GPIO0L_PULL)),
//!         iomux,
//!         gic,
//!         irq_desc,
//!     )
//! );
//! gpio.init();
//! ```

use log::{info, warn};

use crate::bank::{GpioBank, PINS_PER_BANK};
use crate::errorcode::GpioError;
use crate::hil::{
    BoardPower, CascadeIrq, Direction, GpioChip, InterruptDispatch, IrqChip, PinMux, SyscoreOps,
};
use crate::irq::{IrqFlow, IrqType};
use crate::pull::{Pull, PullControl, PullLayout};
use crate::registers::BankRegisters;

/// Global numbering of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpioConfig {
    /// Global number of pin 0 of bank 0.
    pub pin_base: u32,
    /// Logical interrupt number of pin 0 of bank 0.
    pub irq_base: u32,
}

pub struct Gpio<'a, R: BankRegisters, const N: usize> {
    config: GpioConfig,
    banks: [GpioBank<'a, R>; N],
    pull: PullLayout,
    pinmux: &'a (dyn PinMux + Sync),
    cascade: &'a (dyn CascadeIrq + Sync),
    dispatch: &'a (dyn InterruptDispatch + Sync),
    board: Option<&'a (dyn BoardPower + Sync)>,
}

impl<'a, R: BankRegisters, const N: usize> Gpio<'a, R, N> {
    /// Build the controller.
    ///
    /// Panics if two banks share an id or a cascade interrupt, if a bank
    /// was built with a different numbering than `config`, or if the pull
    /// layout has no registers for one of the banks. A bad bank table is a
    /// board bug that must not get past the first boot.
    pub fn new(
        config: GpioConfig,
        banks: [GpioBank<'a, R>; N],
        pull: PullLayout,
        pinmux: &'a (dyn PinMux + Sync),
        cascade: &'a (dyn CascadeIrq + Sync),
        dispatch: &'a (dyn InterruptDispatch + Sync),
    ) -> Gpio<'a, R, N> {
        for (i, bank) in banks.iter().enumerate() {
            let first = bank.id() as u32 * PINS_PER_BANK;
            assert!(
                bank.base() == config.pin_base + first
                    && bank.irq_base() == config.irq_base + first,
                "gpio{}: bank numbering does not match the controller",
                bank.id()
            );
            assert!(
                pull.covers_bank(bank.id()),
                "gpio{}: no pull registers for this bank",
                bank.id()
            );
            for other in &banks[..i] {
                assert!(other.id() != bank.id(), "gpio{}: duplicate bank", bank.id());
                assert!(
                    other.cascade_irq() != bank.cascade_irq(),
                    "gpio{}: cascade irq {} already used by gpio{}",
                    bank.id(),
                    bank.cascade_irq(),
                    other.id()
                );
            }
        }

        Gpio {
            config,
            banks,
            pull,
            pinmux,
            cascade,
            dispatch,
            board: None,
        }
    }

    /// Hooks run around the bank suspend and resume sequences.
    pub fn with_board_power(mut self, board: &'a (dyn BoardPower + Sync)) -> Gpio<'a, R, N> {
        self.board = Some(board);
        self
    }

    pub fn config(&self) -> GpioConfig {
        self.config
    }

    pub fn banks(&self) -> &[GpioBank<'a, R>] {
        &self.banks
    }

    pub fn bank(&self, id: u8) -> Option<&GpioBank<'a, R>> {
        self.banks.iter().find(|bank| bank.id() == id)
    }

    /// Number of pins over all banks.
    pub fn ngpio(&self) -> u32 {
        self.banks.iter().map(|bank| bank.ngpio() as u32).sum()
    }

    /// Bring every bank to a known state: clock on, all pin interrupts
    /// disabled.
    pub fn init(&self) {
        for bank in &self.banks {
            bank.init();
        }
        info!("{} gpio irqs in {} banks", self.ngpio(), N);
    }

    /// Map a number relative to `base` to a bank and pin offset.
    fn locate(&self, number: u32, base: u32) -> Result<(&GpioBank<'a, R>, u32), GpioError> {
        let relative = number.checked_sub(base).ok_or(GpioError::OutOfRange)?;
        let id = u8::try_from(relative / PINS_PER_BANK).map_err(|_| GpioError::OutOfRange)?;
        let offset = relative % PINS_PER_BANK;
        let bank = self.bank(id).ok_or(GpioError::OutOfRange)?;
        if offset < bank.ngpio() as u32 {
            Ok((bank, offset))
        } else {
            Err(GpioError::OutOfRange)
        }
    }

    fn pin(&self, pin: u32) -> Result<(&GpioBank<'a, R>, u32), GpioError> {
        self.locate(pin, self.config.pin_base)
    }

    fn irq(&self, irq: u32) -> Result<(&GpioBank<'a, R>, u32), GpioError> {
        self.locate(irq, self.config.irq_base)
    }

    /// Inverse of [`GpioChip::to_irq`].
    pub fn irq_to_pin(&self, irq: u32) -> Result<u32, GpioError> {
        self.irq(irq).map(|(bank, offset)| bank.base() + offset)
    }

    /// Program the trigger of the interrupt of `pin`.
    pub fn set_trigger_type(&self, pin: u32, irq_type: IrqType) -> Result<IrqFlow, GpioError> {
        let (bank, offset) = self.pin(pin)?;
        Ok(bank.set_type(offset, irq_type))
    }

    pub fn set_debounce(&self, pin: u32, enable: bool) -> Result<(), GpioError> {
        let (bank, offset) = self.pin(pin)?;
        bank.set_debounce(offset, enable);
        Ok(())
    }

    /// Entry point for the parent interrupt controller when the cascade line
    /// `cascade_irq` fires. Lines not owned by any bank are ignored.
    pub fn handle_cascade(&self, cascade_irq: u32) {
        if let Some(bank) = self
            .banks
            .iter()
            .find(|bank| bank.cascade_irq() == cascade_irq)
        {
            bank.handle_interrupt(self.cascade, self.dispatch);
        }
    }
}

impl<R: BankRegisters, const N: usize> GpioChip for Gpio<'_, R, N> {
    fn request(&self, pin: u32) -> Result<(), GpioError> {
        self.pin(pin)?;
        self.pinmux.set_gpio_mode(pin);
        Ok(())
    }

    fn set_direction(&self, pin: u32, direction: Direction) -> Result<(), GpioError> {
        let (bank, offset) = self.pin(pin)?;
        bank.set_direction(offset, direction);
        Ok(())
    }

    fn get_direction(&self, pin: u32) -> Result<Direction, GpioError> {
        let (bank, offset) = self.pin(pin)?;
        Ok(bank.get_direction(offset))
    }

    fn direction_output(&self, pin: u32, value: bool) -> Result<(), GpioError> {
        let (bank, offset) = self.pin(pin)?;
        bank.direction_output(offset, value);
        Ok(())
    }

    fn set_level(&self, pin: u32, value: bool) -> Result<(), GpioError> {
        let (bank, offset) = self.pin(pin)?;
        bank.set_level(offset, value);
        Ok(())
    }

    fn get_level(&self, pin: u32) -> Result<bool, GpioError> {
        let (bank, offset) = self.pin(pin)?;
        Ok(bank.get_level(offset))
    }

    fn set_pull(&self, pin: u32, pull: Pull) -> Result<(), GpioError> {
        let (bank, offset) = self.pin(pin)?;
        self.pull.set_pull(bank.id(), offset, pull)
    }

    fn to_irq(&self, pin: u32) -> Result<u32, GpioError> {
        let (bank, offset) = self.pin(pin)?;
        Ok(bank.irq_base() + offset)
    }
}

impl<R: BankRegisters, const N: usize> IrqChip for Gpio<'_, R, N> {
    fn ack(&self, irq: u32) {
        if let Ok((bank, offset)) = self.irq(irq) {
            bank.ack(offset);
        }
    }

    fn mask(&self, irq: u32) {
        if let Ok((bank, offset)) = self.irq(irq) {
            bank.mask(offset);
        }
    }

    fn unmask(&self, irq: u32) {
        if let Ok((bank, offset)) = self.irq(irq) {
            bank.unmask(offset);
        }
    }

    fn set_type(&self, irq: u32, flags: u32) -> Result<IrqFlow, GpioError> {
        let (bank, offset) = self.irq(irq)?;
        let irq_type = IrqType::try_from(flags).map_err(|err| {
            warn!("irq {}: unsupported trigger {:#x}", irq, flags);
            err
        })?;
        Ok(bank.set_type(offset, irq_type))
    }

    fn set_wake(&self, irq: u32, on: bool) -> Result<(), GpioError> {
        let (bank, offset) = self.irq(irq)?;
        bank.set_wake(offset, on);
        Ok(())
    }
}

impl<R: BankRegisters, const N: usize> SyscoreOps for Gpio<'_, R, N> {
    fn suspend(&self) {
        if let Some(board) = self.board {
            board.suspend_board();
        }
        for bank in &self.banks {
            bank.suspend();
        }
    }

    fn resume(&self) {
        for bank in &self.banks {
            bank.resume();
        }
        if let Some(board) = self.board {
            board.resume_board();
        }
    }
}
