// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interfaces between the GPIO controller and the rest of the system.
//!
//! The first group of traits is implemented by the controller and called by
//! the host frameworks: [`GpioChip`] by the GPIO framework, [`IrqChip`] by
//! the interrupt framework and [`SyscoreOps`] by power management. The
//! second group is implemented by the platform and consumed by the
//! controller.

use crate::errorcode::GpioError;
use crate::irq::IrqFlow;
use crate::pull::Pull;

/// Direction of a GPIO pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// GPIO operations, keyed by global pin number.
pub trait GpioChip {
    /// Route the pin to its GPIO function in the pin multiplexer. Called once
    /// when a consumer acquires the pin, before any other configuration.
    fn request(&self, pin: u32) -> Result<(), GpioError>;

    /// Change the pin direction. A pin turned into an output drives the
    /// level last written to its data bit.
    fn set_direction(&self, pin: u32, direction: Direction) -> Result<(), GpioError>;

    fn get_direction(&self, pin: u32) -> Result<Direction, GpioError>;

    fn direction_input(&self, pin: u32) -> Result<(), GpioError> {
        self.set_direction(pin, Direction::Input)
    }

    /// Make the pin an output driving `value`.
    fn direction_output(&self, pin: u32, value: bool) -> Result<(), GpioError>;

    /// Write the output data bit. On an input pin the value is latched but
    /// not driven until the pin becomes an output.
    fn set_level(&self, pin: u32, value: bool) -> Result<(), GpioError>;

    /// Read the level on the pad, whatever the pin direction.
    fn get_level(&self, pin: u32) -> Result<bool, GpioError>;

    fn set_pull(&self, pin: u32, pull: Pull) -> Result<(), GpioError>;

    /// Logical interrupt number of the pin.
    fn to_irq(&self, pin: u32) -> Result<u32, GpioError>;
}

/// Per-line operations of the demultiplexed interrupt domain, keyed by
/// logical interrupt number.
pub trait IrqChip {
    /// Acknowledge an edge interrupt.
    fn ack(&self, irq: u32);

    fn mask(&self, irq: u32);

    fn unmask(&self, irq: u32);

    /// Program the trigger from raw trigger flags (see
    /// [`crate::irq::IrqType`]). Returns the flow handler the host must
    /// install for the line.
    fn set_type(&self, irq: u32, flags: u32) -> Result<IrqFlow, GpioError>;

    /// Arm (`on == true`) or disarm the line as a wakeup source.
    fn set_wake(&self, irq: u32, on: bool) -> Result<(), GpioError>;
}

/// Hooks run by power management around a system sleep.
///
/// Called exactly once per sleep cycle, `suspend` before `resume`, never
/// concurrently with each other.
pub trait SyscoreOps {
    fn suspend(&self);
    fn resume(&self);
}

/// Generic operations that clock-like things are expected to support.
pub trait ClockInterface {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}

/// Helper struct for banks whose clock is not software controlled.
pub struct NoClockControl {}

impl ClockInterface for NoClockControl {
    fn is_enabled(&self) -> bool {
        true
    }
    fn enable(&self) {}
    fn disable(&self) {}
}

/// Instance of `NoClockControl` for things that need references to
/// `ClockInterface` objects.
pub static NO_CLOCK_CONTROL: NoClockControl = NoClockControl {};

/// The pin multiplexing controller.
pub trait PinMux {
    /// Select the GPIO function for `pin`.
    fn set_gpio_mode(&self, pin: u32);
}

/// The interrupt controller the bank's cascade line is connected to.
pub trait CascadeIrq {
    /// Enter chained handling of `cascade_irq`, masking or acknowledging it
    /// at the parent controller as its flow requires.
    fn chained_enter(&self, cascade_irq: u32);

    /// Leave chained handling of `cascade_irq`, signalling end of interrupt
    /// to the parent controller.
    fn chained_exit(&self, cascade_irq: u32);
}

/// Dispatch of a demultiplexed interrupt to its handler.
pub trait InterruptDispatch {
    fn handle_irq(&self, irq: u32);
}

/// Board specific work done around the controller's own suspend and resume.
pub trait BoardPower {
    /// Called before any bank is narrowed to its wakeup sources.
    fn suspend_board(&self) {}

    /// Called after every bank has been restored.
    fn resume_board(&self) {}
}
