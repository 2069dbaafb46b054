// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Errors returned by the GPIO bank controller.

use core::fmt;

/// Errors returned to the immediate caller of a pin or interrupt
/// configuration operation.
///
/// None of these are fatal: the request was not applied and the hardware
/// state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum GpioError {
    /// The pin or interrupt number does not belong to any configured bank,
    /// or lies past the end of a partial bank.
    OutOfRange = 1,
    /// The trigger flags do not name one of the five supported trigger
    /// types.
    UnsupportedTrigger = 2,
    /// The pull mode cannot be expressed by this SoC's pull register layout.
    UnsupportedPull = 3,
}

impl From<GpioError> for usize {
    fn from(err: GpioError) -> usize {
        err as usize
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GpioError::OutOfRange => write!(f, "pin or interrupt out of range"),
            GpioError::UnsupportedTrigger => write!(f, "unsupported interrupt trigger type"),
            GpioError::UnsupportedPull => write!(f, "unsupported pull mode"),
        }
    }
}
