// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! GPIO controller for the Rockchip RK30 family (RK30xx, RK3066B, RK3188,
//! RK292x).
//!
//! Each bank is a DesignWare APB GPIO block with 32 pins and one interrupt
//! output, wired to its own line on the parent interrupt controller. The
//! controller turns every pin into an individually configurable interrupt,
//! emulates both-edge triggering, which the hardware lacks, and narrows the
//! enabled interrupts to the wakeup sources across system suspend.
//!
//! The crate does not own the parent interrupt controller, the pin
//! multiplexer or the clocks; those are reached through the traits in
//! [`hil`].

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod config;

pub mod bank;
pub mod errorcode;
pub mod gpio;
pub mod hil;
pub mod irq;
pub mod pull;
pub mod registers;
pub mod soc;
pub mod static_ref;
pub mod sync;

#[cfg(test)]
mod testing;

pub use crate::errorcode::GpioError;
pub use crate::gpio::{Gpio, GpioConfig};
