// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Compile-time configuration options for the GPIO controller.
//!
//! Options are collected in a `const` object instead of being scattered over
//! `#[cfg(feature = ...)]` attributes so that every code path is type-checked
//! regardless of which options are turned on. Disabled paths are folded away
//! by the compiler.
//!
//! The values are selected with the crate's Cargo features:
//!
//! ```toml
//! [dependencies]
//! rk30 = { path = "../../chips/rk30", features = ["trace_interrupts"] }
//! ```

/// Data structure holding compile-time configuration options.
pub(crate) struct Config {
    /// Emit a `log::trace!` record for every demultiplex pass, with the bank
    /// id and the pending status bitmap.
    ///
    /// This is on the interrupt path, so it should only be turned on while
    /// debugging a board.
    pub(crate) trace_interrupts: bool,

    /// Turn on the hardware debounce filter for a pin whenever its trigger
    /// type is programmed.
    // Debounce is clocked from the bank clock and on some boards an enabled
    // debounce filter keeps the core from leaving WFI. Leave it off unless the
    // board is known to be fine with it.
    pub(crate) debounce_inputs: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined.
pub(crate) const CONFIG: Config = Config {
    trace_interrupts: cfg!(feature = "trace_interrupts"),
    debounce_inputs: cfg!(feature = "debounce_inputs"),
};
