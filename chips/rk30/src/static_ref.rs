// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Pointers to register windows at fixed addresses.

use core::ops::Deref;

/// A `'static` view of a memory mapped register window, such as a GPIO bank
/// or the pull words of the GRF.
///
/// The address is fixed when the board maps its peripherals and never
/// changes afterwards. The wrapper is `Copy`, so every driver object can hold
/// its own handle to the same window.
#[derive(Debug)]
pub struct StaticRef<T> {
    ptr: *const T,
}

impl<T> StaticRef<T> {
    /// ## Safety
    ///
    /// `ptr` must point to a register window (or memory standing in for
    /// one) that stays valid for the rest of the program and is only accessed
    /// through volatile register types.
    pub const unsafe fn new(ptr: *const T) -> StaticRef<T> {
        StaticRef { ptr }
    }
}

impl<T> Clone for StaticRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticRef<T> {}

impl<T> Deref for StaticRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: guaranteed by the caller of `new`.
        unsafe { &*self.ptr }
    }
}
