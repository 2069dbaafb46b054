// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interrupt-safe spin lock for bank state.
//!
//! The cascade handler of a bank can run on the core that is in the middle
//! of configuring the same bank. A plain spin lock would then spin forever
//! in the handler. `IrqSafeMutex` enters a critical section before taking
//! the spin lock and leaves it after the spin lock is released, so a bank
//! interrupt can only be taken on a core that does not hold the lock.
//! Other cores still contend on the spin lock.
//!
//! The critical section comes from the `critical-section` crate; the
//! platform provides its implementation (interrupt masking on a single
//! core, interrupt masking plus a hardware spinlock on several).

use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};

use critical_section::RestoreState;
use spin::{Mutex, MutexGuard};

pub struct IrqSafeMutex<T> {
    inner: Mutex<T>,
}

pub struct IrqSafeGuard<'a, T> {
    guard: ManuallyDrop<MutexGuard<'a, T>>,
    restore: RestoreState,
}

impl<T> IrqSafeMutex<T> {
    pub const fn new(value: T) -> IrqSafeMutex<T> {
        IrqSafeMutex {
            inner: Mutex::new(value),
        }
    }

    pub fn lock(&self) -> IrqSafeGuard<'_, T> {
        // SAFETY: released exactly once, by the guard's `Drop`, and guards are
        // dropped in reverse order of acquisition on a given core.
        let restore = unsafe { critical_section::acquire() };
        IrqSafeGuard {
            guard: ManuallyDrop::new(self.inner.lock()),
            restore,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

impl<T> Deref for IrqSafeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for IrqSafeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for IrqSafeGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: the spin lock is released before interrupts come back, and
        // `restore` is the token of the matching `acquire`.
        unsafe {
            ManuallyDrop::drop(&mut self.guard);
            critical_section::release(self.restore);
        }
    }
}
