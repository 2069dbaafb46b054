// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Simulated hardware and recording platform hooks for unit tests.

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::boxed::Box;
use std::sync::Mutex;
use std::vec::Vec;

use crate::hil::{BoardPower, CascadeIrq, ClockInterface, InterruptDispatch, PinMux};
use crate::registers::{BankRegisters, Reg};

/// Each test thread is a core whose interrupts are masked while it is inside
/// a critical section. Interrupts raised while masked are delivered, in
/// order, when the outermost critical section ends.
struct SimulatedCore;

critical_section::set_impl!(SimulatedCore);

std::thread_local! {
    static MASK_DEPTH: Cell<usize> = Cell::new(0);
    static PENDING: RefCell<Vec<Box<dyn FnOnce()>>> = RefCell::new(Vec::new());
}

unsafe impl critical_section::Impl for SimulatedCore {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        MASK_DEPTH.with(|depth| depth.set(depth.get() + 1));
    }

    unsafe fn release(_token: critical_section::RawRestoreState) {
        let depth = MASK_DEPTH.with(|depth| {
            depth.set(depth.get() - 1);
            depth.get()
        });
        if depth == 0 {
            deliver_pending();
        }
    }
}

fn deliver_pending() {
    loop {
        let next = PENDING.with(|pending| {
            let mut pending = pending.borrow_mut();
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        });
        match next {
            Some(handler) => handler(),
            None => break,
        }
    }
}

/// Raise an interrupt on the current core. `handler` runs immediately, nested
/// in whatever the core is doing, unless interrupts are masked.
pub(crate) fn interrupt(handler: impl FnOnce() + 'static) {
    if interrupts_enabled() {
        handler();
    } else {
        PENDING.with(|pending| pending.borrow_mut().push(Box::new(handler)));
    }
}

pub(crate) fn interrupts_enabled() -> bool {
    MASK_DEPTH.with(|depth| depth.get() == 0)
}

/// A zeroed, leaked block of `len` words standing in for a register window.
pub(crate) fn leak_words(len: usize) -> *mut u32 {
    Box::leak(vec![0u32; len].into_boxed_slice()).as_mut_ptr()
}

/// Word `index` of a block returned by [`leak_words`].
pub(crate) fn word(base: *mut u32, index: usize) -> u32 {
    unsafe { base.add(index).read_volatile() }
}

const BANK_WORDS: usize = Reg::LevelSync.offset() / 4 + 1;

/// A bank with a behavioural model of the pad and the interrupt status.
///
/// `ExtPort` reads back the data register for outputs and the simulated pad
/// for inputs. Writing `Eoi` clears the status of edge-triggered pins.
/// Status bits are only set by [`FakeRegisters::raise`]. Every write is
/// recorded.
pub(crate) struct FakeRegisters {
    words: [AtomicU32; BANK_WORDS],
    pad: AtomicU32,
    writes: Mutex<Vec<(Reg, u32)>>,
}

impl FakeRegisters {
    pub(crate) fn new() -> FakeRegisters {
        FakeRegisters {
            words: core::array::from_fn(|_| AtomicU32::new(0)),
            pad: AtomicU32::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    fn slot(&self, reg: Reg) -> &AtomicU32 {
        &self.words[reg.offset() / 4]
    }

    /// Drive the simulated pad of pin `offset`.
    pub(crate) fn set_pad_bit(&self, offset: u32, high: bool) {
        if high {
            self.pad.fetch_or(1 << offset, Ordering::SeqCst);
        } else {
            self.pad.fetch_and(!(1 << offset), Ordering::SeqCst);
        }
    }

    /// Latch an interrupt on the pins in `bits`.
    pub(crate) fn raise(&self, bits: u32) {
        self.slot(Reg::RawIntStatus).fetch_or(bits, Ordering::SeqCst);
        self.slot(Reg::IntStatus).fetch_or(bits, Ordering::SeqCst);
    }

    /// Stored value of `reg`, bypassing the model.
    pub(crate) fn peek(&self, reg: Reg) -> u32 {
        self.slot(reg).load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> Vec<(Reg, u32)> {
        self.writes.lock().unwrap().clone()
    }

    pub(crate) fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl BankRegisters for FakeRegisters {
    fn read(&self, reg: Reg) -> u32 {
        assert!(reg.is_readable(), "read of write-only register {:?}", reg);
        match reg {
            Reg::ExtPort => {
                let ddr = self.peek(Reg::Direction);
                (self.peek(Reg::PortData) & ddr) | (self.pad.load(Ordering::SeqCst) & !ddr)
            }
            _ => self.peek(reg),
        }
    }

    fn write(&self, reg: Reg, value: u32) {
        assert!(reg.is_writable(), "write of read-only register {:?}", reg);
        self.writes.lock().unwrap().push((reg, value));
        match reg {
            Reg::Eoi => {
                let clear = !(value & self.peek(Reg::IntTypeLevel));
                self.slot(Reg::IntStatus).fetch_and(clear, Ordering::SeqCst);
                self.slot(Reg::RawIntStatus).fetch_and(clear, Ordering::SeqCst);
            }
            _ => self.slot(reg).store(value, Ordering::SeqCst),
        }
    }
}

/// A bank clock that counts transitions.
pub(crate) struct FakeClock {
    enabled: AtomicBool,
    enables: AtomicUsize,
    disables: AtomicUsize,
}

impl FakeClock {
    pub(crate) const fn new() -> FakeClock {
        FakeClock {
            enabled: AtomicBool::new(false),
            enables: AtomicUsize::new(0),
            disables: AtomicUsize::new(0),
        }
    }

    pub(crate) fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub(crate) fn disables(&self) -> usize {
        self.disables.load(Ordering::SeqCst)
    }
}

impl ClockInterface for FakeClock {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.enables.fetch_add(1, Ordering::SeqCst);
        self.enabled.store(true, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disables.fetch_add(1, Ordering::SeqCst);
        self.enabled.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Enter(u32),
    Exit(u32),
    Dispatch(u32),
    SuspendBoard,
    ResumeBoard,
}

type Hook = Box<dyn Fn(u32) + Send + Sync>;

/// Parent interrupt controller and interrupt framework in one, recording
/// every call in order.
pub(crate) struct RecordingIrq {
    events: Mutex<Vec<Event>>,
    hook: Option<Hook>,
}

impl RecordingIrq {
    pub(crate) fn new() -> RecordingIrq {
        RecordingIrq {
            events: Mutex::new(Vec::new()),
            hook: None,
        }
    }

    /// Also run `hook` from every dispatched handler.
    pub(crate) fn with_hook(hook: impl Fn(u32) + Send + Sync + 'static) -> RecordingIrq {
        RecordingIrq {
            events: Mutex::new(Vec::new()),
            hook: Some(Box::new(hook)),
        }
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl CascadeIrq for RecordingIrq {
    fn chained_enter(&self, cascade_irq: u32) {
        self.push(Event::Enter(cascade_irq));
    }

    fn chained_exit(&self, cascade_irq: u32) {
        self.push(Event::Exit(cascade_irq));
    }
}

impl InterruptDispatch for RecordingIrq {
    fn handle_irq(&self, irq: u32) {
        self.push(Event::Dispatch(irq));
        if let Some(hook) = &self.hook {
            hook(irq);
        }
    }
}

impl BoardPower for RecordingIrq {
    fn suspend_board(&self) {
        self.push(Event::SuspendBoard);
    }

    fn resume_board(&self) {
        self.push(Event::ResumeBoard);
    }
}

/// Records the pins switched to their GPIO function.
pub(crate) struct RecordingPinMux {
    pins: Mutex<Vec<u32>>,
}

impl RecordingPinMux {
    pub(crate) fn new() -> RecordingPinMux {
        RecordingPinMux {
            pins: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn pins(&self) -> Vec<u32> {
        self.pins.lock().unwrap().clone()
    }
}

impl PinMux for RecordingPinMux {
    fn set_gpio_mode(&self, pin: u32) {
        self.pins.lock().unwrap().push(pin);
    }
}
