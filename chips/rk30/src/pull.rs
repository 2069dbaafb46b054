// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Pull-up / pull-down configuration.
//!
//! Pull resistors are not configured in the GPIO bank but in the general
//! register file (GRF), and on RK3188 partly in the PMU. The layout differs
//! per SoC; the layout in use is chosen once, when the controller is built,
//! through [`PullLayout`].
//!
//! All pull registers use the write-enable mask convention: the upper 16 bits
//! of a write select which of the lower 16 bits take effect. Every update is
//! therefore a single store that cannot clobber the fields of other pins,
//! and needs neither a read nor the bank lock.

use log::warn;

use crate::errorcode::GpioError;
use crate::registers::PullRegisters;
use crate::static_ref::StaticRef;

/// Pull resistor configuration of a pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// No pull resistor, the pad floats.
    Disabled,
    /// Pull enabled in the direction fixed by the pad type.
    PadDefault,
    Up,
    Down,
    /// Weak keeper that holds the last driven level.
    BusKeeper,
}

/// A pull register layout.
pub trait PullControl {
    /// Configure the pull of pin `offset` of bank `bank`.
    fn set_pull(&self, bank: u8, offset: u32, pull: Pull) -> Result<(), GpioError>;
}

/// Build a masked write updating the `mask`-wide field at `shift` to
/// `value`. The field must lie in the lower 16 bits.
const fn masked_field(mask: u32, shift: u32, value: u32) -> u32 {
    (mask << (16 + shift)) | ((value & mask) << shift)
}

/// RK30xx and RK292x: one bit per pin, 16 pins per GRF word, two words per
/// bank. A set bit disables the pull; a clear bit enables it in the
/// direction the pad type dictates, so up and down cannot be chosen.
pub struct Rk30Pull {
    grf: StaticRef<PullRegisters>,
}

impl Rk30Pull {
    /// `grf` points at `GRF_GPIO0L_PULL`.
    pub const fn new(grf: StaticRef<PullRegisters>) -> Rk30Pull {
        Rk30Pull { grf }
    }
}

impl PullControl for Rk30Pull {
    fn set_pull(&self, bank: u8, offset: u32, pull: Pull) -> Result<(), GpioError> {
        let disable = match pull {
            Pull::Disabled => 1,
            Pull::PadDefault => 0,
            Pull::Up | Pull::Down | Pull::BusKeeper => return Err(GpioError::UnsupportedPull),
        };
        let index = bank as usize * 2 + (offset / 16) as usize;
        self.grf
            .write_word(index, masked_field(0b1, offset % 16, disable))
    }
}

/// Number of bank 0 pins whose pulls are in the PMU on RK3188.
const RK3188_PMU_PULL_PINS: u32 = 12;

/// RK3188: two bits per pin, eight pins per word.
///
/// The first 12 pins of bank 0 are in the always-on PMU domain. Their fields
/// are in pin order. Every other pin is in the GRF, where the fields of each
/// 8-pin group are stored in reverse order.
pub struct Rk3188Pull {
    pmu: StaticRef<PullRegisters>,
    grf: StaticRef<PullRegisters>,
}

impl Rk3188Pull {
    /// `pmu` points at `PMU_GPIO0A_PULL`. `grf` points one word before
    /// `GRF_GPIO0B_PULL`, where the (nonexistent) GRF word for pins
    /// GPIO0_A0..A7 would be.
    pub const fn new(pmu: StaticRef<PullRegisters>, grf: StaticRef<PullRegisters>) -> Rk3188Pull {
        Rk3188Pull { pmu, grf }
    }
}

impl PullControl for Rk3188Pull {
    fn set_pull(&self, bank: u8, offset: u32, pull: Pull) -> Result<(), GpioError> {
        let value = match pull {
            Pull::Disabled => 0b00,
            Pull::Up => 0b01,
            Pull::Down => 0b10,
            Pull::BusKeeper => 0b11,
            Pull::PadDefault => return Err(GpioError::UnsupportedPull),
        };

        if bank == 0 && offset < RK3188_PMU_PULL_PINS {
            let shift = (offset % 8) * 2;
            self.pmu
                .write_word((offset / 8) as usize, masked_field(0b11, shift, value))
        } else {
            let index = bank as usize * 4 + (offset / 8) as usize;
            let shift = (7 - (offset % 8)) * 2;
            self.grf.write_word(index, masked_field(0b11, shift, value))
        }
    }
}

/// SoCs whose pull configuration is not reachable from this driver
/// (RK3066B).
pub struct NoPull;

impl PullControl for NoPull {
    fn set_pull(&self, _bank: u8, _offset: u32, _pull: Pull) -> Result<(), GpioError> {
        Err(GpioError::UnsupportedPull)
    }
}

/// The pull layout of the SoC, selected at construction.
pub enum PullLayout {
    Rk30(Rk30Pull),
    Rk3188(Rk3188Pull),
    None(NoPull),
}

// SAFETY: pull registers are only ever written with a single masked store,
// which the hardware applies atomically to the selected field.
unsafe impl Sync for PullLayout {}
unsafe impl Send for PullLayout {}

impl PullLayout {
    /// Whether every pin of bank `id` has its pull field inside the layout's
    /// register window.
    pub fn covers_bank(&self, id: u8) -> bool {
        let words_per_bank = match self {
            PullLayout::Rk30(_) => 2,
            PullLayout::Rk3188(_) => 4,
            PullLayout::None(_) => return true,
        };
        (id as usize + 1) * words_per_bank <= PullRegisters::WORDS
    }
}

impl PullControl for PullLayout {
    fn set_pull(&self, bank: u8, offset: u32, pull: Pull) -> Result<(), GpioError> {
        let result = match self {
            PullLayout::Rk30(layout) => layout.set_pull(bank, offset, pull),
            PullLayout::Rk3188(layout) => layout.set_pull(bank, offset, pull),
            PullLayout::None(layout) => layout.set_pull(bank, offset, pull),
        };
        if result.is_err() {
            warn!("gpio{}: pull {:?} unsupported for pin {}", bank, pull, offset);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{leak_words, word};

    fn block() -> (StaticRef<PullRegisters>, *mut u32) {
        let words = leak_words(32);
        (unsafe { StaticRef::new(words as *const PullRegisters) }, words)
    }

    #[test]
    fn pmu_region_uses_pin_order() {
        let (pmu, pmu_words) = block();
        let (grf, grf_words) = block();
        let layout = Rk3188Pull::new(pmu, grf);

        layout.set_pull(0, 3, Pull::Up).unwrap();
        assert_eq!(word(pmu_words, 0), (0x3 << (16 + 6)) | (0b01 << 6));

        layout.set_pull(0, 11, Pull::Down).unwrap();
        assert_eq!(word(pmu_words, 1), (0x3 << (16 + 6)) | (0b10 << 6));

        // Nothing leaked into the GRF.
        assert!((0..32).all(|i| word(grf_words, i) == 0));
    }

    #[test]
    fn grf_region_reverses_each_group() {
        let (pmu, pmu_words) = block();
        let (grf, grf_words) = block();
        let layout = Rk3188Pull::new(pmu, grf);

        // First bank 0 pin outside the PMU: GPIO0_B4, word GRF_GPIO0B_PULL.
        layout.set_pull(0, 12, Pull::BusKeeper).unwrap();
        assert_eq!(word(grf_words, 1), (0x3 << (16 + 6)) | (0b11 << 6));

        layout.set_pull(1, 0, Pull::Up).unwrap();
        assert_eq!(word(grf_words, 4), (0x3 << 30) | (0b01 << 14));

        layout.set_pull(2, 31, Pull::Disabled).unwrap();
        assert_eq!(word(grf_words, 11), 0x3 << 16);

        assert!((0..32).all(|i| word(pmu_words, i) == 0));
    }

    #[test]
    fn rk3188_has_no_pad_default() {
        let (pmu, pmu_words) = block();
        let (grf, grf_words) = block();
        let layout = PullLayout::Rk3188(Rk3188Pull::new(pmu, grf));
        assert_eq!(
            layout.set_pull(1, 5, Pull::PadDefault),
            Err(GpioError::UnsupportedPull)
        );
        assert!((0..32).all(|i| word(pmu_words, i) == 0 && word(grf_words, i) == 0));
    }

    #[test]
    fn rk30_single_bit_layout() {
        let (grf, words) = block();
        let layout = PullLayout::Rk30(Rk30Pull::new(grf));

        layout.set_pull(1, 17, Pull::Disabled).unwrap();
        assert_eq!(word(words, 3), (1 << 17) | (1 << 1));

        layout.set_pull(1, 17, Pull::PadDefault).unwrap();
        assert_eq!(word(words, 3), 1 << 17);

        layout.set_pull(6, 15, Pull::Disabled).unwrap();
        assert_eq!(word(words, 12), (1 << 31) | (1 << 15));
    }

    #[test]
    fn rk30_cannot_choose_direction() {
        let (grf, words) = block();
        let layout = PullLayout::Rk30(Rk30Pull::new(grf));
        for pull in [Pull::Up, Pull::Down, Pull::BusKeeper] {
            assert_eq!(layout.set_pull(0, 0, pull), Err(GpioError::UnsupportedPull));
        }
        assert_eq!(word(words, 0), 0);
    }

    #[test]
    fn banks_past_the_window_are_rejected() {
        let (pmu, pmu_words) = block();
        let (grf, grf_words) = block();
        let layout = PullLayout::Rk3188(Rk3188Pull::new(pmu, grf));
        assert!(layout.covers_bank(7));
        assert!(!layout.covers_bank(8));
        assert_eq!(layout.set_pull(8, 1, Pull::Up), Err(GpioError::UnsupportedPull));
        layout.set_pull(7, 31, Pull::Up).unwrap();
        assert_eq!(word(grf_words, 31), 0x3 << 16 | 0b01);
        assert!((0..32).all(|i| word(pmu_words, i) == 0));

        let (grf, words) = block();
        let layout = PullLayout::Rk30(Rk30Pull::new(grf));
        assert!(layout.covers_bank(15));
        assert!(!layout.covers_bank(16));
        assert_eq!(
            layout.set_pull(16, 0, Pull::Disabled),
            Err(GpioError::UnsupportedPull)
        );
        assert!((0..32).all(|i| word(words, i) == 0));

        assert!(PullLayout::None(NoPull).covers_bank(u8::MAX));
    }

    #[test]
    fn no_pull_layout_rejects_everything() {
        let layout = PullLayout::None(NoPull);
        assert_eq!(
            layout.set_pull(0, 0, Pull::Disabled),
            Err(GpioError::UnsupportedPull)
        );
    }

    #[test]
    fn masked_field_only_touches_its_field() {
        assert_eq!(masked_field(0b11, 14, 0b111), (0x3 << 30) | (0b11 << 14));
        assert_eq!(masked_field(0b1, 0, 0), 1 << 16);
    }
}
