// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Bank tables of the supported SoCs.
//!
//! | SoC     | Banks            | Pull layout            |
//! |---------|------------------|------------------------|
//! | RK30xx  | 0-4, 6 (16 pins) | [`Rk30Pull`]           |
//! | RK3066B | 0-3              | none ([`NoPull`])      |
//! | RK3188  | 0-3              | [`Rk3188Pull`]         |
//! | RK292x  | 0-3              | [`Rk30Pull`]           |
//!
//! [`Rk30Pull`]: crate::pull::Rk30Pull
//! [`Rk3188Pull`]: crate::pull::Rk3188Pull
//! [`NoPull`]: crate::pull::NoPull

use crate::bank::{BankConfig, PINS_PER_BANK};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocVariant {
    Rk30,
    Rk3066b,
    Rk3188,
    Rk2928,
}

/// Id and size of a bank. The cascade interrupt is board wiring and is
/// added with [`BankLayout::with_cascade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankLayout {
    pub id: u8,
    pub ngpio: u8,
}

impl BankLayout {
    pub const fn with_cascade(self, cascade_irq: u32) -> BankConfig {
        BankConfig {
            id: self.id,
            ngpio: self.ngpio,
            cascade_irq,
        }
    }
}

const fn full(id: u8) -> BankLayout {
    BankLayout {
        id,
        ngpio: PINS_PER_BANK as u8,
    }
}

const RK30_BANKS: [BankLayout; 6] = [
    full(0),
    full(1),
    full(2),
    full(3),
    full(4),
    BankLayout { id: 6, ngpio: 16 },
];

const FOUR_BANKS: [BankLayout; 4] = [full(0), full(1), full(2), full(3)];

impl SocVariant {
    pub const fn banks(self) -> &'static [BankLayout] {
        match self {
            SocVariant::Rk30 => &RK30_BANKS,
            SocVariant::Rk3066b | SocVariant::Rk3188 | SocVariant::Rk2928 => &FOUR_BANKS,
        }
    }
}
