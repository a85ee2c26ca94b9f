// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The eight named lunar phases and the band table that classifies a
//! [`PhaseFraction`] into one of them.
//!
//! | Band | Phase |
//! |------|-------|
//! | `[0.00, 0.03)` | [`LunarPhase::NewMoon`] |
//! | `[0.03, 0.25)` | [`LunarPhase::WaxingCrescent`] |
//! | `[0.25, 0.28)` | [`LunarPhase::FirstQuarter`] |
//! | `[0.28, 0.53)` | [`LunarPhase::WaxingGibbous`] |
//! | `[0.53, 0.56)` | [`LunarPhase::FullMoon`] |
//! | `[0.56, 0.78)` | [`LunarPhase::WaningGibbous`] |
//! | `[0.78, 0.81)` | [`LunarPhase::LastQuarter`] |
//! | `[0.81, 1.00)` | [`LunarPhase::WaningCrescent`] |
//!
//! The bounds are a display convention rather than an ephemeris result and
//! are kept exactly as listed.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fraction::PhaseFraction;

/// One of the eight conventional named subdivisions of the lunar cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhase {
    /// All phases in cycle order, starting at New Moon.
    pub const ALL: [LunarPhase; 8] = [
        LunarPhase::NewMoon,
        LunarPhase::WaxingCrescent,
        LunarPhase::FirstQuarter,
        LunarPhase::WaxingGibbous,
        LunarPhase::FullMoon,
        LunarPhase::WaningGibbous,
        LunarPhase::LastQuarter,
        LunarPhase::WaningCrescent,
    ];

    /// Human-readable name, e.g. `"Waxing Gibbous"`.
    pub const fn name(self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "New Moon",
            LunarPhase::WaxingCrescent => "Waxing Crescent",
            LunarPhase::FirstQuarter => "First Quarter",
            LunarPhase::WaxingGibbous => "Waxing Gibbous",
            LunarPhase::FullMoon => "Full Moon",
            LunarPhase::WaningGibbous => "Waning Gibbous",
            LunarPhase::LastQuarter => "Last Quarter",
            LunarPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Classify a raw fraction of the cycle.
    ///
    /// Bands are half-open and scanned in ascending order. Anything outside
    /// `[0, 1)`, NaN included, is reported as [`LunarPhase::NewMoon`].
    ///
    /// ```
    /// use moonphase::LunarPhase;
    ///
    /// assert_eq!(LunarPhase::from_fraction(0.54), LunarPhase::FullMoon);
    /// assert_eq!(LunarPhase::from_fraction(0.25), LunarPhase::FirstQuarter);
    /// assert_eq!(LunarPhase::from_fraction(1.5), LunarPhase::NewMoon);
    /// ```
    pub fn from_fraction(fraction: f64) -> Self {
        PHASE_BANDS
            .iter()
            .find(|band| band.contains(fraction))
            .map_or(LunarPhase::NewMoon, |band| band.phase)
    }

    /// The band of the cycle this phase occupies.
    pub fn band(self) -> PhaseBand {
        PHASE_BANDS[self.index()]
    }

    /// Position in [`LunarPhase::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one, wrapping to New Moon.
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Illuminated fraction growing (strictly between New and Full Moon).
    pub const fn is_waxing(self) -> bool {
        matches!(
            self,
            LunarPhase::WaxingCrescent | LunarPhase::FirstQuarter | LunarPhase::WaxingGibbous
        )
    }

    /// Illuminated fraction shrinking (strictly between Full and New Moon).
    pub const fn is_waning(self) -> bool {
        matches!(
            self,
            LunarPhase::WaningGibbous | LunarPhase::LastQuarter | LunarPhase::WaningCrescent
        )
    }
}

impl From<PhaseFraction> for LunarPhase {
    #[inline]
    fn from(fraction: PhaseFraction) -> Self {
        Self::from_fraction(fraction.value())
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Band table
// ═══════════════════════════════════════════════════════════════════════════

/// Half-open slice `[start, end)` of the cycle assigned to one phase.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseBand {
    pub start: f64,
    pub end: f64,
    pub phase: LunarPhase,
}

impl PhaseBand {
    const fn new(start: f64, end: f64, phase: LunarPhase) -> Self {
        Self { start, end, phase }
    }

    /// `start <= fraction < end`.
    #[inline]
    pub fn contains(&self, fraction: f64) -> bool {
        self.start <= fraction && fraction < self.end
    }

    /// Width of the band as a fraction of the cycle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for PhaseBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}) {}", self.start, self.end, self.phase)
    }
}

/// The partition of `[0, 1)`, in cycle order.
pub const PHASE_BANDS: [PhaseBand; 8] = [
    PhaseBand::new(0.00, 0.03, LunarPhase::NewMoon),
    PhaseBand::new(0.03, 0.25, LunarPhase::WaxingCrescent),
    PhaseBand::new(0.25, 0.28, LunarPhase::FirstQuarter),
    PhaseBand::new(0.28, 0.53, LunarPhase::WaxingGibbous),
    PhaseBand::new(0.53, 0.56, LunarPhase::FullMoon),
    PhaseBand::new(0.56, 0.78, LunarPhase::WaningGibbous),
    PhaseBand::new(0.78, 0.81, LunarPhase::LastQuarter),
    PhaseBand::new(0.81, 1.00, LunarPhase::WaningCrescent),
];

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
