// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Normalised position within the lunar cycle.
//!
//! [`PhaseFraction`] wraps an `f64` that is guaranteed to lie in `[0, 1)`:
//! `0` is the reference New Moon, `0.5` is roughly Full Moon, and values
//! approaching `1` are the last hours before the next New Moon.

use chrono::{DateTime, Utc};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::epoch::{days_since_reference, SYNODIC_MONTH};

/// How far the moon is through its synodic cycle, in `[0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct PhaseFraction(f64);

impl PhaseFraction {
    /// The fraction at the reference New Moon.
    pub const ZERO: Self = Self(0.0);

    /// Fraction of the cycle reached `days` after the reference New Moon.
    ///
    /// Uses the truncating remainder (sign follows the dividend), so instants
    /// before the reference produce a negative intermediate that is shifted
    /// into range by adding one cycle. Non-finite input maps to [`Self::ZERO`].
    pub fn from_days(days: Days) -> Self {
        let cycle = SYNODIC_MONTH.value();
        let raw = (days.value() % cycle) / cycle;
        Self::normalize(raw)
    }

    /// Fraction of the cycle at the civil instant `now`.
    #[inline]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::from_days(days_since_reference(now))
    }

    /// Fold a raw ratio in `(-1, 1)` into `[0, 1)`.
    ///
    /// A tiny negative ratio can round to exactly `1.0` once shifted; that
    /// lands on the next New Moon, so it becomes `0.0`.
    fn normalize(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::ZERO;
        }
        let shifted = if raw < 0.0 { raw + 1.0 } else { raw };
        if shifted >= 1.0 {
            Self::ZERO
        } else {
            // -0.0 compares equal to 0.0 but prints as "-0"
            Self(shifted + 0.0)
        }
    }

    /// The underlying scalar in `[0, 1)`.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Days elapsed since the most recent New Moon.
    #[inline]
    pub fn age(&self) -> Days {
        Days::new(self.0 * SYNODIC_MONTH.value())
    }

    /// Days remaining until the next New Moon.
    #[inline]
    pub fn until_new_moon(&self) -> Days {
        SYNODIC_MONTH - self.age()
    }
}

impl std::fmt::Display for PhaseFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<PhaseFraction> for f64 {
    #[inline]
    fn from(fraction: PhaseFraction) -> Self {
        fraction.0
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for PhaseFraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PhaseFraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        if (0.0..1.0).contains(&v) {
            Ok(Self(v))
        } else {
            Err(serde::de::Error::custom(format!(
                "phase fraction {v} outside [0, 1)"
            )))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
