// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instant → phase.
//!
//! [`compute_phase`] is the whole calculation: days since the reference New
//! Moon, reduced modulo the synodic month, normalised into `[0, 1)` and
//! classified. [`read_phase`] runs the same steps and keeps the intermediate
//! values in a [`PhaseReading`].

use chrono::{DateTime, Utc};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::epoch::days_since_reference;
use crate::fraction::PhaseFraction;
use crate::phase::LunarPhase;

/// Named phase of the moon at `now`.
///
/// Pure and total: no allocation, no I/O, same answer for the same instant.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use moonphase::{compute_phase, LunarPhase};
///
/// let at = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
/// assert_eq!(compute_phase(at), LunarPhase::NewMoon);
/// ```
#[inline]
pub fn compute_phase(now: DateTime<Utc>) -> LunarPhase {
    PhaseFraction::at(now).into()
}

/// Full result of one phase calculation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseReading {
    /// Instant the reading was taken for.
    pub instant: DateTime<Utc>,
    /// Signed days since the reference New Moon.
    #[cfg_attr(feature = "serde", serde(with = "crate::epoch::days_serde"))]
    pub days_since_reference: Days,
    /// Position in the current cycle.
    pub fraction: PhaseFraction,
    /// Classified phase.
    pub phase: LunarPhase,
}

impl PhaseReading {
    /// Days elapsed since the most recent New Moon.
    #[inline]
    pub fn age(&self) -> Days {
        self.fraction.age()
    }
}

impl fmt::Display for PhaseReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The Moon is currently in the {} phase!", self.phase)
    }
}

/// Compute the phase at `now`, keeping every intermediate value.
pub fn read_phase(now: DateTime<Utc>) -> PhaseReading {
    let days = days_since_reference(now);
    let fraction = PhaseFraction::from_days(days);
    PhaseReading {
        instant: now,
        days_since_reference: days,
        fraction,
        phase: fraction.into(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::{reference_new_moon, SYNODIC_MONTH};
    use chrono::TimeZone;

    fn after_reference(days: f64) -> DateTime<Utc> {
        let millis = (days * 86_400_000.0).round() as i64;
        reference_new_moon() + chrono::Duration::milliseconds(millis)
    }

    #[test]
    fn reference_is_new_moon() {
        assert_eq!(compute_phase(reference_new_moon()), LunarPhase::NewMoon);
        assert_eq!(read_phase(reference_new_moon()).fraction, PhaseFraction::ZERO);
    }

    #[test]
    fn one_cycle_later_is_new_moon_again() {
        // 29.530 59 days is exactly 2 551 442 976 ms
        let later = reference_new_moon() + chrono::Duration::milliseconds(2_551_442_976);
        assert_eq!(later, after_reference(SYNODIC_MONTH.value()));
        let reading = read_phase(later);
        assert_eq!(reading.days_since_reference, SYNODIC_MONTH);
        assert_eq!(reading.fraction, PhaseFraction::ZERO);
        assert_eq!(reading.phase, LunarPhase::NewMoon);
        assert_eq!(compute_phase(later), LunarPhase::NewMoon);
    }

    #[test]
    fn one_cycle_later_plus_an_hour_is_new_moon() {
        let later = after_reference(SYNODIC_MONTH.value() + 1.0 / 24.0);
        assert_eq!(compute_phase(later), LunarPhase::NewMoon);
    }

    #[test]
    fn before_reference_lands_on_a_valid_phase() {
        // 10 days before the reference: 1 - 10/29.53 ≈ 0.661 → waning gibbous
        let earlier = after_reference(-10.0);
        let reading = read_phase(earlier);
        assert!(reading.days_since_reference < Days::new(0.0));
        assert!((0.0..1.0).contains(&reading.fraction.value()));
        assert_eq!(reading.phase, LunarPhase::WaningGibbous);
    }

    #[test]
    fn walks_through_every_phase_in_one_cycle() {
        let cycle = SYNODIC_MONTH.value();
        let samples = [0.02, 0.10, 0.26, 0.40, 0.54, 0.60, 0.79, 0.90];
        for (f, expected) in samples.into_iter().zip(LunarPhase::ALL) {
            assert_eq!(compute_phase(after_reference(f * cycle)), expected, "fraction {f}");
        }
    }

    #[test]
    fn deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap();
        assert_eq!(compute_phase(at), compute_phase(at));
        assert_eq!(read_phase(at), read_phase(at));
    }

    #[test]
    fn reading_matches_compute_phase() {
        let at = Utc.with_ymd_and_hms(2024, 4, 8, 18, 0, 0).unwrap();
        let reading = read_phase(at);
        assert_eq!(reading.instant, at);
        assert_eq!(reading.phase, compute_phase(at));
        assert!((reading.age() - reading.fraction.age()).abs() < Days::new(1e-12));
    }

    #[test]
    fn far_past_and_future_stay_total() {
        for at in [
            Utc.with_ymd_and_hms(1066, 10, 14, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2999, 12, 31, 23, 59, 59).unwrap(),
        ] {
            let reading = read_phase(at);
            assert!((0.0..1.0).contains(&reading.fraction.value()), "{at}");
        }
    }

    #[test]
    fn display_is_a_sentence() {
        let reading = read_phase(reference_new_moon());
        assert_eq!(
            reading.to_string(),
            "The Moon is currently in the New Moon phase!"
        );
    }
}
