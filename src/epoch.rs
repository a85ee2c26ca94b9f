// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference new moon and synodic month.
//!
//! Every phase computation in this crate is a signed distance, in days, from
//! a single known New Moon:
//!
//! | Constant | Value |
//! |----------|-------|
//! | [`REFERENCE_NEW_MOON_UNIX`] | 2000-01-06 18:14:00 UTC (`947 182 440` s) |
//! | [`SYNODIC_MONTH`] | 29.530 59 days |
//!
//! The distance is taken on the civil UTC axis. No ΔT or leap-second
//! correction is applied: both endpoints are wall-clock readings, so the
//! corrections would cancel to well below the resolution of the phase bands.

use chrono::{DateTime, Utc};
use qtty::*;

/// Reference New Moon, 2000-01-06 18:14:00 UTC, as seconds since the Unix epoch.
pub const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

/// Mean length of the synodic month (new moon to new moon).
pub const SYNODIC_MONTH: Days = Days::new(29.530_59);

const NANOS_PER_SECOND: f64 = 1e9;
const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// The reference New Moon as a `chrono::DateTime<Utc>`.
#[inline]
pub fn reference_new_moon() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(REFERENCE_NEW_MOON_UNIX)
}

/// Signed, fractional days elapsed between the reference New Moon and `now`.
///
/// Negative for instants before the reference. Sub-second precision is kept.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use moonphase::days_since_reference;
/// use qtty::Days;
///
/// let next_day = Utc.with_ymd_and_hms(2000, 1, 7, 18, 14, 0).unwrap();
/// assert!((days_since_reference(next_day) - Days::new(1.0)).abs() < Days::new(1e-12));
/// ```
pub fn days_since_reference(now: DateTime<Utc>) -> Days {
    let delta = now - reference_new_moon();
    match delta.num_nanoseconds() {
        Some(ns) => Days::new(ns as f64 / NANOS_PER_DAY),
        // more than ~292 years away from the reference
        None => {
            let seconds =
                delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / NANOS_PER_SECOND;
            Days::new(seconds / SECONDS_PER_DAY)
        }
    }
}

/// Inverse of [`days_since_reference`].
///
/// Returns `None` if the instant falls outside chrono's representable range
/// or `days` is not finite.
pub fn instant_after_reference(days: Days) -> Option<DateTime<Utc>> {
    let seconds = days.to::<Second>().value();
    if !seconds.is_finite() {
        return None;
    }
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * NANOS_PER_SECOND) as u32;
    if secs.abs() >= i64::MAX as f64 {
        return None;
    }
    let secs = (secs as i64).checked_add(REFERENCE_NEW_MOON_UNIX)?;
    DateTime::<Utc>::from_timestamp(secs, nanos.min(999_999_999))
}

/// Serialise a [`Days`] field as a bare `f64`.
#[cfg(feature = "serde")]
pub(crate) mod days_serde {
    use qtty::Days;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(days: &Days, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(days.value())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Days, D::Error> {
        f64::deserialize(deserializer).map(Days::new)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
