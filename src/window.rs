// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil-time spans during which a single phase holds.
//!
//! A [`PhaseWindow`] maps one [`PhaseBand`](crate::PhaseBand) of one
//! particular cycle back onto the UTC axis. Windows are half-open
//! `[start, end)`, and consecutive windows share their boundary instant, so a
//! sequence produced by [`PhaseWindow::following`] or [`windows_between`]
//! covers time without gaps.

use chrono::{DateTime, Utc};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::epoch::{days_since_reference, instant_after_reference, SYNODIC_MONTH};
use crate::error::{Error, Result};
use crate::fraction::PhaseFraction;
use crate::phase::LunarPhase;

/// The UTC span of one phase within one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseWindow {
    pub phase: LunarPhase,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Days from the reference New Moon to the New Moon opening this cycle.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "cycle_start_days", with = "crate::epoch::days_serde")
    )]
    cycle_start: Days,
}

impl PhaseWindow {
    /// The window of the phase holding at `now`.
    ///
    /// The result always satisfies `start <= now < end`.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use moonphase::{compute_phase, PhaseWindow};
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    /// let window = PhaseWindow::containing(now).unwrap();
    /// assert!(window.contains(now));
    /// assert_eq!(window.phase, compute_phase(now));
    /// ```
    pub fn containing(now: DateTime<Utc>) -> Result<Self> {
        let days = days_since_reference(now);
        let fraction = PhaseFraction::from_days(days);
        let phase = LunarPhase::from(fraction);
        let mut window = Self::in_cycle(days - fraction.age(), phase)?;

        // Float rounding can push a boundary a few nanoseconds past `now`.
        if window.start > now {
            window.start = now;
        }
        if window.end <= now {
            window.end = now + chrono::Duration::nanoseconds(1);
        }
        Ok(window)
    }

    /// The window that starts where this one ends.
    pub fn following(&self) -> Result<Self> {
        let cycle_start = match self.phase {
            LunarPhase::WaningCrescent => self.cycle_start + SYNODIC_MONTH,
            _ => self.cycle_start,
        };
        Self::in_cycle(cycle_start, self.phase.next())
    }

    fn in_cycle(cycle_start: Days, phase: LunarPhase) -> Result<Self> {
        let band = phase.band();
        let start_days = cycle_start + Days::new(band.start * SYNODIC_MONTH.value());
        let end_days = cycle_start + Days::new(band.end * SYNODIC_MONTH.value());
        Ok(Self {
            phase,
            start: to_instant(start_days)?,
            end: to_instant(end_days)?,
            cycle_start,
        })
    }

    /// `start <= instant < end`.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Length of the window.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Length of the window in days.
    pub fn duration_days(&self) -> Days {
        const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
        const SECONDS_PER_DAY: f64 = 86_400.0;

        let duration = self.duration();
        match duration.num_nanoseconds() {
            Some(ns) => Days::new(ns as f64 / NANOS_PER_DAY),
            None => Days::new(duration.num_seconds() as f64 / SECONDS_PER_DAY),
        }
    }

    /// The part of this window inside `[start, end)`, if any.
    ///
    /// Touching endpoints do not overlap: the result is `None` when the
    /// ranges only share a boundary.
    pub fn clip(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        let start = self.start.max(start);
        let end = self.end.min(end);
        if start < end {
            Some(Self { start, end, ..*self })
        } else {
            None
        }
    }
}

impl fmt::Display for PhaseWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} to {}", self.phase, self.start, self.end)
    }
}

/// The window following the one that holds at `now`.
#[inline]
pub fn next_transition(now: DateTime<Utc>) -> Result<PhaseWindow> {
    PhaseWindow::containing(now)?.following()
}

/// Consecutive phase windows covering `[start, end)`.
///
/// The first and last windows are clipped to the range. An empty or inverted
/// range yields an empty vector.
pub fn windows_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<PhaseWindow>> {
    let mut windows = Vec::new();
    if start >= end {
        return Ok(windows);
    }

    let mut current = PhaseWindow::containing(start)?;
    loop {
        if let Some(clipped) = current.clip(start, end) {
            windows.push(clipped);
        }
        if current.end >= end {
            break;
        }
        current = current.following()?;
    }
    Ok(windows)
}

fn to_instant(days: Days) -> Result<DateTime<Utc>> {
    instant_after_reference(days).ok_or(Error::InstantOutOfRange { days })
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
