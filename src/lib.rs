// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moon Phase Module
//!
//! This crate maps a civil instant to one of eight named lunar phases,
//! measured from a known New Moon (2000-01-06 18:14 UTC) with a mean
//! synodic month of 29.530 59 days.
//!
//! # Core types
//!
//! - [`compute_phase`] — instant → [`LunarPhase`], pure and total.
//! - [`read_phase`] — the same calculation returning a [`PhaseReading`].
//! - [`PhaseFraction`] — normalised position in the cycle, always in `[0, 1)`.
//! - [`LunarPhase`] — the eight named phases.
//! - [`PhaseBand`] / [`PHASE_BANDS`] — the half-open partition of `[0, 1)`.
//! - [`PhaseWindow`] — the UTC span during which one phase holds.
//! - [`Refresher`] — periodic re-computation with cancellation.
//!
//! # Phases
//!
//! | Fraction | Phase |
//! |----------|-------|
//! | `[0.00, 0.03)` | New Moon |
//! | `[0.03, 0.25)` | Waxing Crescent |
//! | `[0.25, 0.28)` | First Quarter |
//! | `[0.28, 0.53)` | Waxing Gibbous |
//! | `[0.53, 0.56)` | Full Moon |
//! | `[0.56, 0.78)` | Waning Gibbous |
//! | `[0.78, 0.81)` | Last Quarter |
//! | `[0.81, 1.00)` | Waning Crescent |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use moonphase::{compute_phase, read_phase, LunarPhase};
//!
//! let at = Utc.with_ymd_and_hms(2000, 1, 22, 18, 0, 0).unwrap();
//! assert_eq!(compute_phase(at), LunarPhase::FullMoon);
//!
//! let reading = read_phase(at);
//! assert!((0.53..0.56).contains(&reading.fraction.value()));
//! ```

mod calculator;
mod epoch;
mod error;
mod fraction;
mod phase;
mod refresh;
mod window;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calculator::{compute_phase, read_phase, PhaseReading};
pub use epoch::{
    days_since_reference, instant_after_reference, reference_new_moon, REFERENCE_NEW_MOON_UNIX,
    SYNODIC_MONTH,
};
pub use error::{Error, Result};
pub use fraction::PhaseFraction;
pub use phase::{LunarPhase, PhaseBand, PHASE_BANDS};
pub use refresh::{
    Clock, FixedClock, RefreshConfig, RefreshHandle, Refresher, SystemClock,
    DEFAULT_REFRESH_INTERVAL,
};
pub use window::{next_transition, windows_between, PhaseWindow};
