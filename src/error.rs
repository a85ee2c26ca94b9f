// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the fallible parts of the crate.
//!
//! The phase calculation itself cannot fail; errors only arise when mapping
//! cycle positions back onto `chrono`'s finite time axis, or from invalid
//! refresh settings.

use qtty::Days;

/// Errors returned by `moonphase`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A refresh interval of zero would spin instead of wait.
    #[error("refresh interval must be greater than zero")]
    ZeroInterval,

    /// An instant `days` after the reference New Moon cannot be represented
    /// as a `chrono::DateTime<Utc>`.
    #[error("instant {days} after the reference new moon is out of range")]
    InstantOutOfRange {
        /// Offset from the reference New Moon.
        days: Days,
    },
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
