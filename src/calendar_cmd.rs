// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use moonphase::windows_between;

use crate::cli::CalendarArgs;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// List the phase windows covering the requested span.
pub fn run(args: CalendarArgs) -> Result<()> {
    let from = args.from.unwrap_or_else(Utc::now);
    let to = from
        .checked_add_signed(chrono::Duration::days(i64::from(args.days)))
        .with_context(|| format!("{} days after {from} is out of range", args.days))?;

    let windows = windows_between(from, to).context("failed to compute phase windows")?;
    info!(n = windows.len(), %from, %to, "phase windows computed");

    for window in &windows {
        println!(
            "{:<16} {}  to  {}",
            window.phase,
            window.start.format(TIME_FORMAT),
            window.end.format(TIME_FORMAT)
        );
    }
    Ok(())
}
