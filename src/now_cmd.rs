// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use anyhow::{Context, Result};
use tracing::info;

use moonphase::{next_transition, read_phase, Clock, SystemClock};

use crate::cli::NowArgs;

/// Print the phase at `--at`, or at the current instant.
pub fn run(args: NowArgs) -> Result<()> {
    let at = args.at.unwrap_or_else(|| SystemClock.now());
    let reading = read_phase(at);
    println!("{reading}");

    info!(
        instant = %reading.instant,
        fraction = reading.fraction.value(),
        age_days = reading.age().value(),
        "phase computed"
    );

    let next = next_transition(at).context("failed to locate the next phase change")?;
    info!(phase = %next.phase, start = %next.start, "next phase change");
    Ok(())
}
