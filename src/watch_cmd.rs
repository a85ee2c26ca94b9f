// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use moonphase::{RefreshConfig, Refresher, SystemClock};

use crate::cli::WatchArgs;

/// Print a reading now and after every interval.
pub fn run(args: WatchArgs) -> Result<()> {
    let config = RefreshConfig::new(Duration::from_secs(args.interval))
        .context("invalid refresh interval")?;
    let (tx, rx) = mpsc::channel();
    let handle = Refresher::new(SystemClock, config).spawn(tx);
    info!(interval_secs = args.interval, ticks = ?args.ticks, "watching moon phase");

    let mut delivered = 0_u64;
    for reading in rx.iter() {
        println!("{reading}");
        delivered += 1;
        if args.ticks.is_some_and(|ticks| delivered >= ticks) {
            break;
        }
    }

    handle.cancel();
    info!(delivered, "stopped watching");
    Ok(())
}
