// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Moon phase reporter.
#[derive(Parser)]
#[command(
    name = "moonphase",
    version,
    about = "Current moon phase from a reference new moon"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run (defaults to `now`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the phase once.
    Now(NowArgs),
    /// Re-print the phase on a fixed interval until interrupted.
    Watch(WatchArgs),
    /// List the phase windows over a span of days.
    Calendar(CalendarArgs),
}

/// Arguments for the `now` subcommand.
#[derive(clap::Args, Default)]
pub struct NowArgs {
    /// Instant to evaluate (RFC 3339) instead of the system clock.
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
pub struct WatchArgs {
    /// Seconds between refreshes.
    #[arg(short, long, default_value_t = 86_400, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Stop after this many readings.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub ticks: Option<u64>,
}

/// Arguments for the `calendar` subcommand.
#[derive(clap::Args)]
pub struct CalendarArgs {
    /// Start of the listing (RFC 3339); defaults to now.
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// Number of days to cover.
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=36_525))]
    pub days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["moonphase"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn now_parses_rfc3339_instant() {
        let cli = Cli::try_parse_from(["moonphase", "-v", "now", "--at", "2024-01-11T11:57:00Z"])
            .unwrap();
        let Some(Command::Now(args)) = cli.command else {
            panic!("expected now subcommand");
        };
        assert_eq!(args.at.unwrap().to_rfc3339(), "2024-01-11T11:57:00+00:00");
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn watch_defaults_to_one_day() {
        let cli = Cli::try_parse_from(["moonphase", "watch"]).unwrap();
        let Some(Command::Watch(args)) = cli.command else {
            panic!("expected watch subcommand");
        };
        assert_eq!(args.interval, 86_400);
        assert!(args.ticks.is_none());
    }

    #[test]
    fn watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["moonphase", "watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn calendar_rejects_bad_instant() {
        assert!(Cli::try_parse_from(["moonphase", "calendar", "--from", "yesterday"]).is_err());
    }
}
