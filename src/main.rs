// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

mod calendar_cmd;
mod cli;
mod logging;
mod now_cmd;
mod watch_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command, NowArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Option<Command>) -> Result<()> {
    match command.unwrap_or(Command::Now(NowArgs::default())) {
        Command::Now(args) => now_cmd::run(args),
        Command::Watch(args) => watch_cmd::run(args),
        Command::Calendar(args) => calendar_cmd::run(args),
    }
}
