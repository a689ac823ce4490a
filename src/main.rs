//! Bag Count CLI
//!
//! Use `-f` to load an order set from a YAML fixture file
//! Use `-o` and `-s` to pass orders and bag sizes inline
//! Use `--per-order` to print how each order was packed

use std::{
    io::{self, Write},
    process,
    time::Instant,
};

use anyhow::Result;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::info;

use bagcount::{config::ReportArgs, logging};

/// Bag count entry point
pub fn main() {
    let args = ReportArgs::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = logging::init(&args.log_level, args.log_format) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for logging errors"
        )]
        {
            eprintln!("{e}");
        }

        process::exit(1);
    }

    if let Err(e) = run(&args) {
        #[expect(clippy::print_stderr, reason = "Program errors reported to user")]
        {
            eprintln!("{e:#}");
        }

        process::exit(1);
    }
}

fn run(args: &ReportArgs) -> Result<()> {
    let order_set = args.order_set()?;

    let start = Instant::now();
    let report = order_set.report()?;
    let elapsed = start.elapsed();

    info!(
        name = order_set.name().unwrap_or("inline"),
        orders = report.allocations().len(),
        leaves = report.stats().leaves(),
        "report ready"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    report.write_to(&mut handle, args.per_order)?;

    writeln!(
        handle,
        " Solved in {} ({} combinations checked)",
        elapsed.human(Truncate::Nano),
        report.stats().candidates
    )?;

    Ok(())
}
