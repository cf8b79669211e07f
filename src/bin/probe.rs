//! Cache latency sweep.
//!
//! Usage:
//!   cache-probe                 # per-size table
//!   cache-probe --accumulate    # two columns plus one summed result
//!   cache-probe --help          # Show help

use std::env;
use std::io;

use cache_probe::prelude::*;
use cache_probe::utils::bench::{timer_name, unit_name};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::parse(env::args().skip(1));

    if options.show_help {
        cache_probe::tui::print_help();
        return;
    }

    if !options.quiet {
        cache_probe::tui::print_banner(unit_name(), timer_name());
    }

    let mut table = TableWriter::new(io::stdout().lock(), options.layout);
    // A closed pipe ends the table early; the run still counts as done.
    if let Err(e) = run_sweep(&SWEEP_SIZES, &mut table) {
        eprintln!("{}", e);
    }
}
