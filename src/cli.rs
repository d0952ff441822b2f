//! Command-line surface shared by the binaries.

use clap::Parser;

/// Arguments of the `ts` and `sts` binaries.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Problem size N; the process count must divide it
    pub numpoints: usize,

    /// Processes per team; must divide P, with teamsize² ≤ P
    #[arg(short = 'c', long, default_value_t = 1)]
    pub teamsize: usize,

    /// Skip the verification pass
    #[arg(long)]
    pub nocheck: bool,
}

/// Parse the command line, exiting with status 1 on a usage error —
/// before any distributed setup takes place.
pub fn parse_or_usage<A: Parser>() -> A {
    A::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    })
}
