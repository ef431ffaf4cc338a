//! CLI entry point for the Aztec diamond tiling sampler

use clap::Parser;
use dominoshuffle::io::cli::{Cli, SampleRunner};

fn main() -> dominoshuffle::Result<()> {
    let cli = Cli::parse();
    let mut runner = SampleRunner::new(cli);
    runner.process()
}
