use clap::Parser;

use crate::cli::{Opts, SubCommand};

mod cli;

fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    let level = if opts.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &opts.subcmd {
        SubCommand::Decode(args) => cli::decode(args),
        SubCommand::Encode(cmd) => cli::encode(cmd),
    }
}
