use clap::Parser;

use oi_flow::{cli, expirations, interactive, snapshot};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Expirations { ticker } => expirations::run(&ticker),
        cli::Command::Snapshot {
            ticker,
            expiration,
            range,
            format,
            output,
        } => snapshot::run(&snapshot::SnapshotConfig {
            ticker,
            expiration,
            range,
            format,
            output,
        }),
        cli::Command::Interactive { range } => interactive::run(range),
    }
}
