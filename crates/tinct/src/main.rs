use clap::Parser;
use tinct::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tinct::logging::init(cli.verbose);
    tinct::run(cli)
}
