// src/bin/cli.rs
use lol_analytics::cli;

fn main() -> color_eyre::Result<()> {
    cli::run()
}
