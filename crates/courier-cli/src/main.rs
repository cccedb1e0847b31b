//! The `courier` command-line tool.

use clap::Parser;
use courier_cli::Cli;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = courier_cli::run(cli, &mut stdout) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
