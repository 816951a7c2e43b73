//! frontplate command-line entry point.

use clap::Parser;
use frontplate::cli::Cli;
use frontplate::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
