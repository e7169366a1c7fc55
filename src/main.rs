use clap::Parser;
use syncrotask::cli::commands::Cli;
use syncrotask::cli::handlers;
use syncrotask::io::log;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI (logs go to a file)
            if let Err(e) = syncrotask::tui::run(cli.board_dir.as_deref(), &cli.log_level) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            log::init_stderr(&cli.log_level);
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
