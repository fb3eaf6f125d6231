use clap::Parser;
use projman::cli::commands::Cli;
use projman::cli::handlers;
use projman::io::config_io;
use projman::logging;
use projman::model::config::tool_dir;

fn main() {
    let cli = Cli::parse();
    let base_dir = cli.base_dir.unwrap_or_else(config_io::default_base_dir);

    // Logging first so config warnings are recorded
    let guard = match cli.command {
        None => logging::init_tui(&tool_dir(&base_dir)),
        Some(_) => {
            logging::init_cli();
            None
        }
    };

    let config = match config_io::load_config(&base_dir) {
        Ok(config) => config,
        Err(e) => {
            drop(guard);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch TUI
        None => projman::tui::run(config),
        Some(command) => handlers::dispatch(command, &config, cli.json),
    };
    if let Err(e) = result {
        drop(guard);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
