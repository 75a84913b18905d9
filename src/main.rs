use std::process;
use tfs_analyzer::cli::{Cli, CliHandler, ReportFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {}", e);
            process::exit(2);
        }
    };

    init_tracing(&cli);

    let formatter = ReportFormatter::new(&cli);
    let handler = CliHandler::new(cli);

    let exit_code = match handler.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e));
            e.exit_code()
        }
    };

    process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
