use clap::Parser;
use leitung::cli::{Cli, Commands, check_command, functions_command, run_command};
use leitung::logging;
use tracing::error;

fn main() {
    let args = Cli::parse();

    if let Err(e) = logging::init(&args.log_level, args.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> leitung::error::Result<()> {
    match args.cmd {
        Commands::Run {
            file,
            input,
            pipeline,
            checkpoints,
        } => run_command(file, input, pipeline, checkpoints),
        Commands::Check { file } => check_command(file),
        Commands::Functions => functions_command(),
    }
}
