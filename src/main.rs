use std::process;

use clap::Parser;
use colored::Colorize;
use findkmer::{
    cli::Args,
    config::{Config, OutputTarget},
    run,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let log_level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let quiet = args.quiet;
    let config = Config::from_args(args).unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Help menu:".blue().bold(),
            "$ findkmer --help".bold()
        );
        eprintln!();
        process::exit(1);
    });

    if !quiet {
        eprintln!("{}: {}", "k-length".bold(), config.k.to_string().blue().bold());
        eprintln!(
            "{}: {}",
            "data".bold(),
            config.input.to_string().underline().bold().blue()
        );
        if let OutputTarget::File(path) = &config.output {
            eprintln!(
                "{}: {}",
                "output".bold(),
                path.display().to_string().underline().bold().blue()
            );
        }
        eprintln!();
    }

    if let Err(e) = run::run(&config) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    }
}
