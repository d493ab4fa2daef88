use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esg_score::config::{Config, InitError};
use esg_score::output::ReportFormat;
use esg_score::taxonomy::Taxonomy;

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire in a full-screen view (default if no subcommand)
    Tui,
    /// Answer the questionnaire one prompt at a time on stdin
    Ask {
        /// Report format printed after the last question
        #[arg(short, long, value_enum, default_value_t)]
        format: ReportFormat,
    },
    /// List the questionnaire without answering it
    Questions,
    /// Write a starter config containing the built-in questionnaire
    Init {
        /// Where to write the config (defaults to ~/.config/esg-score/config.yaml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "esg-score")]
#[command(about = "ESG sustainability questionnaire and scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/esg-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(esg_score::stderr_buffer::BufferedStderr),
        )
        .init();
}

/// Load the config and build its questionnaire, exiting on any error
fn load_or_exit(path: Option<PathBuf>) -> (Config, Taxonomy) {
    let config = match esg_score::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the questionnaire at startup
    let taxonomy = match config.taxonomy() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Questionnaire errors:");
            for problem in e.problems() {
                eprintln!("  - {}", problem);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(
        "Questionnaire has {} questions in {} categories",
        taxonomy.len(),
        taxonomy.categories().len()
    );

    (config, taxonomy)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Tui);
    let use_colors = !cli.no_color && esg_score::output::should_use_colors();

    match command {
        Commands::Init { path, force } => match esg_score::config::write_starter_config(path, force) {
            Ok(written) => {
                println!("Config written to {}", written.display());
                println!("Edit the questionnaire there, then run `esg-score` to answer it.");
            }
            Err(e @ InitError::AlreadyExists(_)) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            Err(e) => {
                eprintln!("I/O error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        },
        Commands::Questions => {
            let (_, taxonomy) = load_or_exit(cli.config);
            println!("{}", esg_score::output::format_taxonomy(&taxonomy, use_colors));
        }
        Commands::Ask { format } => {
            let (config, taxonomy) = load_or_exit(cli.config);
            // Prompts on stderr keep stdout for the report alone
            let result = esg_score::survey::run_ask(
                &taxonomy,
                config.title(),
                format,
                use_colors,
                &mut io::stdin().lock(),
                &mut io::stderr(),
                &mut io::stdout(),
            );
            if let Err(e) = result {
                eprintln!("I/O error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Tui => {
            let (config, taxonomy) = load_or_exit(cli.config);
            let theme = esg_score::tui::resolve_theme();
            let app = esg_score::tui::App::new(taxonomy, config.title().to_string(), theme);
            match esg_score::tui::run_tui(app).await {
                Ok(app) => {
                    let report = app.report();
                    println!(
                        "{}",
                        esg_score::output::format_report(&report, use_colors, esg_score::output::chart_width(&report))
                    );
                }
                Err(e) => {
                    eprintln!("Terminal error: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
