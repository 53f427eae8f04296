//! CLI entry point for the `bookrec` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use book_recommender::cli::commands;
use book_recommender::{RecError, RecommenderConfig};

#[derive(Parser)]
#[command(
    name = "bookrec",
    about = "Recommend books similar to a (possibly misspelled) title"
)]
struct Cli {
    /// Config file (TOML). Defaults to the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: "text" (default) or "json"
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for configured artifact paths and matching settings.
#[derive(Args)]
struct Overrides {
    /// .bsim model file
    #[arg(long)]
    model: Option<PathBuf>,
    /// Catalog metadata CSV
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Acceptance threshold (0-100, exclusive)
    #[arg(long)]
    threshold: Option<u32>,
    /// Number of recommendations
    #[arg(short = 'k', long)]
    top_k: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books similar to a title
    Recommend {
        /// Free-text title, typos allowed
        title: String,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Show which catalog title an input resolves to
    Resolve {
        /// Free-text title
        title: String,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// List ranked neighbors of an exact catalog title
    Neighbors {
        /// Exact catalog title
        title: String,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Show the most-rated books
    Popular {
        /// Popular books CSV
        #[arg(long)]
        popular: Option<PathBuf>,
        /// Maximum books to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Display information about a .bsim file
    Info {
        /// Path to the .bsim file (defaults to the configured model)
        file: Option<PathBuf>,
    },
    /// Pack a JSON titles + scores export into a .bsim file
    Pack {
        /// JSON file: {"titles": [...], "scores": [[...], ...]}
        source: PathBuf,
        /// Output .bsim path
        out: PathBuf,
    },
    /// Write a config file with default values
    InitConfig {
        /// Where to write (defaults to the user config dir)
        path: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<RecommenderConfig, RecError> {
    match path {
        Some(p) => RecommenderConfig::load(p),
        None => RecommenderConfig::load_or_default(),
    }
}

fn apply(mut config: RecommenderConfig, o: Overrides) -> RecommenderConfig {
    if let Some(model) = o.model {
        config.artifacts.model = model;
    }
    if let Some(catalog) = o.catalog {
        config.artifacts.catalog = catalog;
    }
    if let Some(threshold) = o.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(top_k) = o.top_k {
        config.matching.top_k = top_k;
    }
    config
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(3);
        }
    };

    let result = match cli.command {
        Commands::Recommend { title, overrides } => {
            commands::cmd_recommend(&apply(config, overrides), &title, json).map(Some)
        }
        Commands::Resolve { title, overrides } => {
            commands::cmd_resolve(&apply(config, overrides), &title, json).map(Some)
        }
        Commands::Neighbors { title, overrides } => {
            let config = apply(config, overrides);
            commands::cmd_neighbors(
                &config.artifacts.model,
                &title,
                config.matching.top_k,
                json,
            )
            .map(|_| None)
        }
        Commands::Popular { popular, limit } => match popular.or(config.artifacts.popular) {
            Some(path) => commands::cmd_popular(&path, limit, json).map(|_| None),
            None => {
                eprintln!("No popular books file configured (use --popular)");
                process::exit(3);
            }
        },
        Commands::Info { file } => {
            let file = file.unwrap_or(config.artifacts.model);
            commands::cmd_info(&file, json).map(|_| None)
        }
        Commands::Pack { source, out } => commands::cmd_pack(&source, &out, json).map(|_| None),
        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(RecommenderConfig::default_path);
            commands::cmd_init_config(&path).map(|_| None)
        }
    };

    match result {
        Ok(Some(false)) => process::exit(4),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(exit_code(&e));
        }
    }
}

fn exit_code(e: &RecError) -> i32 {
    match e {
        RecError::ArtifactLoad { source, .. } => exit_code(source),
        RecError::Io(_) => 1,
        RecError::InvalidMagic
        | RecError::UnsupportedVersion(_)
        | RecError::Truncated
        | RecError::Corrupt(_)
        | RecError::Compression(_)
        | RecError::DuplicateTitle(_)
        | RecError::DimensionMismatch { .. }
        | RecError::InvalidScore { .. }
        | RecError::Csv(_)
        | RecError::Json(_) => 2,
        RecError::InvalidThreshold(_) | RecError::Config(_) => 3,
        _ => 5,
    }
}
