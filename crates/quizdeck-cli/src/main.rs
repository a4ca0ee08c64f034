//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Terminal flashcard quiz over CSV decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz session
    Quiz {
        /// Deck CSV path (defaults to the configured deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Categories to include (comma-separated)
        #[arg(long)]
        categories: Option<String>,

        /// Subcategories to include (comma-separated)
        #[arg(long)]
        subcategories: Option<String>,

        /// Subsections to include (comma-separated)
        #[arg(long)]
        subsections: Option<String>,

        /// Include every category
        #[arg(long)]
        all: bool,

        /// Ask definition -> term instead of term -> definition
        #[arg(long)]
        inverse: bool,

        /// Seed the question order (reproducible sessions)
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Browse the filtered deck as flashcards
    Study {
        /// Deck CSV path (defaults to the configured deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Restrict to one subcategory
        #[arg(long)]
        subcategory: Option<String>,

        /// Restrict to one subsection
        #[arg(long)]
        subsection: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a deck and report data problems
    Validate {
        /// Deck CSV path (defaults to the configured deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show categories and subcategories with term counts
    Categories {
        /// Deck CSV path (defaults to the configured deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show persisted missed-answer totals
    Stats {
        /// Stats file path (defaults to the configured file)
        #[arg(long)]
        stats_file: Option<PathBuf>,

        /// Clear all recorded statistics
        #[arg(long)]
        reset: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample deck
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            deck,
            categories,
            subcategories,
            subsections,
            all,
            inverse,
            seed,
            config,
        } => commands::quiz::execute(
            deck,
            categories,
            subcategories,
            subsections,
            all,
            inverse,
            seed,
            config,
        ),
        Commands::Study {
            deck,
            category,
            subcategory,
            subsection,
            config,
        } => commands::study::execute(deck, category, subcategory, subsection, config),
        Commands::Validate { deck, config } => commands::validate::execute(deck, config),
        Commands::Categories { deck, config } => commands::categories::execute(deck, config),
        Commands::Stats {
            stats_file,
            reset,
            config,
        } => commands::stats::execute(stats_file, reset, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
