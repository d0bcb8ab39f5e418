use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kwic::index::{build, stats, IndexReader};
use kwic::output::{print_term_counts, print_term_lines, TermLines};
use kwic::query::{parse_terms, QueryExecutor, QueryOptions};
use kwic::utils::{logging, AppConfig};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "kwic")]
#[command(about = "Key-Word-In-Context concordance indexer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a corpus file or directory
    Index {
        /// Corpus file, or directory of corpus files
        corpus: PathBuf,

        /// Vocabulary file: one term per line, n-gram tokens joined by the separator
        #[arg(long)]
        vocab: PathBuf,

        /// Where to write the index
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tokens per context window (odd)
        #[arg(short, long)]
        width: Option<usize>,

        /// Index lines on a single thread
        #[arg(long)]
        sequential: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show every occurrence of one or more terms
    Query {
        /// Terms to look up; phrases may be typed with spaces
        #[arg(required = true)]
        terms: Vec<String>,

        /// Index file to query
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Expected window width (defaults to the index's width)
        #[arg(short, long)]
        width: Option<usize>,

        /// Show separators as spaces
        #[arg(short, long)]
        spaces: bool,

        /// Only print the number of occurrences per term
        #[arg(short, long)]
        count: bool,

        /// Do not print a heading line per term
        #[arg(long)]
        no_heading: bool,

        /// When to color output
        #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
        color: ColorWhen,
    },
    /// List indexed terms with their occurrence counts
    Terms {
        /// Index file
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
    /// Show index statistics
    Stats {
        /// Index file
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
    /// Print the resolved configuration
    Config {
        /// Write it to the user config directory
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Index {
            corpus,
            vocab,
            output,
            width,
            sequential,
            quiet,
        } => {
            if let Some(width) = width {
                config.window_width = width;
            }
            if sequential {
                config.parallel = false;
            }
            let index_config = config.index_config()?;
            let output = output.unwrap_or_else(|| config.default_index.clone());
            build::build_index_from_paths(&corpus, &vocab, &output, &index_config, quiet)?;
        }
        Commands::Query {
            terms,
            index,
            width,
            spaces,
            count,
            no_heading,
            color,
        } => {
            let path = index.unwrap_or_else(|| config.default_index.clone());
            let reader = IndexReader::open(&path)
                .with_context(|| format!("Failed to open index {}", path.display()))?;
            let index = reader.index();

            let options = QueryOptions {
                width: width.unwrap_or(index.width().get()),
                replace_separators: spaces,
            };
            let executor = QueryExecutor::new(index);

            let mut results = Vec::new();
            for query in parse_terms(terms.as_slice(), index.separator()) {
                let lines = executor.execute(&query.term, options)?;
                let heading = if spaces {
                    query.term.replace(index.separator(), " ")
                } else {
                    query.term.clone()
                };
                results.push(TermLines { heading, lines });
            }

            let color = match color {
                ColorWhen::Always => true,
                ColorWhen::Never => false,
                ColorWhen::Auto => std::io::stdout().is_terminal(),
            };
            if count {
                print_term_counts(&results, color)?;
            } else {
                print_term_lines(&results, color, !no_heading)?;
            }
        }
        Commands::Terms { index } => {
            let path = index.unwrap_or_else(|| config.default_index.clone());
            stats::list_terms(&path)?;
        }
        Commands::Stats { index } => {
            let path = index.unwrap_or_else(|| config.default_index.clone());
            stats::show_stats(&path)?;
        }
        Commands::Config { save } => {
            // Validate before showing or saving
            config.index_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = config.save()?;
                println!("Saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
