use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tf_idf_recommender::config::{Config, DEFAULT_CONFIG_FILE};
use tf_idf_recommender::{evaluate, load_catalog, RecommendError, RecommendIndex, Result};
use tracing::info;

#[derive(Parser)]
#[command(name = "tf-idf-recommender")]
#[command(about = "Content-based movie recommendations from TF-IDF tag vectors")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to TITLE
    Recommend {
        title: String,
        /// Number of recommendations (defaults to recommend.top_n)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },
    /// Show overview, release year and poster URL of TITLE
    Info { title: String },
    /// Print the mean similarity between TITLE and its recommendations
    Evaluate {
        title: String,
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },
    /// List every known title
    Titles,
}

fn build_index(config: &Config) -> Result<RecommendIndex> {
    let start = Instant::now();
    let items = load_catalog(&config.data.movies, &config.data.credits)?;
    let index = RecommendIndex::build(items, &config.build_options())?;
    info!(
        items = index.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index built"
    );
    Ok(index)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let index = build_index(&config)?;
    let default_n = config.recommend.top_n;

    match cli.command {
        Commands::Recommend { title, top_n } => {
            let hits = index.ranked(&title, top_n.unwrap_or(default_n))?;
            for (i, hit) in hits.iter().enumerate() {
                println!("{:>2}. {:40}  {:.4}", i + 1, hit.key, hit.score);
            }
        }
        Commands::Info { title } => {
            let info = index.item_info(&title)?;
            println!("{} ({})", info.title, info.release_year);
            if let Some(url) = &info.poster_url {
                println!("poster: {url}");
            }
            if let Some(overview) = &info.overview {
                println!();
                println!("{overview}");
            }
        }
        Commands::Evaluate { title, top_n } => {
            let report = evaluate(&index, &title, top_n.unwrap_or(default_n))?;
            print!("{report}");
        }
        Commands::Titles => {
            for title in index.title_index().sorted_titles() {
                println!("{title}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ RecommendError::NotFound(_)) => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["tf-idf-recommender", "titles"]).unwrap();
        assert!(matches!(cli.command, Commands::Titles));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));

        let cli = Cli::try_parse_from([
            "tf-idf-recommender",
            "--config",
            "other.toml",
            "recommend",
            "Avatar",
            "-n",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Commands::Recommend { title, top_n } => {
                assert_eq!(title, "Avatar");
                assert_eq!(top_n, Some(3));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = Cli::try_parse_from(["tf-idf-recommender", "info"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
