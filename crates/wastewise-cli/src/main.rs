mod display;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wastewise_ai::{Architecture, Classifier, ClassifierConfig};
use wastewise_kb::{DEFAULT_REGION, KnowledgeBase};

use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArchArg {
    Resnet50,
    Mobilenet,
}

impl From<ArchArg> for Architecture {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::Resnet50 => Architecture::ResNet50,
            ArchArg::Mobilenet => Architecture::MobileNet,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "wastewise",
    about = "Classify waste from photos and look up disposal guidance",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON instead of text cards.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more images and print disposal guidance.
    Classify {
        /// Image files (PNG or JPEG).
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Region whose regulations apply.
        #[arg(short, long, env = "WASTEWISE_REGION", default_value = DEFAULT_REGION)]
        region: String,
        /// Backbone architecture.
        #[arg(long, env = "WASTEWISE_ARCH", value_enum, default_value_t = ArchArg::Resnet50)]
        arch: ArchArg,
        /// Directory with pretrained backbones and fine-tuned checkpoints.
        #[arg(long, env = "WASTEWISE_MODEL_DIR", default_value = "models")]
        model_dir: PathBuf,
    },
    /// Show regulations for a region, optionally for one waste type.
    Regulations {
        #[arg(short, long, env = "WASTEWISE_REGION", default_value = DEFAULT_REGION)]
        region: String,
        #[arg(short = 't', long)]
        waste_type: Option<String>,
    },
    /// Show segregation tips, optionally for one waste type.
    Tips {
        #[arg(short = 't', long)]
        waste_type: Option<String>,
    },
    /// Search the material catalog by name or subtype.
    Search { query: String },
    /// List waste categories.
    Categories,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("wastewise v{}", env!("CARGO_PKG_VERSION"));

    let kb = KnowledgeBase::new();

    match cli.command {
        Commands::Classify {
            images,
            region,
            arch,
            model_dir,
        } => {
            let config = ClassifierConfig {
                architecture: arch.into(),
                model_dir,
                ..Default::default()
            };
            let classifier = tokio::task::spawn_blocking(move || Classifier::new(&config))
                .await
                .context("classifier construction panicked")?
                .context("building classifier")?;
            eprintln!("{}", display::provenance_line(classifier.provenance()));

            let total = images.len();
            let outcomes = Pipeline::new(classifier)
                .analyze_files(images, &region)
                .await;

            let mut failed = 0usize;
            let mut responses = Vec::new();
            for outcome in outcomes {
                match outcome.result {
                    Ok(response) if cli.json => responses.push(response),
                    Ok(response) => {
                        let title = outcome.path.display().to_string();
                        print!("{}", display::composite_card(&title, &response)?);
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!("error: {}: {e:#}", outcome.path.display());
                    }
                }
            }
            if cli.json {
                print_json(&responses)?;
            }
            anyhow::ensure!(failed == 0, "{failed} of {total} image(s) could not be classified");
        }
        Commands::Regulations { region, waste_type } => {
            let regs = kb.regulations(waste_type.as_deref(), &region);
            if cli.json {
                print_json(&regs)?;
            } else {
                print!("{}", display::regulations_card(&regs)?);
            }
        }
        Commands::Tips { waste_type } => {
            let tips = kb.segregation_tips(waste_type.as_deref());
            if cli.json {
                print_json(&tips)?;
            } else {
                print!("{}", display::tips_card(&tips)?);
            }
        }
        Commands::Search { query } => {
            let matches = kb.search_by_keyword(&query);
            if cli.json {
                print_json(&matches)?;
            } else {
                print!("{}", display::search_card(&query, &matches)?);
            }
        }
        Commands::Categories => {
            let categories = kb.categories();
            if cli.json {
                print_json(categories)?;
            } else {
                print!("{}", display::categories_card(categories)?);
            }
        }
    }

    Ok(())
}
