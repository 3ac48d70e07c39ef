//! Chartline CLI - assemble race charts and describe distances

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use chartline::data::{load_assembly_config, load_race_drafts};
use chartline::{AssembledRace, Assembler, AssemblyConfig, Breed, RaceDistance};

#[derive(Parser)]
#[command(name = "chartline")]
#[command(author, version, about = "Race chart result assembly CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log stage progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble race results from a JSON draft file
    Assemble {
        /// Path to a race draft, or an array of drafts
        #[arg(short, long)]
        input: PathBuf,

        /// Path to an assembly configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Describe a race distance
    Distance {
        /// Distance in feet
        #[arg(short, long)]
        feet: u32,

        /// The distance is approximate
        #[arg(long)]
        about: bool,

        /// Breed code (TB, QH, ARAB, MIX)
        #[arg(short, long, default_value = "TB")]
        breed: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match cli.command {
        Commands::Assemble {
            input,
            config,
            pretty,
        } => run_assemble(&input, config.as_deref(), pretty)?,
        Commands::Distance { feet, about, breed } => run_distance(feet, about, &breed)?,
    }

    Ok(())
}

fn run_assemble(input: &Path, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = match config {
        Some(path) => load_assembly_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AssemblyConfig::default(),
    };

    let drafts = load_race_drafts(input)
        .with_context(|| format!("Failed to load race drafts from {:?}", input))?;

    eprintln!(
        "{}: {} race(s) from {:?}",
        "Assembling".green(),
        drafts.len(),
        input
    );

    let assembler = Assembler::new(config);
    let mut results = Vec::new();
    let mut failures = 0;

    for (i, outcome) in assembler.assemble_all(drafts).into_iter().enumerate() {
        match outcome {
            Ok(assembled) => {
                print_diagnostics(&assembled);
                results.push(assembled.result);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} race #{}: {}", "Skipped".red(), i + 1, e);
            }
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(&results)
    } else {
        serde_json::to_string(&results)
    }
    .context("Failed to serialize race results")?;
    println!("{}", json);

    if failures > 0 {
        eprintln!(
            "{}",
            format!("{} race(s) could not be assembled", failures).yellow()
        );
    }

    Ok(())
}

fn print_diagnostics(assembled: &AssembledRace) {
    let summary = assembled.result.simple_summary();
    if assembled.diagnostics.is_empty() {
        eprintln!("{} {}", "OK".green().bold(), summary);
        return;
    }

    eprintln!(
        "{} {} ({} issue(s))",
        "WARN".yellow().bold(),
        summary,
        assembled.diagnostics.len()
    );
    for issue in assembled.diagnostics.issues() {
        eprintln!("  - {}", issue);
    }
}

fn run_distance(feet: u32, about: bool, breed: &str) -> Result<()> {
    let breed = Breed::from_code(breed).context("Invalid breed")?;
    let distance = RaceDistance::from_feet(feet, about, breed)
        .with_context(|| format!("Failed to describe {} feet", feet))?;

    println!("{}", distance.text.cyan().bold());
    println!("{:<10} {}", "Alt:", distance.alt);
    println!("{:<10} {}", "Compact:", distance.compact);
    println!("{:<10} {:.2}", "Furlongs:", distance.furlongs());
    println!("{:<10} {}", "Exact:", distance.exact);

    Ok(())
}
