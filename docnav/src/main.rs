//! docnav - Extract sections, diagrams and code blocks from large Markdown docs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docnav_core::{CapabilityScanner, Config, LineRange, SectionExtractor};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Navigate large Markdown documents without reading them whole
#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a line range (e.g. 119-164)
    Lines {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "START-END")]
        range: String,
        /// Return metadata only, not content
        #[arg(long)]
        no_content: bool,
    },
    /// Extract a section by heading title
    Section {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "NAME")]
        name: String,
        /// Require an exact, case-sensitive title match
        #[arg(long)]
        exact: bool,
        /// Return metadata only, not content
        #[arg(long)]
        no_content: bool,
    },
    /// List sections whose title contains a keyword
    List {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },
    /// Print the table of contents
    Toc {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Only include headings up to this level
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
        max_level: Option<u8>,
    },
    /// Print document statistics
    Stats {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Find capability sections
    Scan {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Show which agent session phase a project is in
    #[cfg(feature = "session")]
    Phase {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Also print the prompt for the phase
        #[arg(long)]
        prompt: bool,
    },
}

#[derive(Serialize)]
struct KeywordMatches<'a> {
    keyword: &'a str,
    matches: Vec<docnav_core::SectionSummary>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };
    let pretty = config.output.pretty && !args.compact;

    match args.command {
        Command::Lines {
            file,
            range,
            no_content,
        } => {
            let range: LineRange = range.parse()?;
            let extractor = open(&file)?;
            let result = extractor.extract_by_lines(range.start, range.end);
            let result = if no_content || !config.output.include_content {
                result.without_content()
            } else {
                result
            };
            print_json(&result, pretty)
        }
        Command::Section {
            file,
            name,
            exact,
            no_content,
        } => {
            let extractor = open(&file)?;
            let Some(result) = extractor.extract_by_name(&name, !exact) else {
                anyhow::bail!("Section not found: {name}");
            };
            let result = if no_content || !config.output.include_content {
                result.without_content()
            } else {
                result
            };
            print_json(&result, pretty)
        }
        Command::List { file, keyword } => {
            let extractor = open(&file)?;
            let matches = extractor.list_sections_matching(&keyword);
            print_json(
                &KeywordMatches {
                    keyword: &keyword,
                    matches,
                },
                pretty,
            )
        }
        Command::Toc { file, max_level } => {
            let extractor = open(&file)?;
            let toc: Vec<_> = extractor
                .toc()
                .iter()
                .filter(|entry| max_level.map_or(true, |max| entry.level <= max))
                .collect();
            print_json(&toc, pretty)
        }
        Command::Stats { file } => {
            let extractor = open(&file)?;
            print_json(&extractor.stats(), pretty)
        }
        Command::Scan { file } => {
            let extractor = open(&file)?;
            let report = CapabilityScanner::new(&config.scanner).scan(extractor.document());
            print_json(&report, pretty)
        }
        #[cfg(feature = "session")]
        Command::Phase { dir, prompt } => phase(&dir, prompt, &config, pretty),
    }
}

fn open(file: &Path) -> Result<SectionExtractor> {
    SectionExtractor::open(file).with_context(|| format!("Failed to load document: {}", file.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(feature = "session")]
fn phase(dir: &Path, with_prompt: bool, config: &Config, pretty: bool) -> Result<()> {
    use docnav_core::session::{Artifacts, Phase, PromptLibrary};

    #[derive(Serialize)]
    struct PhaseReport {
        phase: Phase,
        artifacts: Artifacts,
        prompt_name: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    }

    if !dir.is_dir() {
        anyhow::bail!("Project directory not found: {}", dir.display());
    }

    let artifacts = Artifacts::probe(dir);
    let phase = Phase::determine(&artifacts);
    log::info!("{} is in phase {phase}", dir.display());

    let prompt = if with_prompt {
        let prompts_dir = config
            .session
            .prompts_dir
            .clone()
            .context("No prompts directory configured (set [session] prompts_dir)")?;
        Some(PromptLibrary::new(prompts_dir).load(phase)?)
    } else {
        None
    };

    print_json(
        &PhaseReport {
            phase,
            artifacts,
            prompt_name: phase.prompt_name(),
            prompt,
        },
        pretty,
    )
}
