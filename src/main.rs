use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use quoteweave::cli::{Cli, Commands};
use quoteweave::config::Config;
use quoteweave::evaluate::evaluate_with;
use quoteweave::pipeline::{Pipeline, PipelineData, available_components};
use quoteweave::segment::SegmentSequence;
use quoteweave::stitch::{StitchOptions, stitch_with};
use quoteweave::{EvaluateOptions, output};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { components } => {
            let mut pipeline = Pipeline::from_component_strings(&components)?.quiet(cli.quiet);
            let mut data = PipelineData::default();
            pipeline.run(&mut data)?;
        }
        Commands::Components => {
            let components = available_components();
            println!("Available components ({} total):\n", components.len());
            for (name, help) in components {
                println!("{name}:\n\t{help}\n");
            }
        }
        Commands::Stitch {
            input,
            overlap,
            output,
        } => {
            let chunks: Vec<SegmentSequence> = read_json(&input)?;
            let overlap = overlap.unwrap_or(config.attribution.chunk_overlap);
            let mut options = StitchOptions::from_overlap_hint(overlap);
            options.separator = config.attribution.merge_separator.clone();
            let stitched = stitch_with(&chunks, &options)?;
            let json = serde_json::to_string_pretty(&stitched)?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
            if !cli.quiet {
                eprintln!(
                    "Stitched {} chunks into {} segments.",
                    chunks.len(),
                    stitched.len()
                );
            }
        }
        Commands::Evaluate {
            predicted,
            ground_truth,
            json,
        } => {
            let predicted: SegmentSequence = read_json(&predicted)?;
            let ground_truth: SegmentSequence = read_json(&ground_truth)?;
            let options = EvaluateOptions {
                collapse_whitespace: config.evaluation.collapse_whitespace,
                trim: config.evaluation.trim,
            };
            let report = evaluate_with(&predicted, &ground_truth, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::render_report(&report);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_or_default(Path::new("quoteweave.toml"))?,
    };
    Ok(config.with_env_overrides())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}
