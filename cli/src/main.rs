//! zineflow CLI - zine layout analysis and narrative pagination tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use zineflow::{
    load_document, ConvertOptions, JsonFormat, MonospaceMeasurer, NarrativeGenerator, Pagination,
    Paginator, SpreadSet, StaticNarrative, Strategy, TranscriptEcho, Viewport, Zineflow,
};

#[derive(Parser)]
#[command(name = "zineflow")]
#[command(version)]
#[command(about = "Analyze zine layouts, build transcripts, and paginate narratives", long_about = None)]
struct Cli {
    /// Options file (JSON) with layout, transcript, and pagination settings
    #[arg(long, global = true, value_name = "FILE", env = "ZINEFLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match images to their nearby text
    Analyze {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Flatten a document into a transcript
    Transcript {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output the structured transcript as JSON
        #[arg(long)]
        json: bool,

        /// Omit the [Page N] header lines
        #[arg(long)]
        no_headers: bool,
    },

    /// Split a narrative text file into spread pages
    Paginate {
        /// Narrative text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Spread width in pixels
        #[arg(long)]
        width: Option<f32>,

        /// Spread height in pixels
        #[arg(long)]
        height: Option<f32>,

        /// Character budget per page when not measuring
        #[arg(long)]
        chars: Option<usize>,

        /// Estimate rendered heights instead of counting characters
        #[arg(long)]
        measure: bool,

        /// Output chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a document into paginated prose
    Convert {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pre-written narrative to paginate (the transcript is used if absent)
        #[arg(short, long, value_name = "FILE")]
        narrative: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Estimate rendered heights instead of counting characters
        #[arg(long)]
        measure: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            compact,
            summary,
        } => cmd_analyze(&input, output.as_deref(), compact, summary, config),
        Commands::Transcript {
            input,
            output,
            json,
            no_headers,
        } => cmd_transcript(&input, output.as_deref(), json, no_headers, config),
        Commands::Paginate {
            input,
            width,
            height,
            chars,
            measure,
            json,
        } => cmd_paginate(&input, width, height, chars, measure, json, config),
        Commands::Convert {
            input,
            narrative,
            output,
            measure,
        } => cmd_convert(
            &input,
            narrative.as_deref(),
            output.as_deref(),
            measure,
            config,
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_options(config: Option<&Path>) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
    match config {
        Some(path) => {
            log::debug!("Loading options from {}", path.display());
            Ok(ConvertOptions::from_file(path)?)
        }
        None => Ok(ConvertOptions::default()),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    summary: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = Zineflow::new()
        .with_options(load_options(config)?)
        .load(input)?;

    if !summary {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        return write_output(output, &result.layouts_json(format)?);
    }

    println!("{}", "Layout Analysis".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (page, layout) in result.document.pages.iter().zip(result.layouts()) {
        println!(
            "{} {}: {} image(s), {} text element(s)",
            "Page".bold(),
            page.number,
            layout.images.len(),
            layout.text_elements.len()
        );
        for pair in &layout.image_text_pairs {
            let name = pair.image.id.as_deref().unwrap_or("(unnamed)");
            match &pair.primary_text {
                Some(best) => println!(
                    "  {} {} {} {:?} ({}, {:.0}% confidence)",
                    "├─".dimmed(),
                    name,
                    "→".green(),
                    best.element.text_content(),
                    best.direction,
                    best.confidence * 100.0
                ),
                None => println!("  {} {} {}", "├─".dimmed(), name, "no nearby text".yellow()),
            }
        }
    }

    Ok(())
}

fn cmd_transcript(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    no_headers: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = load_options(config)?;
    if no_headers {
        options.transcript.page_headers = false;
    }
    let result = Zineflow::new().with_options(options).load(input)?;
    let transcript = result.transcript();

    if json {
        let content = zineflow::transcript::to_json(&transcript, JsonFormat::Pretty)?;
        write_output(output, &content)
    } else {
        write_output(output, &transcript.text())
    }
}

fn cmd_paginate(
    input: &Path,
    width: Option<f32>,
    height: Option<f32>,
    chars: Option<usize>,
    measure: bool,
    json: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let narrative = fs::read_to_string(input)?;

    let mut options = load_options(config)?.pagination;
    let viewport = options.viewport;
    options.viewport = Viewport::new(width.unwrap_or(viewport.width), height.unwrap_or(viewport.height));
    if let Some(chars) = chars {
        options.char_budget = chars;
    }
    options.validate()?;

    let mut paginator = Paginator::new(options);
    if measure {
        paginator = paginator.with_measurer(MonospaceMeasurer::default());
    }
    let pagination = paginator.paginate(&narrative);

    if json {
        println!("{}", serde_json::to_string_pretty(&pagination.chunks)?);
        return Ok(());
    }

    print_summary(&pagination);
    print_spreads(&pagination.into_spreads());
    Ok(())
}

fn cmd_convert(
    input: &Path,
    narrative: Option<&Path>,
    output: Option<&Path>,
    measure: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_zine", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let generator: Arc<dyn NarrativeGenerator> = match narrative {
        Some(path) => Arc::new(StaticNarrative::new(fs::read_to_string(path)?)),
        None => Arc::new(TranscriptEcho),
    };

    let mut builder = Zineflow::new().with_options(load_options(config)?);
    if measure {
        builder = builder.with_measurer(MonospaceMeasurer::default());
    }
    let result = builder.document(load_document(input)?)?;
    let converted = result.convert(generator)?;

    fs::write(output_dir.join("transcript.txt"), converted.transcript.text())?;
    fs::write(output_dir.join("narrative.txt"), &converted.narrative)?;
    fs::write(
        output_dir.join("pages.json"),
        serde_json::to_string_pretty(&converted.pages)?,
    )?;

    println!(
        "{} {} page(s), {} spread(s) ({})",
        "Done!".green().bold(),
        converted.page_count(),
        converted.spread_count(),
        strategy_name(converted.strategy)
    );
    println!("\n{}", "Output files:".green().bold());
    println!("  {} transcript.txt", "├─".dimmed());
    println!("  {} narrative.txt", "├─".dimmed());
    println!("  {} pages.json", "└─".dimmed());

    Ok(())
}

fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Measured => "measured",
        Strategy::Fallback => "character budget",
    }
}

fn print_summary(pagination: &Pagination) {
    println!("{}", "Pagination".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Strategy".bold(), strategy_name(pagination.strategy));
    println!("{}: {}", "Pages".bold(), pagination.chunks.len());
    println!("{}: {}", "Spreads".bold(), pagination.spread_count());
    println!(
        "{}: {}",
        "Balanced sentences".bold(),
        pagination.balanced_sentences
    );
    println!();
}

fn print_spreads(spreads: &SpreadSet) {
    for spread in spreads.spreads() {
        println!("{}", format!("Spread {}", spread.index + 1).cyan().bold());
        println!("{} {}", "Left:".bold(), spread.left);
        match spread.right {
            Some(right) => println!("{} {}", "Right:".bold(), right),
            None => println!("{} {}", "Right:".bold(), "(blank)".dimmed()),
        }
        println!();
    }
}

fn cmd_version() {
    println!("{} {}", "zineflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Zine layout analysis and pagination tool");
    println!();
    println!("License: MIT");
}
