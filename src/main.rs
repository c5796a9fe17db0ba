// ABOUTME: Main entry point for the deckhand program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use deckhand::install::MANUAL_INSTRUCTIONS;
use deckhand::{
    Backend, Config, ConversionOutcome, ConversionReport, DeckError, DeckProgress,
};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 56;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PowerPoint deck from a markdown file
    GeneratePptx(GeneratePptxArgs),

    /// Convert SVG files to PNG
    SvgToPng(SvgToPngArgs),
}

#[derive(Args)]
struct GeneratePptxArgs {
    /// Path to the markdown file
    #[arg(short, long, default_value = "slides-content.md")]
    input: PathBuf,

    /// Path to output PPTX file
    #[arg(short, long, default_value = "presentation.pptx")]
    output: PathBuf,

    /// Document title (defaults to the first slide's title)
    #[arg(long)]
    title: Option<String>,

    /// Footer text shown before the slide number
    #[arg(long)]
    footer: Option<String>,
}

#[derive(Args)]
struct SvgToPngArgs {
    /// Output width in pixels
    #[arg(default_value_t = 1200)]
    width: u32,

    /// Output height in pixels
    #[arg(default_value_t = 630)]
    height: u32,

    /// Glob pattern selecting the SVG files
    #[arg(default_value = "*featured*.svg")]
    pattern: String,

    /// Directory containing the SVG files
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Render in-process instead of calling rsvg-convert
    #[arg(long)]
    native: bool,

    /// Scale factor for --native (width and height are ignored)
    #[arg(long, requires = "native")]
    scale: Option<f32>,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn print_progress(progress: DeckProgress<'_>) {
    match progress {
        DeckProgress::Parsed { slides } => {
            println!("{} Found {} slides", "✓".green(), slides);
            println!();
            println!("Generating PowerPoint presentation...");
        }
        DeckProgress::Slide {
            position,
            total,
            title,
            ..
        } => println!(
            "  Creating slide {}/{}: {}",
            position,
            total,
            deckhand::utils::truncate_chars(title, 50)
        ),
    }
}

fn run_generate_pptx(args: &GeneratePptxArgs, config: &Config) -> anyhow::Result<i32> {
    println!("{}", rule());
    println!("Deckhand - PowerPoint Generator");
    println!("{}", rule());
    println!();
    println!("Reading slides content from: {}", args.input.display());
    println!("Parsing slides...");

    let deck_config = config.get_deck_config(args.title.clone(), args.footer.clone());
    let summary = deckhand::generate_deck_with_progress(
        &args.input,
        &args.output,
        &deck_config,
        print_progress,
    )
    .with_context(|| format!("Could not generate {}", args.output.display()))?;

    println!();
    println!("{}", rule());
    println!("{} Presentation generated successfully!", "✓".green());
    println!("  Location: {}", summary.output.display());
    println!("  Slides: {}", summary.slide_count);
    println!();
    println!("Next steps:");
    println!("  1. Open in PowerPoint, Google Slides, or Keynote");
    println!("  2. Customize design and animations");
    println!("  3. Add speaker notes if needed");
    println!("{}", rule());
    Ok(0)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_summary(report: &ConversionReport) {
    println!();
    println!("{}", rule().blue());
    println!("{}", "Conversion Summary".green());
    println!("  Successful: {}", report.successful());
    if report.failed() > 0 {
        println!("  {}", format!("Failed: {}", report.failed()).red());
        println!("{}", "Failed files:".red());
        for file in report.failed_files() {
            println!("    - {}", display_name(file));
        }
    } else {
        println!("  {}", "All files converted successfully!".green());
    }
    println!("{}", rule().blue());
}

fn run_svg_to_png(args: &SvgToPngArgs, config: &Config) -> anyhow::Result<i32> {
    let scale = args
        .native
        .then(|| args.scale.unwrap_or(config.native_scale));
    let convert_config = config.get_convert_config(
        args.width,
        args.height,
        args.pattern.clone(),
        args.dir.clone(),
        scale,
    )?;
    let directory = deckhand::utils::get_absolute_path(&convert_config.directory)
        .unwrap_or_else(|_| convert_config.directory.clone());

    println!("{}", rule().blue());
    println!("{}", "SVG to PNG Converter".blue());
    println!("{}", rule().blue());
    println!();
    println!("Configuration:");
    match convert_config.backend {
        Backend::Rsvg => println!(
            "  Output dimensions: {}x{}px",
            convert_config.width, convert_config.height
        ),
        Backend::Native { scale } => println!("  Output scale: {}x", scale),
    }
    println!("  File pattern: {}", convert_config.pattern);
    println!("  Directory: {}", directory.display());
    println!();

    let tool = match convert_config.backend {
        Backend::Rsvg => match deckhand::ensure_rsvg_convert() {
            Ok(version) => version,
            Err(e) => {
                println!("{}", format!("✗ Error: {}", e).red());
                println!();
                println!("{}", MANUAL_INSTRUCTIONS);
                return Ok(1);
            }
        },
        Backend::Native { .. } => "resvg (built-in)".to_string(),
    };
    println!("Tool: {}", tool);
    println!("{}", rule().blue());
    println!();

    let files = match deckhand::find_svg_files(&convert_config.directory, &convert_config.pattern)
    {
        Ok(files) => files,
        Err(DeckError::NoFilesFoundError(pattern)) => {
            println!(
                "{}",
                format!("✗ No SVG files matching pattern: {}", pattern).red()
            );
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("Found {} SVG file(s)", files.len());
    println!();

    let mut report = ConversionReport::default();
    for file in &files {
        print!("Converting: {:<45}", display_name(file));
        std::io::stdout().flush()?;

        let outcome = deckhand::convert_one(file, &convert_config);
        match &outcome {
            ConversionOutcome::Converted { bytes, .. } => {
                println!("{} ({})", "✓".green(), deckhand::utils::format_size(*bytes))
            }
            ConversionOutcome::Failed { reason, .. } => println!("{} {}", "✗".red(), reason),
        }
        report.push(outcome);
    }

    print_summary(&report);
    Ok(report.exit_code())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::from_env();

    let result = match &cli.command {
        Some(Commands::GeneratePptx(args)) => run_generate_pptx(args, &config),
        Some(Commands::SvgToPng(args)) => run_svg_to_png(args, &config),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "✗ Error:".red(), e);
            std::process::exit(1);
        }
    }
}
