// ABOUTME: SVG to PNG batch conversion for the deckhand application
// ABOUTME: Finds SVG files by pattern and converts each one, collecting per-file outcomes

use crate::errors::{DeckError, Result};
use crate::exec::Cmd;
use crate::install::RSVG_CONVERT;
use crate::native;
use crate::utils;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_EXIT_CODE: usize = 255;

/// Which rasterizer does the work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backend {
    /// Shell out to `rsvg-convert` with explicit output dimensions.
    Rsvg,
    /// Render in-process with resvg at a multiple of the intrinsic size.
    Native { scale: f32 },
}

/// Configuration for a conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub width: u32,
    pub height: u32,
    pub pattern: String,
    pub directory: PathBuf,
    /// Per-file limit for `rsvg-convert`.
    pub timeout_secs: u64,
    pub backend: Backend,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            pattern: "*featured*.svg".to_string(),
            directory: PathBuf::from("."),
            timeout_secs: 30,
            backend: Backend::Rsvg,
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted {
        source: PathBuf,
        output: PathBuf,
        bytes: u64,
        dimensions: Option<(u32, u32)>,
    },
    Failed {
        source: PathBuf,
        reason: String,
    },
}

impl ConversionOutcome {
    pub fn source(&self) -> &Path {
        match self {
            ConversionOutcome::Converted { source, .. } | ConversionOutcome::Failed { source, .. } => {
                source
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

/// Outcomes of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    pub outcomes: Vec<ConversionOutcome>,
}

impl ConversionReport {
    pub fn push(&mut self, outcome: ConversionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.successful()
    }

    pub fn failed_files(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.source())
            .collect()
    }

    /// Process exit code: the number of failed conversions, saturating at
    /// 255 since exit statuses are truncated to 8 bits.
    pub fn exit_code(&self) -> i32 {
        self.failed().min(MAX_EXIT_CODE) as i32
    }
}

/// Find SVG files matching `pattern` inside `dir`, sorted. Directories that
/// happen to match are skipped. Only `pattern` is glob syntax; `dir` is
/// matched literally.
pub fn find_svg_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    utils::validate_directory_exists(dir)?;
    let glob_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let mut paths: Vec<PathBuf> = glob::glob(&glob_pattern)
        .map_err(|e| DeckError::ValidationError(format!("Invalid glob pattern: {}", e)))?
        .flatten()
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(DeckError::NoFilesFoundError(pattern.to_string()));
    }
    Ok(paths)
}

/// Output path for an SVG: `.svg` in the file name becomes `.png`.
pub fn png_path_for(svg_file: &Path) -> PathBuf {
    let name = svg_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let png_name = if name.contains(".svg") {
        name.replace(".svg", ".png")
    } else {
        format!("{}.png", name)
    };
    svg_file.with_file_name(png_name)
}

/// Convert with `rsvg-convert`, forcing the output to `width` x `height`.
pub fn convert_with_rsvg(
    svg_file: &Path,
    png_file: &Path,
    width: u32,
    height: u32,
    timeout: Duration,
) -> Result<()> {
    Cmd::new(RSVG_CONVERT)
        .arg("-w")
        .arg(width.to_string())
        .arg("-h")
        .arg(height.to_string())
        .arg(svg_file)
        .arg("-o")
        .arg(png_file)
        .timeout(timeout)
        .run()?;
    Ok(())
}

fn failure_reason(error: &DeckError, timeout_secs: u64) -> String {
    match error {
        DeckError::TimeoutError(_) => format!("Conversion timeout (>{}s)", timeout_secs),
        DeckError::CommandFailed { stderr, .. } => format!("Conversion error: {}", stderr),
        other => other.to_string(),
    }
}

/// Convert one file. Failures are reported in the outcome, never returned.
pub fn convert_one(svg_file: &Path, config: &ConvertConfig) -> ConversionOutcome {
    let png_file = png_path_for(svg_file);

    let result = match config.backend {
        Backend::Rsvg => convert_with_rsvg(
            svg_file,
            &png_file,
            config.width,
            config.height,
            Duration::from_secs(config.timeout_secs),
        ),
        Backend::Native { scale } => {
            native::render_svg_to_png(svg_file, &png_file, scale).map(|_| ())
        }
    }
    .and_then(|_| Ok(fs::metadata(&png_file)?.len()));

    match result {
        Ok(bytes) => ConversionOutcome::Converted {
            source: svg_file.to_path_buf(),
            dimensions: image::image_dimensions(&png_file).ok(),
            output: png_file,
            bytes,
        },
        Err(e) => {
            warn!("Failed to convert {:?}: {}", svg_file, e);
            ConversionOutcome::Failed {
                source: svg_file.to_path_buf(),
                reason: failure_reason(&e, config.timeout_secs),
            }
        }
    }
}

/// Convert every file in order. One failure never stops the batch.
pub fn convert_batch(files: &[PathBuf], config: &ConvertConfig) -> ConversionReport {
    let mut report = ConversionReport::default();
    for file in files {
        let outcome = convert_one(file, config);
        if let ConversionOutcome::Converted { bytes, .. } = &outcome {
            info!("Converted {:?} ({})", file, utils::format_size(*bytes));
        }
        report.push(outcome);
    }
    info!(
        "Conversion finished: {} succeeded, {} failed",
        report.successful(),
        report.failed()
    );
    report
}
