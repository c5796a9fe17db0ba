// ABOUTME: Deck generation module for the deckhand application
// ABOUTME: Drives parsing, slide classification, rendering and PPTX output

use crate::errors::Result;
use crate::parser::parse_markdown_slides;
use crate::pptx::{PptxConfig, Presentation};
use crate::render::{render_slide, RenderConfig};
use crate::slide::{SlideKind, SlideRecord, SlideStyle};
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for deck generation
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Document title stored in the package properties. Defaults to the
    /// first slide's title.
    pub title: Option<String>,
    /// Content slides whose title contains one of these become section dividers.
    pub divider_keywords: Vec<String>,
    pub render: RenderConfig,
    pub pptx: PptxConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            title: None,
            divider_keywords: vec!["Key Takeaways".to_string(), "Questions".to_string()],
            render: RenderConfig::default(),
            pptx: PptxConfig::default(),
        }
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    pub slide_count: usize,
    pub output: PathBuf,
}

/// Pick the visual style for the record at 1-based `position`.
pub fn classify(record: &SlideRecord, position: usize, divider_keywords: &[String]) -> SlideStyle {
    if record.kind == SlideKind::Title && position == 1 {
        SlideStyle::Title
    } else if record.kind == SlideKind::Code {
        SlideStyle::Code
    } else if divider_keywords
        .iter()
        .any(|keyword| record.title.contains(keyword.as_str()))
    {
        SlideStyle::Section
    } else {
        SlideStyle::Content
    }
}

/// Progress reported while a deck is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckProgress<'a> {
    Parsed {
        slides: usize,
    },
    Slide {
        position: usize,
        total: usize,
        style: SlideStyle,
        title: &'a str,
    },
}

/// Render parsed records into a presentation, in order.
pub fn build_presentation(records: &[SlideRecord], config: &DeckConfig) -> Presentation {
    build_presentation_with_progress(records, config, |_| {})
}

/// Like [`build_presentation`], calling `progress` before each slide.
pub fn build_presentation_with_progress<F>(
    records: &[SlideRecord],
    config: &DeckConfig,
    mut progress: F,
) -> Presentation
where
    F: FnMut(DeckProgress<'_>),
{
    let mut presentation = Presentation::new(config.pptx.clone());
    let title = config
        .title
        .clone()
        .or_else(|| records.first().map(|r| r.title.clone()))
        .filter(|t| !t.is_empty());
    if let Some(title) = title {
        presentation.set_title(title);
    }

    let total = records.len();
    for (i, record) in records.iter().enumerate() {
        let position = i + 1;
        let style = classify(record, position, &config.divider_keywords);
        info!(
            "Creating slide {}/{} ({:?}): {}",
            position,
            total,
            style,
            utils::truncate_chars(&record.title, 50)
        );
        progress(DeckProgress::Slide {
            position,
            total,
            style,
            title: &record.title,
        });

        let page = presentation.slide_count() + 1;
        let layout = render_slide(record, style, page, &config.render);
        presentation.add_slide(layout);
    }
    presentation
}

/// Generate a PPTX deck from the markdown file at `input`.
pub fn generate_deck(input: &Path, output: &Path, config: &DeckConfig) -> Result<DeckSummary> {
    generate_deck_with_progress(input, output, config, |_| {})
}

/// Like [`generate_deck`], reporting parse and per-slide progress.
pub fn generate_deck_with_progress<F>(
    input: &Path,
    output: &Path,
    config: &DeckConfig,
    mut progress: F,
) -> Result<DeckSummary>
where
    F: FnMut(DeckProgress<'_>),
{
    info!("Reading slides content from {:?}", input);
    utils::validate_file_exists(input)?;
    let markdown = fs::read_to_string(input)?;

    let records = parse_markdown_slides(&markdown);
    info!("Found {} slides", records.len());
    progress(DeckProgress::Parsed {
        slides: records.len(),
    });

    let presentation = build_presentation_with_progress(&records, config, progress);
    presentation.save(output)?;

    Ok(DeckSummary {
        slide_count: presentation.slide_count(),
        output: output.to_path_buf(),
    })
}
