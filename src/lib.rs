// ABOUTME: Library module for the deckhand program.
// ABOUTME: Markdown-to-PPTX slide generation and SVG-to-PNG batch conversion.

// Reexport modules
pub mod config;
pub mod convert;
pub mod deck;
pub mod errors;
pub mod exec;
pub mod install;
pub mod native;
pub mod parser;
pub mod platform;
pub mod pptx;
pub mod render;
pub mod slide;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use convert::{
    convert_batch, convert_one, find_svg_files, png_path_for, Backend, ConversionOutcome,
    ConversionReport, ConvertConfig,
};
pub use deck::{
    build_presentation, build_presentation_with_progress, classify, generate_deck,
    generate_deck_with_progress, DeckConfig, DeckProgress, DeckSummary,
};
pub use errors::{DeckError, Result};
pub use install::ensure_rsvg_convert;
pub use parser::parse_markdown_slides;
pub use pptx::{PptxConfig, Presentation, SlideLayout};
pub use render::{render_slide, RenderConfig, Theme};
pub use slide::{SlideKind, SlideRecord, SlideStyle};
