// ABOUTME: PPTX generation module for the deckhand application
// ABOUTME: Collects rendered slide layouts and writes them as a PowerPoint package

mod parts;
mod shapes;

pub use shapes::{
    inches, Align, Anchor, Color, Frame, Paragraph, Shape, ShapeKind, SlideLayout, EMU_PER_INCH,
};

use crate::errors::Result;
use crate::utils;
use log::info;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

/// Configuration for PPTX generation
#[derive(Debug, Clone)]
pub struct PptxConfig {
    pub title: String,
    /// Slide width in EMU.
    pub slide_width: i64,
    /// Slide height in EMU.
    pub slide_height: i64,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            slide_width: inches(16.0),
            slide_height: inches(9.0),
        }
    }
}

/// An in-progress presentation. Slides can only be appended.
#[derive(Debug, Clone)]
pub struct Presentation {
    config: PptxConfig,
    slides: Vec<SlideLayout>,
}

impl Presentation {
    pub fn new(config: PptxConfig) -> Self {
        Self {
            config,
            slides: Vec::new(),
        }
    }

    pub fn config(&self) -> &PptxConfig {
        &self.config
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    /// Append a slide and return its 1-based page number.
    pub fn add_slide(&mut self, slide: SlideLayout) -> usize {
        self.slides.push(slide);
        self.slides.len()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[SlideLayout] {
        &self.slides
    }

    /// Write the presentation to `output_file`, creating parent directories.
    pub fn save(&self, output_file: &Path) -> Result<()> {
        info!("Writing PPTX to {:?}", output_file);
        utils::ensure_parent_directory_exists(output_file)?;

        let file = fs::File::create(output_file)?;
        self.write_to(file)?;

        info!("PPTX file created at {:?}", output_file);
        Ok(())
    }

    /// Write the package to any seekable writer and hand the writer back.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let slide_count = self.slides.len();
        let mut zip = ZipWriter::new(writer);

        info!("Creating PPTX structure: [Content_Types].xml");
        zip.start_file("[Content_Types].xml", FileOptions::default())?;
        zip.write_all(parts::content_types(slide_count).as_bytes())?;

        info!("Creating PPTX structure: _rels/.rels");
        zip.start_file("_rels/.rels", FileOptions::default())?;
        zip.write_all(parts::ROOT_RELS.as_bytes())?;

        info!("Creating PPTX structure: docProps");
        zip.start_file("docProps/app.xml", FileOptions::default())?;
        zip.write_all(parts::app_properties(slide_count).as_bytes())?;

        zip.start_file("docProps/core.xml", FileOptions::default())?;
        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        zip.write_all(parts::core_properties(&self.config.title, &created).as_bytes())?;

        info!("Creating PPTX structure: ppt/presentation.xml");
        zip.start_file("ppt/presentation.xml", FileOptions::default())?;
        let presentation = parts::presentation(
            slide_count,
            self.config.slide_width,
            self.config.slide_height,
        );
        zip.write_all(presentation.as_bytes())?;

        zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())?;
        zip.write_all(parts::presentation_rels(slide_count).as_bytes())?;

        info!("Creating PPTX structure: master, layout and theme");
        zip.start_file("ppt/slideMasters/slideMaster1.xml", FileOptions::default())?;
        zip.write_all(parts::slide_master().as_bytes())?;
        zip.start_file(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            FileOptions::default(),
        )?;
        zip.write_all(parts::slide_master_rels().as_bytes())?;

        zip.start_file("ppt/slideLayouts/slideLayout1.xml", FileOptions::default())?;
        zip.write_all(parts::slide_layout().as_bytes())?;
        zip.start_file(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            FileOptions::default(),
        )?;
        zip.write_all(parts::slide_layout_rels().as_bytes())?;

        zip.start_file("ppt/theme/theme1.xml", FileOptions::default())?;
        zip.write_all(parts::THEME.as_bytes())?;

        for (i, slide) in self.slides.iter().enumerate() {
            let slide_num = i + 1;
            info!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);

            zip.start_file(
                format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                FileOptions::default(),
            )?;
            zip.write_all(parts::slide_rels().as_bytes())?;

            zip.start_file(
                format!("ppt/slides/slide{}.xml", slide_num),
                FileOptions::default(),
            )?;
            zip.write_all(slide.to_xml().as_bytes())?;
        }

        info!("Finalizing PPTX file");
        let writer = zip.finish()?;
        Ok(writer)
    }
}
