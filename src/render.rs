// ABOUTME: Slide rendering module for the deckhand application
// ABOUTME: Turns parsed slide records into styled slide layouts using an explicit theme

use crate::pptx::{Align, Anchor, Color, Frame, Paragraph, Shape, SlideLayout};
use crate::slide::{SlideRecord, SlideStyle};

/// Palette and typography shared by every slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub dark: Color,
    pub light: Color,
    pub on_primary: Color,
    pub code_background: Color,
    pub code_text: Color,
    pub footer_text: Color,
    pub code_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0, 102, 204),
            secondary: Color::rgb(255, 87, 34),
            dark: Color::rgb(33, 33, 33),
            light: Color::rgb(250, 250, 250),
            on_primary: Color::WHITE,
            code_background: Color::rgb(40, 44, 52),
            code_text: Color::rgb(171, 178, 191),
            footer_text: Color::rgb(150, 150, 150),
            code_font: "Consolas".to_string(),
        }
    }
}

/// Configuration for slide rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub theme: Theme,
    /// Leading characters that mark a status line.
    pub status_icons: Vec<String>,
    /// Text shown before the page number in footers.
    pub footer_text: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            status_icons: vec!["✅".to_string(), "❌".to_string(), "🔹".to_string()],
            footer_text: None,
        }
    }
}

/// How a single body line of a content slide is styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStyle {
    Bullet(String),
    SubBullet(String),
    Emphasis(String),
    Icon(String),
    Plain(String),
}

/// Classify one body line. Rules are tried in order; the first match wins.
/// Blank lines yield `None`.
pub fn classify_line(line: &str, status_icons: &[String]) -> Option<LineStyle> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("• ")) {
        return Some(LineStyle::Bullet(rest.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix("  - ") {
        return Some(LineStyle::SubBullet(rest.trim().to_string()));
    }
    if line.starts_with("**") && line.ends_with("**") {
        return Some(LineStyle::Emphasis(line.trim_matches('*').to_string()));
    }
    if status_icons.iter().any(|icon| line.starts_with(icon.as_str())) {
        return Some(LineStyle::Icon(line.to_string()));
    }
    if !line.trim().is_empty() {
        return Some(LineStyle::Plain(line.to_string()));
    }
    None
}

/// Format the body of a content slide, one paragraph per non-blank line.
pub fn format_content(content: &str, config: &RenderConfig) -> Vec<Paragraph> {
    let theme = &config.theme;
    content
        .trim()
        .split('\n')
        .filter_map(|line| classify_line(line, &config.status_icons))
        .map(|style| match style {
            LineStyle::Bullet(text) => Paragraph::new(text)
                .bullet(0)
                .size(22)
                .color(theme.dark)
                .space_before(6),
            LineStyle::SubBullet(text) => Paragraph::new(text).bullet(1).size(20).color(theme.dark),
            LineStyle::Emphasis(text) => Paragraph::new(text)
                .size(24)
                .bold()
                .color(theme.primary)
                .space_before(12),
            LineStyle::Icon(text) => Paragraph::new(text)
                .size(22)
                .color(theme.dark)
                .space_before(8),
            LineStyle::Plain(text) => Paragraph::new(text)
                .size(22)
                .color(theme.dark)
                .space_before(6),
        })
        .collect()
}

/// Footer text for a 1-based page number.
pub fn footer_label(page: usize, config: &RenderConfig) -> String {
    match config.footer_text.as_deref() {
        Some(text) if !text.is_empty() => format!("{}  |  Slide {}", text, page),
        _ => format!("Slide {}", page),
    }
}

/// Render one slide. `page` is the slide's 1-based position in the deck and
/// only shows up in the footer of content and code slides.
pub fn render_slide(
    record: &SlideRecord,
    style: SlideStyle,
    page: usize,
    config: &RenderConfig,
) -> SlideLayout {
    let mut layout = match style {
        SlideStyle::Title => {
            let mut lines = record.content.lines().filter(|l| !l.trim().is_empty());
            let subtitle = lines.next().unwrap_or("");
            let info: Vec<&str> = lines.collect();
            render_title(&record.title, subtitle, &info, config)
        }
        SlideStyle::Section => render_section(&record.title, "", config),
        SlideStyle::Content => render_content(&record.title, &record.content, config),
        SlideStyle::Code => render_code(&record.title, &record.content, record.language(), config),
    };

    if style.has_footer() {
        layout.push(footer(page, config));
    }
    layout
}

fn render_title(title: &str, subtitle: &str, info: &[&str], config: &RenderConfig) -> SlideLayout {
    let theme = &config.theme;
    let mut layout = SlideLayout::new(theme.primary);

    layout.push(
        Shape::text_box(Frame::inches(1.0, 2.5, 14.0, 2.0)).paragraph(
            Paragraph::new(title)
                .size(60)
                .bold()
                .color(theme.on_primary)
                .align(Align::Center),
        ),
    );
    layout.push(
        Shape::text_box(Frame::inches(1.0, 4.5, 14.0, 1.0)).paragraph(
            Paragraph::new(subtitle)
                .size(32)
                .color(theme.on_primary)
                .align(Align::Center),
        ),
    );
    if !info.is_empty() {
        layout.push(
            Shape::text_box(Frame::inches(1.0, 6.5, 14.0, 1.5)).paragraphs(info.iter().map(
                |line| {
                    Paragraph::new(line.trim())
                        .size(18)
                        .color(theme.on_primary)
                        .align(Align::Center)
                },
            )),
        );
    }
    layout
}

fn render_section(title: &str, subtitle: &str, config: &RenderConfig) -> SlideLayout {
    let theme = &config.theme;
    let mut layout = SlideLayout::new(theme.primary);

    layout.push(
        Shape::text_box(Frame::inches(1.0, 3.0, 14.0, 2.0)).paragraph(
            Paragraph::new(title)
                .size(54)
                .bold()
                .color(theme.on_primary)
                .align(Align::Center),
        ),
    );
    if !subtitle.is_empty() {
        layout.push(
            Shape::text_box(Frame::inches(1.0, 5.5, 14.0, 1.0)).paragraph(
                Paragraph::new(subtitle)
                    .size(28)
                    .color(theme.on_primary)
                    .align(Align::Center),
            ),
        );
    }
    layout
}

fn render_content(title: &str, content: &str, config: &RenderConfig) -> SlideLayout {
    let theme = &config.theme;
    let mut layout = SlideLayout::new(theme.light);

    layout.push(
        Shape::rectangle(Frame::inches(0.0, 0.0, 16.0, 1.2), theme.primary)
            .anchor(Anchor::Middle)
            .paragraph(
                Paragraph::new(title)
                    .size(36)
                    .bold()
                    .color(theme.on_primary)
                    .align(Align::Left),
            ),
    );

    let body = format_content(content, config);
    if !body.is_empty() {
        layout.push(
            Shape::text_box(Frame::inches(0.5, 1.5, 15.0, 7.0))
                .word_wrap(true)
                .paragraphs(body),
        );
    }
    layout
}

fn render_code(title: &str, code: &str, language: &str, config: &RenderConfig) -> SlideLayout {
    let theme = &config.theme;
    let mut layout = SlideLayout::new(theme.light);

    layout.push(
        Shape::text_box(Frame::inches(0.5, 0.3, 15.0, 0.8))
            .paragraph(Paragraph::new(title).size(32).bold().color(theme.dark)),
    );

    // Code keeps its own line breaks and indentation.
    layout.push(
        Shape::rectangle(Frame::inches(0.5, 1.3, 15.0, 7.2), theme.code_background)
            .word_wrap(false)
            .paragraphs(code.split('\n').map(|line| {
                Paragraph::new(line)
                    .font(theme.code_font.as_str())
                    .size(16)
                    .color(theme.code_text)
            })),
    );

    if !language.is_empty() {
        layout.push(
            Shape::text_box(Frame::inches(13.5, 1.0, 2.0, 0.4)).paragraph(
                Paragraph::new(language.to_uppercase())
                    .size(12)
                    .bold()
                    .color(theme.secondary)
                    .align(Align::Right),
            ),
        );
    }
    layout
}

fn footer(page: usize, config: &RenderConfig) -> Shape {
    Shape::text_box(Frame::inches(0.5, 8.3, 15.0, 0.4)).paragraph(
        Paragraph::new(footer_label(page, config))
            .size(12)
            .color(config.theme.footer_text)
            .align(Align::Center),
    )
}
