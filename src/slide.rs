// ABOUTME: Slide model for the deckhand application
// ABOUTME: Plain value types passed from the markdown parser to the renderer

/// Kind assigned to a slide by the markdown parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideKind {
    /// Opening slide introduced by a `# ` heading on the first line.
    Title,
    #[default]
    Content,
    /// Slide whose body is a fenced code block.
    Code,
}

/// One parsed slide: title, body text, kind and optional code language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideRecord {
    pub title: String,
    pub content: String,
    pub kind: SlideKind,
    /// Text after the opening fence. Only set for code slides.
    pub language: Option<String>,
}

impl SlideRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: SlideKind) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
            language: None,
        }
    }

    pub fn code(
        title: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind: SlideKind::Code,
            language: Some(language.into()),
        }
    }

    /// A record with neither title nor content never becomes a slide.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Language tag, or an empty string when none was given.
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

/// Visual variant chosen when a record is placed into a deck.
///
/// `Section` has no parser counterpart: it is selected by title keyword,
/// overriding the parser's `Content` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideStyle {
    Title,
    Section,
    Content,
    Code,
}

impl SlideStyle {
    /// Title and section slides carry no page footer.
    pub fn has_footer(self) -> bool {
        matches!(self, SlideStyle::Content | SlideStyle::Code)
    }
}
