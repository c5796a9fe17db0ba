// ABOUTME: Markdown slide parser for the deckhand application
// ABOUTME: Splits a markdown document into an ordered list of slide records

use crate::slide::{SlideKind, SlideRecord};
use log::debug;

const SEPARATOR: &str = "---";
const TITLE_PREFIX: &str = "# ";
const HEADING_PREFIX: &str = "## ";
const FENCE: &str = "```";

/// The slide currently being assembled while scanning lines.
#[derive(Default)]
struct SlideAccumulator {
    title: String,
    content: String,
    kind: SlideKind,
    language: Option<String>,
}

impl SlideAccumulator {
    fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Move the pending slide into `slides` if it holds a title or content.
    /// The accumulator is reset either way.
    fn flush(&mut self, slides: &mut Vec<SlideRecord>) {
        let pending = std::mem::take(self);
        if pending.is_empty() {
            return;
        }
        slides.push(SlideRecord {
            title: pending.title,
            content: pending.content,
            kind: pending.kind,
            language: pending.language,
        });
    }
}

/// Parse a markdown document into slides.
///
/// Recognized constructs, matched against each trimmed line:
/// - `---` ends the current slide
/// - `# Title` names the current slide if it has no title yet; on the first
///   line of the document it also marks the slide as the title slide
/// - `## Heading` ends the current slide and starts a new one
/// - a fenced block turns the slide into a code slide, the fence tail being
///   its language
/// - any other non-blank line is appended to the body
///
/// Blank lines outside fences are dropped. An unterminated fence runs to the
/// end of the document. Parsing never fails.
pub fn parse_markdown_slides(document: &str) -> Vec<SlideRecord> {
    let mut slides = Vec::new();
    let mut current = SlideAccumulator::default();
    let mut lines = document.split('\n').enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim();

        if line == SEPARATOR {
            current.flush(&mut slides);
            continue;
        }

        // A second `# ` heading on the same slide is kept as body text.
        if let Some(title) = line.strip_prefix(TITLE_PREFIX) {
            if current.title.is_empty() {
                current.title = title.trim().to_string();
                current.kind = if index == 0 {
                    SlideKind::Title
                } else {
                    SlideKind::Content
                };
                continue;
            }
        }

        if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
            if !current.is_empty() {
                current.flush(&mut slides);
            }
            current.title = heading.trim().to_string();
            continue;
        }

        if let Some(language) = line.strip_prefix(FENCE) {
            let mut code = Vec::new();
            for (_, raw) in lines.by_ref() {
                if raw.trim().starts_with(FENCE) {
                    break;
                }
                code.push(raw);
            }
            debug!(
                "Captured {} line code block ({:?}) on slide {:?}",
                code.len(),
                language.trim(),
                current.title
            );
            current.content = code.join("\n");
            current.kind = SlideKind::Code;
            current.language = Some(language.trim().to_string());
            continue;
        }

        if !line.is_empty() {
            current.content.push_str(line);
            current.content.push('\n');
        }
    }

    current.flush(&mut slides);
    slides
}
