//! Line-oriented parsing of the markdown subset LLMs answer with.
//!
//! Only line prefixes matter: `**` starts a heading, `*` starts a list
//! item, anything else is a paragraph. Parsing never fails.

use console::Style;
use serde::Serialize;

/// Section labels that mark a heading as a sub-heading of the report.
const SECTION_LABELS: &[&str] = &["Archetype:", "Summary:", "Hypothesis:", "Questions:"];

/// One rendered block of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "camelCase")]
pub enum ContentNode {
    /// A top-level heading.
    Heading(String),
    /// A labelled section heading such as `Profile Summary:`.
    SubHeading(String),
    /// A bullet point.
    ListItem(String),
    /// Plain text.
    Paragraph(String),
}

impl ContentNode {
    /// The node's text without markup.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(t) | Self::SubHeading(t) | Self::ListItem(t) | Self::Paragraph(t) => t,
        }
    }
}

fn strip_bold(line: &str) -> String {
    line.replace("**", "")
}

fn parse_line(line: &str) -> Option<ContentNode> {
    if line.trim().is_empty() {
        return None;
    }

    if line.starts_with("**") {
        let text = strip_bold(line).trim().to_string();
        return Some(if SECTION_LABELS.iter().any(|l| text.contains(l)) {
            ContentNode::SubHeading(text)
        } else {
            ContentNode::Heading(text)
        });
    }

    if let Some(rest) = line.strip_prefix('*') {
        return Some(ContentNode::ListItem(strip_bold(rest).trim().to_string()));
    }

    Some(ContentNode::Paragraph(line.to_string()))
}

/// Splits `text` into content nodes, one per non-blank line.
#[must_use]
pub fn parse_insight_text(text: &str) -> Vec<ContentNode> {
    text.lines().filter_map(parse_line).collect()
}

/// Renders nodes for a terminal.
#[must_use]
pub fn render_nodes(nodes: &[ContentNode]) -> String {
    let heading = Style::new().bold().blue();
    let sub_heading = Style::new().bold();

    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Heading(t) => {
                out.push('\n');
                out.push_str(&heading.apply_to(t).to_string());
            }
            ContentNode::SubHeading(t) => {
                out.push('\n');
                out.push_str(&sub_heading.apply_to(t).to_string());
            }
            ContentNode::ListItem(t) => {
                out.push_str("  • ");
                out.push_str(t);
            }
            ContentNode::Paragraph(t) => out.push_str(t),
        }
        out.push('\n');
    }
    out
}

/// Parses and renders generated text in one go.
#[must_use]
pub fn render_insight(text: &str) -> String {
    render_nodes(&parse_insight_text(text))
}

/// Error block shown in place of a narrative that failed to generate.
#[must_use]
pub fn render_error(subject: &str, message: &str) -> String {
    format!(
        "{} {}\n{message}\n",
        Style::new().bold().red().apply_to("Error:"),
        Style::new().bold().apply_to(subject),
    )
}
