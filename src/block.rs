use serde::Serialize;

use crate::highlight::Token;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Code(String),
}

impl Span {
    /// Visible text of the span, without emphasis markers.
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text(text) | Span::Code(text) => text.clone(),
            Span::Bold(inner) => spans_plain_text(inner),
        }
    }
}

pub(crate) fn spans_plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::plain_text).collect()
}

/// One source line of a code block together with its highlighting tokens.
///
/// `source` is the line verbatim. `tokens` cover the HTML-escaped form of
/// the line, so their concatenated text equals `escape_html(&source)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    pub source: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Fence language tag, `"code"` when the fence has none.
    pub language: String,
    pub lines: Vec<CodeLine>,
}

impl CodeBlock {
    /// The code body as written, lines joined with `\n`.
    pub fn source(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.source.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A pipe table. Rows hold at most `headers.len()` cells; short rows stay short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Block-level nodes, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Paragraph { content: Vec<Span> },
    Heading { text: String },
    CodeBlock(CodeBlock),
    Table(Table),
    ListItem { content: Vec<Span> },
}

impl Node {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            content: vec![Span::Text(text.into())],
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Node::Heading { text: text.into() }
    }

    /// Visible text content of the node.
    ///
    /// Table cells are joined with single spaces, rows with newlines; code
    /// blocks yield their verbatim source.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Paragraph { content } | Node::ListItem { content } => spans_plain_text(content),
            Node::Heading { text } => text.clone(),
            Node::CodeBlock(code) => code.source(),
            Node::Table(table) => std::iter::once(&table.headers)
                .chain(table.rows.iter())
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
