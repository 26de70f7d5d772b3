//! Splits raw answer text into fenced code segments and prose segments.

use std::sync::LazyLock;

use regex::Regex;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?s:.*?)```").expect("valid fence regex"));

static FENCE_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```([\w+#.-]*)[ \t]*\r?\n((?s:.*))```$").expect("valid fence regex")
});

/// A well-formed fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Language tag written right after the opening fence, if any.
    pub language: Option<&'a str>,
    /// Everything between the opening fence line and the closing fence.
    pub body: &'a str,
}

impl<'a> Fence<'a> {
    /// Parse a triple-backtick block. Returns `None` when the opening fence
    /// is not followed by an optional language tag and a newline.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let caps = FENCE_PARTS.captures(raw)?;
        let language = caps.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty());
        let body = caps.get(2).map_or("", |m| m.as_str());
        Some(Self { language, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Code(Fence<'a>),
    Prose(&'a str),
}

/// Split `text` into ordered segments.
///
/// Malformed fences are left in the prose, and adjacent prose pieces are
/// merged so a stray run of backticks never breaks a line apart.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut prose_start = 0;

    for m in FENCED_BLOCK.find_iter(text) {
        let Some(fence) = Fence::parse(m.as_str()) else {
            log::debug!("triple backticks at byte {} are not a fence, kept as prose", m.start());
            continue;
        };
        if prose_start < m.start() {
            segments.push(Segment::Prose(&text[prose_start..m.start()]));
        }
        segments.push(Segment::Code(fence));
        prose_start = m.end();
    }
    if prose_start < text.len() {
        segments.push(Segment::Prose(&text[prose_start..]));
    }

    segments
}
