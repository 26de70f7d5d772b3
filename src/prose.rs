//! Line-by-line processing of the prose between code fences.
//!
//! Every line goes through a chain of small pure steps:
//! [`strip_math`] then [`rewrite_atx_heading`] then [`classify_line`], which
//! in turn uses [`parse_inline`] for emphasis. Runs of lines starting with
//! `|` are buffered and handed to the table builder.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Node, Span};
use crate::table::{build_table, is_separator_row};

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}[ \t]+(.*)$").expect("valid heading regex"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));

/// Remove `$` math delimiters; answers are meant to use plain-text math.
pub fn strip_math(line: &str) -> Cow<'_, str> {
    if line.contains('$') {
        Cow::Owned(line.replace('$', ""))
    } else {
        Cow::Borrowed(line)
    }
}

/// Rewrite a `#`-style heading into a whole-line bold span, the form
/// section labels take in tutoring answers.
pub fn rewrite_atx_heading(line: &str) -> Cow<'_, str> {
    let Some(caps) = ATX_HEADING.captures(line) else {
        return Cow::Borrowed(line);
    };
    let title = caps.get(1).map_or("", |m| m.as_str()).replace("**", "");
    let title = title.trim();
    if title.is_empty() {
        Cow::Owned(String::new())
    } else {
        Cow::Owned(format!("**{title}**"))
    }
}

/// The label of a line that is exactly one bold span, e.g. `**DRY RUN**`.
fn section_label(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix("**")?.strip_suffix("**")?;
    let label = inner.trim();
    (!label.is_empty() && !inner.contains("**")).then_some(label)
}

/// Bullet lines start with `* ` (leading whitespace allowed).
fn bullet_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("*\t"))
}

/// Classify one prepared line. Blank lines produce no node.
pub fn classify_line(line: &str) -> Option<Node> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(label) = section_label(trimmed) {
        return Some(Node::heading(label));
    }
    if let Some(text) = bullet_text(trimmed) {
        return Some(Node::ListItem {
            content: parse_inline(text.trim()),
        });
    }
    Some(Node::Paragraph {
        content: parse_inline(trimmed),
    })
}

/// Run one raw prose line through the whole step chain.
pub fn process_line(line: &str) -> Option<Node> {
    let line = strip_math(line);
    let line = rewrite_atx_heading(&line);
    classify_line(&line)
}

/// Split inline text into plain, `**bold**` and `` `code` `` spans.
///
/// Bold is matched first, so a bold span may contain inline code but not the
/// other way round. Unmatched markers stay in the text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;
    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_code_spans(&mut spans, &text[last..whole.start()]);
        let mut bold = Vec::new();
        push_code_spans(&mut bold, inner.as_str());
        spans.push(Span::Bold(bold));
        last = whole.end();
    }
    push_code_spans(&mut spans, &text[last..]);
    spans
}

fn push_code_spans(spans: &mut Vec<Span>, text: &str) {
    let mut last = 0;
    for caps in INLINE_CODE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(spans, &text[last..whole.start()]);
        spans.push(Span::Code(inner.as_str().to_string()));
        last = whole.end();
    }
    push_text(spans, &text[last..]);
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}

fn flush_table(pending: &mut Vec<&str>, nodes: &mut Vec<Node>) {
    if pending.is_empty() {
        return;
    }
    match build_table(pending) {
        Some(table) => nodes.push(Node::Table(table)),
        None => {
            // Keep the text of rows that could not form a table.
            log::warn!("table without header cells, keeping {} rows as text", pending.len());
            nodes.extend(
                pending
                    .iter()
                    .filter(|line| !is_separator_row(line))
                    .filter_map(|line| process_line(line)),
            );
        }
    }
    pending.clear();
}

/// Convert a prose segment into nodes, in source order.
pub fn process(segment: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for line in segment.lines() {
        if line.trim_start().starts_with('|') {
            pending.push(line);
            continue;
        }
        flush_table(&mut pending, &mut nodes);
        if let Some(node) = process_line(line) {
            nodes.push(node);
        }
    }
    flush_table(&mut pending, &mut nodes);

    nodes
}
