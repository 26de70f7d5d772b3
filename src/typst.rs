use crate::block::{CodeBlock, Node, Span, Table};
use crate::config::Config;

/// Convert nodes to Typst markup
pub fn nodes_to_typst(nodes: &[Node], config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    if config.font.sans {
        out.push_str("#set text(font: (\"Open Sans\", \"DejaVu Sans\"))\n");
    }
    out.push('\n');

    let mut i = 0;
    while i < nodes.len() {
        match &nodes[i] {
            Node::Heading { text } if config.layout.keep_heading_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(text, &mut out);

                if i + 1 < nodes.len() {
                    i += 1;
                    i = emit_run(nodes, i, config, &mut out);
                } else {
                    i += 1;
                }
                out.push_str("]\n\n");
            }
            _ => {
                i = emit_run(nodes, i, config, &mut out);
            }
        }
    }

    out
}

/// Emit the node at `start`, or the whole run of list items starting there.
/// Returns the index of the first node not emitted.
fn emit_run(nodes: &[Node], start: usize, config: &Config, out: &mut String) -> usize {
    let items: Vec<&[Span]> = nodes[start..]
        .iter()
        .map_while(|node| match node {
            Node::ListItem { content } => Some(content.as_slice()),
            _ => None,
        })
        .collect();

    if items.is_empty() {
        emit_node(&nodes[start], out);
        return start + 1;
    }

    // Wrap list to keep together when small, allow breaks when large
    if items.len() <= config.layout.unbreakable_list_items {
        out.push_str("#block(breakable: false)[\n");
        list_to_typst(&items, out);
        out.push_str("]\n\n");
    } else {
        list_to_typst(&items, out);
        out.push('\n');
    }
    start + items.len()
}

fn emit_heading(text: &str, out: &mut String) {
    out.push_str("= ");
    escape_text(text, out);
    out.push_str("\n\n");
}

fn emit_node(node: &Node, out: &mut String) {
    match node {
        Node::Heading { text } => {
            emit_heading(text, out);
        }
        Node::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Node::CodeBlock(code) => {
            // Keep code blocks together when possible
            out.push_str("#block(breakable: false)[\n");
            code_to_typst(code, out);
            out.push_str("]\n\n");
        }
        Node::ListItem { content } => {
            list_to_typst(&[content.as_slice()], out);
            out.push('\n');
        }
        Node::Table(table) => {
            // Keep tables together when possible
            out.push_str("#block(breakable: false)[\n");
            table_to_typst(table, out);
            out.push_str("]\n\n");
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    // `1. ` at the start of content is an enum marker
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let marker = digits > 0 && text[digits..].starts_with('.');

    for (i, ch) in text.char_indices() {
        match ch {
            '.' if marker && i == digits => out.push_str("\\."),
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '-' | '+'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => escape_text(text, out),
            // `*..*` is not recognised inside a word, so bold goes through
            // a function call. The `;` ends the call before text such as
            // `(x)` or `.size()` can extend it.
            Span::Bold(inner) => {
                out.push_str("#strong[");
                spans_to_typst(inner, out);
                out.push_str("];");
            }
            Span::Code(text) => {
                out.push_str("#raw(\"");
                escape_string(text, out);
                out.push_str("\");");
            }
        }
    }
}

/// Escape for a Typst string literal.
fn escape_string(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn code_to_typst(code: &CodeBlock, out: &mut String) {
    let source = code.source();
    // A raw block ends at a fence as long as its opening one.
    let longest_run = source
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);

    out.push_str(&fence);
    out.push_str(&code.language);
    out.push('\n');
    out.push_str(&source);
    out.push('\n');
    out.push_str(&fence);
    out.push('\n');
}

fn list_to_typst(items: &[&[Span]], out: &mut String) {
    for content in items {
        out.push_str("- ");
        spans_to_typst(content, out);
        out.push('\n');
    }
}

fn table_to_typst(table: &Table, out: &mut String) {
    let col_count = table.headers.len();
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Header cells (bold)
    for cell in &table.headers {
        out.push_str("  [*");
        escape_text(cell, out);
        out.push_str("*],\n");
    }

    // Short rows are padded so every row fills the grid
    for row in &table.rows {
        for j in 0..col_count {
            out.push_str("  [");
            if let Some(cell) = row.get(j) {
                escape_text(cell, out);
            }
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}
