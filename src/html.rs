//! Trusted HTML rendering of parsed nodes.
//!
//! This is the only place markup is produced. Node text is escaped exactly
//! once here; code tokens arrive already escaped from the tokenizer and are
//! wrapped without escaping again.

use crate::block::{CodeBlock, Node, Span, Table};
use crate::config::HtmlConfig;
use crate::highlight::escape_html;

/// Convert nodes to an HTML fragment
pub fn nodes_to_html(nodes: &[Node], config: &HtmlConfig) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"answer\">\n");

    let mut i = 0;
    while i < nodes.len() {
        if let Node::ListItem { .. } = nodes[i] {
            // Consecutive items share one list
            out.push_str("<ul class=\"bullets\">\n");
            while let Some(Node::ListItem { content }) = nodes.get(i) {
                emit_list_item(content, config, &mut out);
                i += 1;
            }
            out.push_str("</ul>\n");
            continue;
        }
        emit_node(&nodes[i], config, &mut out);
        i += 1;
    }

    out.push_str("</div>\n");
    out
}

fn emit_node(node: &Node, config: &HtmlConfig, out: &mut String) {
    match node {
        Node::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
        Node::Heading { text } => {
            out.push_str("<h3 class=\"section\">");
            out.push_str(&escape_html(text));
            out.push_str("</h3>\n");
        }
        Node::CodeBlock(code) => code_to_html(code, config, out),
        Node::Table(table) => table_to_html(table, out),
        Node::ListItem { content } => {
            out.push_str("<ul class=\"bullets\">\n");
            emit_list_item(content, config, out);
            out.push_str("</ul>\n");
        }
    }
}

fn emit_list_item(content: &[Span], config: &HtmlConfig, out: &mut String) {
    out.push_str("<li><span class=\"bullet\">");
    out.push_str(&escape_html(&config.bullet));
    out.push_str("</span><span>");
    spans_to_html(content, out);
    out.push_str("</span></li>\n");
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&escape_html(text)),
            Span::Bold(inner) => {
                out.push_str("<strong>");
                spans_to_html(inner, out);
                out.push_str("</strong>");
            }
            Span::Code(text) => {
                out.push_str("<code>");
                out.push_str(&escape_html(text));
                out.push_str("</code>");
            }
        }
    }
}

fn code_to_html(code: &CodeBlock, config: &HtmlConfig, out: &mut String) {
    out.push_str("<div class=\"code-block\">\n");
    if config.code_header {
        out.push_str("<div class=\"code-header\"><span class=\"code-lang\">");
        out.push_str(&escape_html(&code.language));
        out.push_str("</span></div>\n");
    }
    out.push_str("<pre><code>");
    for line in &code.lines {
        out.push_str("<div class=\"code-line\">");
        if line.tokens.is_empty() {
            out.push(' ');
        }
        for token in &line.tokens {
            // Token text is escaped by the tokenizer.
            match token.kind.css_class() {
                Some(class) => {
                    out.push_str("<span class=\"");
                    out.push_str(class);
                    out.push_str("\">");
                    out.push_str(&token.text);
                    out.push_str("</span>");
                }
                None => out.push_str(&token.text),
            }
        }
        out.push_str("</div>");
    }
    out.push_str("</code></pre>\n</div>\n");
}

fn table_to_html(table: &Table, out: &mut String) {
    out.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        out.push_str("<th>");
        out.push_str(&escape_html(header));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape_html(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}
