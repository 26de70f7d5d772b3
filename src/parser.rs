use crate::block::{CodeBlock, CodeLine, Node};
use crate::highlight::tokenize_line;
use crate::prose;
use crate::splitter::{self, Fence, Segment};

const DEFAULT_LANGUAGE: &str = "code";

/// Parse answer text into a list of nodes
pub fn parse(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();

    for segment in splitter::split(text) {
        match segment {
            Segment::Code(fence) => nodes.push(Node::CodeBlock(code_block(&fence))),
            Segment::Prose(prose) => nodes.extend(prose::process(prose)),
        }
    }

    log::debug!("parsed {} bytes into {} nodes", text.len(), nodes.len());
    nodes
}

/// Build a highlighted code block from a fence.
pub fn code_block(fence: &Fence<'_>) -> CodeBlock {
    let language = fence.language.unwrap_or(DEFAULT_LANGUAGE).to_string();
    let lines = fence
        .body
        .trim()
        .lines()
        .map(|line| CodeLine {
            source: line.to_string(),
            tokens: tokenize_line(line),
        })
        .collect();

    CodeBlock { language, lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Span, Table};
    use crate::highlight::{Token, TokenKind};

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn plain_sentence() {
        assert_eq!(parse("plain sentence."), vec![Node::paragraph("plain sentence.")]);
    }

    #[test]
    fn section_heading() {
        assert_eq!(parse("**SECTION**"), vec![Node::heading("SECTION")]);
    }

    #[test]
    fn list_item() {
        let nodes = parse("* item one");
        assert_eq!(
            nodes,
            vec![Node::ListItem {
                content: vec![Span::Text("item one".to_string())]
            }]
        );
    }

    #[test]
    fn fenced_code() {
        let nodes = parse("```cpp\nint x = 5;\n```");
        let [Node::CodeBlock(code)] = &nodes[..] else {
            panic!("expected one code block, got {nodes:?}");
        };
        assert_eq!(code.language, "cpp");
        assert_eq!(code.lines.len(), 1);
        assert_eq!(code.lines[0].source, "int x = 5;");
        assert_eq!(
            code.lines[0].tokens,
            vec![
                Token::new(TokenKind::TypeKeyword, "int"),
                Token::new(TokenKind::Plain, " x = "),
                Token::new(TokenKind::Literal, "5"),
                Token::new(TokenKind::Plain, ";"),
            ]
        );
    }

    #[test]
    fn fence_without_language_defaults() {
        let nodes = parse("```\n  a\n\n  b  \n```");
        let [Node::CodeBlock(code)] = &nodes[..] else {
            panic!("expected one code block, got {nodes:?}");
        };
        assert_eq!(code.language, "code");
        assert_eq!(code.source(), "a\n\n  b");
    }

    #[test]
    fn empty_fence_has_no_lines() {
        let nodes = parse("```py\n```");
        assert!(matches!(&nodes[..], [Node::CodeBlock(c)] if c.lines.is_empty()));
    }

    #[test]
    fn pipe_table() {
        assert_eq!(
            parse("| A | B |\n|---|---|\n| 1 | 2 |"),
            vec![Node::Table(Table {
                headers: vec!["A".to_string(), "B".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            })]
        );
    }

    #[test]
    fn unterminated_fence_degrades_to_text() {
        let nodes = parse("```cpp\nint x;");
        assert_eq!(
            nodes,
            vec![Node::paragraph("```cpp"), Node::paragraph("int x;")]
        );
    }

    #[test]
    fn keeps_source_order() {
        let text = "**PROBLEM ANALYSIS**\nGiven an array.\n```cpp\nreturn 0;\n```\n* tip\n| k | v |\n| a | b |";
        let kinds: Vec<&str> = parse(text)
            .iter()
            .map(|node| match node {
                Node::Paragraph { .. } => "paragraph",
                Node::Heading { .. } => "heading",
                Node::CodeBlock(_) => "code",
                Node::Table(_) => "table",
                Node::ListItem { .. } => "item",
            })
            .collect();
        assert_eq!(kinds, vec!["heading", "paragraph", "code", "item", "table"]);
    }

    #[test]
    fn same_input_same_output() {
        let text = "# Title\nSome `code` and **bold**.\n```\nx\n```";
        assert_eq!(parse(text), parse(text));
    }
}
