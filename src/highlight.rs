//! Code line tokenizer for syntax highlighting.
//!
//! Lines are HTML-escaped first and tokenized afterwards, so token text is
//! always safe to place inside markup. The grammar is a fixed C++-flavoured
//! rule table: at every position the longest rule match wins and ties go to
//! the rule listed first. Text no rule claims becomes `Plain`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Comment,
    StringLiteral,
    Preprocessor,
    TypeKeyword,
    ControlKeyword,
    Literal,
    Plain,
}

impl TokenKind {
    /// CSS class suffix used by the HTML renderer, `None` for plain text.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Comment => Some("hl-comment"),
            TokenKind::StringLiteral => Some("hl-string"),
            TokenKind::Preprocessor => Some("hl-preproc"),
            TokenKind::TypeKeyword => Some("hl-type"),
            TokenKind::ControlKeyword => Some("hl-keyword"),
            TokenKind::Literal => Some("hl-literal"),
            TokenKind::Plain => None,
        }
    }
}

/// A run of escaped source text classified by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "bool", "void", "string", "long", "vector", "map", "set",
    "stack", "queue", "priority_queue", "unordered_map", "unordered_set", "auto", "size_t", "pair",
    "std", "ListNode", "Node", "TreeNode", "struct", "class", "public", "private", "protected",
    "virtual", "override", "friend", "template", "typename", "using", "namespace", "static",
    "const", "constexpr", "inline", "explicit", "noexcept",
];

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "return", "switch", "case", "break", "continue", "new",
    "delete", "try", "catch", "throw",
];

const ENTITIES: [&str; 3] = ["&amp;", "&lt;", "&gt;"];

struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("highlight rule is a valid regex"),
        }
    }

    fn words(kind: TokenKind, words: &[&str]) -> Self {
        Self::new(kind, &format!(r"\b(?:{})\b", words.join("|")))
    }
}

/// Rules in priority order. Patterns run against escaped text, which is why
/// the `#include <file>` form is spelled with entities.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(TokenKind::Comment, r"//.*"),
        Rule::new(TokenKind::StringLiteral, r#""[^"]*""#),
        Rule::words(TokenKind::TypeKeyword, TYPE_KEYWORDS),
        Rule::words(TokenKind::ControlKeyword, CONTROL_KEYWORDS),
        Rule::new(TokenKind::Literal, r"\b(?:true|false|NULL|nullptr|\d+)\b"),
        Rule::new(
            TokenKind::Preprocessor,
            r"#include\s+&lt;[^&]*&gt;|#include|#define|#ifndef|#endif|#pragma",
        ),
    ]
});

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape and tokenize one raw source line.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    tokenize_escaped(&escape_html(line))
}

/// Tokenize a line that has already been escaped with [`escape_html`].
///
/// Concatenating the returned token texts yields `escaped` exactly.
pub fn tokenize_escaped(escaped: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(escaped);
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < escaped.len() {
        let rest = &escaped[pos..];
        if let Some(entity) = ENTITIES.iter().find(|entity| rest.starts_with(**entity)) {
            pos += entity.len();
            continue;
        }

        match scanner.longest_at(pos) {
            Some((kind, end)) => {
                push_plain(&mut tokens, &escaped[plain_start..pos]);
                tokens.push(Token::new(kind, &escaped[pos..end]));
                pos = end;
                plain_start = end;
            }
            None => pos += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    push_plain(&mut tokens, &escaped[plain_start..]);

    tokens
}

fn push_plain(tokens: &mut Vec<Token>, text: &str) {
    if !text.is_empty() {
        tokens.push(Token::new(TokenKind::Plain, text));
    }
}

/// Remembers each rule's next match so a line is scanned once per rule
/// instead of once per position.
struct Scanner<'a> {
    text: &'a str,
    next: Vec<Option<(usize, usize)>>,
    searched_from: Vec<Option<usize>>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            next: vec![None; RULES.len()],
            searched_from: vec![None; RULES.len()],
        }
    }

    fn next_match(&mut self, rule: usize, pos: usize) -> Option<(usize, usize)> {
        let stale = match (self.searched_from[rule], self.next[rule]) {
            (None, _) => true,
            (Some(_), Some((start, _))) => start < pos,
            (Some(_), None) => false,
        };
        if stale {
            self.next[rule] = RULES[rule]
                .pattern
                .find_at(self.text, pos)
                .map(|m| (m.start(), m.end()));
            self.searched_from[rule] = Some(pos);
        }
        self.next[rule]
    }

    fn longest_at(&mut self, pos: usize) -> Option<(TokenKind, usize)> {
        let mut best: Option<(TokenKind, usize)> = None;
        for rule in 0..RULES.len() {
            let Some((start, end)) = self.next_match(rule, pos) else {
                continue;
            };
            if start == pos && end > pos && best.is_none_or(|(_, best_end)| end > best_end) {
                best = Some((RULES[rule].kind, end));
            }
        }
        best
    }
}
