mod block;
mod config;
mod error;
pub mod highlight;
mod html;
mod parser;
pub mod prose;
pub mod splitter;
pub mod study;
pub mod table;
mod typst;

pub use block::{CodeBlock, CodeLine, Node, Span, Table};
pub use config::{Config, FontConfig, HtmlConfig, LayoutConfig, PageConfig};
pub use error::{Error, Result};
pub use highlight::{Token, TokenKind};
pub use html::nodes_to_html;
pub use parser::code_block;
pub use typst::nodes_to_typst;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse answer text into a vector of nodes.
pub fn parse(text: &str) -> Vec<Node> {
    parser::parse(text)
}

/// Convert answer text to an HTML fragment using default config.
pub fn answer_to_html(text: &str) -> String {
    answer_to_html_with_config(text, &Config::compiled_default())
}

/// Convert answer text to an HTML fragment with custom config.
pub fn answer_to_html_with_config(text: &str, config: &Config) -> String {
    nodes_to_html(&parse(text), &config.html)
}

/// Convert answer text to Typst markup using default config.
pub fn answer_to_typst(text: &str) -> String {
    answer_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert answer text to Typst markup with custom config.
pub fn answer_to_typst_with_config(text: &str, config: &Config) -> String {
    nodes_to_typst(&parse(text), config)
}

/// Convert answer text to PDF bytes using default config.
pub fn answer_to_pdf(text: &str) -> Result<Vec<u8>> {
    nodes_to_pdf(&parse(text), &Config::compiled_default())
}

/// Convert answer text to PDF bytes with custom config.
pub fn answer_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>> {
    nodes_to_pdf(&parse(text), config)
}

/// Compile nodes to PDF bytes.
pub fn nodes_to_pdf(nodes: &[Node], config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = nodes_to_typst(nodes, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("{e:?}")))?;

    let bytes = typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Pdf(format!("{e:?}")))?;
    log::debug!("compiled {} nodes into {} PDF bytes", nodes.len(), bytes.len());
    Ok(bytes)
}
