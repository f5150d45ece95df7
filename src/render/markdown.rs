//! Markdown to HTML for the `md` directive.

use pulldown_cmark::{Options, Parser, html};

use crate::config::MarkdownSettings;

/// Parser options for the configured extensions.
#[must_use]
pub fn parser_options(settings: &MarkdownSettings) -> Options {
    let mut options = Options::empty();
    if settings.tables {
        options |= Options::ENABLE_TABLES;
    }
    if settings.strikethrough {
        options |= Options::ENABLE_STRIKETHROUGH;
    }
    if settings.tasklists {
        options |= Options::ENABLE_TASKLISTS;
    }
    options
}

/// Render markdown text to an HTML string.
#[must_use]
pub fn render_markdown(markdown: &str, settings: &MarkdownSettings) -> String {
    let parser = Parser::new_ext(markdown, parser_options(settings));
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
