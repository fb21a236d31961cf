//! Entry text to HTML markup

use crate::config::LineBreakStyle;

impl LineBreakStyle {
    pub fn markup(self) -> &'static str {
        match self {
            LineBreakStyle::Break => "<br>",
            LineBreakStyle::Spacer => r#"<p class="desktop-width"></p>"#,
        }
    }
}

/// Wraps text in a paragraph and draws every line break with the configured style.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    line_breaks: LineBreakStyle,
}

impl HtmlRenderer {
    pub fn new(line_breaks: LineBreakStyle) -> Self {
        Self { line_breaks }
    }

    pub fn render(&self, text: &str) -> String {
        let body = html_escape::encode_text(text).replace('\n', self.line_breaks.markup());
        format!("<p>{}</p>", body)
    }
}
