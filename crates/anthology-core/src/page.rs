//! Full page composition
//!
//! A page is the outcome of one load: either the selected text rendered into
//! the display region, or the error message naming the file and branch. The
//! last-entry link carries a pre-rendered copy of the final entry so it can be
//! shown in place without another request.

use crate::config::SourceConfig;
use crate::document::EntryList;
use crate::errors::LoadError;
use crate::render::HtmlRenderer;
use html_escape::encode_double_quoted_attribute;
use crate::selection::{LastEntryLink, Selection};

pub const CONTENT_ID: &str = "content-display";
pub const LAST_ENTRY_LINK_ID: &str = "last-entry-link";
const LAST_ENTRY_TEMPLATE_ID: &str = "last-entry";

const SWAP_SCRIPT: &str = r#"<script>
document.getElementById('last-entry-link').addEventListener('click', (event) => {
    event.preventDefault();
    const link = event.currentTarget;
    document.getElementById('content-display').innerHTML = document.getElementById('last-entry').innerHTML;
    history.pushState(null, '', link.getAttribute('href'));
});
</script>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastEntryView {
    pub link: LastEntryLink,
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub content: String,
    pub selection: Option<Selection>,
    pub last_entry: Option<LastEntryView>,
}

impl PageView {
    /// Page for a successful load, honoring the optional raw `entry` value.
    pub fn for_entries(config: &SourceConfig, entries: &EntryList, raw_entry: Option<&str>) -> Self {
        let renderer = HtmlRenderer::new(config.line_breaks);
        let selection = Selection::resolve(raw_entry, entries);

        let last_entry = LastEntryLink::for_entries(entries).and_then(|link| {
            entries.get(link.index).map(|entry| LastEntryView {
                markup: renderer.render(entry.as_str()),
                link,
            })
        });

        Self {
            title: config.repo.clone(),
            content: renderer.render(&selection.text(entries)),
            selection: Some(selection),
            last_entry,
        }
    }

    /// Page for a failed load. Emits the operator diagnostic.
    pub fn for_error(config: &SourceConfig, error: &LoadError) -> Self {
        log::error!(
            "Error fetching {} ({}): {}",
            config.file_path,
            config.raw_file_url(),
            error
        );

        Self {
            title: config.repo.clone(),
            content: error_message(config),
            selection: None,
            last_entry: None,
        }
    }

    pub fn from_outcome(
        config: &SourceConfig,
        outcome: &Result<EntryList, LoadError>,
        raw_entry: Option<&str>,
    ) -> Self {
        match outcome {
            Ok(entries) => Self::for_entries(config, entries, raw_entry),
            Err(error) => Self::for_error(config, error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.selection.is_none()
    }

    pub fn to_html(&self) -> String {
        let (href, extras) = match &self.last_entry {
            Some(last) => (
                encode_double_quoted_attribute(&last.link.href).into_owned(),
                format!(
                    "<template id=\"{}\">{}</template>\n{}\n",
                    LAST_ENTRY_TEMPLATE_ID, last.markup, SWAP_SCRIPT
                ),
            ),
            None => ("./".to_string(), String::new()),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav><a id="{link_id}" href="{href}">Last entry</a></nav>
<main id="{content_id}">{content}</main>
{extras}</body>
</html>
"#,
            title = encode_double_quoted_attribute(&self.title),
            link_id = LAST_ENTRY_LINK_ID,
            href = href,
            content_id = CONTENT_ID,
            content = self.content,
            extras = extras,
        )
    }
}

/// The reader-facing failure message, naming the file and branch.
pub fn error_message(config: &SourceConfig) -> String {
    format!(
        "<p class=\"error-message\">Error loading content from {}.<br>Please ensure the file exists at the correct path in the '{}' branch, and try again.</p>",
        encode_double_quoted_attribute(&config.file_path),
        encode_double_quoted_attribute(&config.branch)
    )
}
