//! Loading, segmenting and rendering of a plain-text anthology.
//!
//! An anthology is a single text file hosted on a raw file endpoint. Entries
//! start with the marker character `●`. One load performs a single fetch,
//! collapses soft line breaks, splits the text into entries and renders the
//! selected entry (or all of them) into a page.
//!
//! - [`config`]: the immutable source record and its loader
//! - [`source`]: the fetch seam, over HTTP or a local file
//! - [`document`]: normalization and segmentation
//! - [`selection`]: `entry` parameter parsing and the last-entry link
//! - [`render`] and [`page`]: markup generation
//! - [`sitemap`]: XML sitemap of the index page and every entry link

pub mod config;
pub mod document;
pub mod errors;
pub mod loader;
pub mod page;
pub mod render;
pub mod selection;
pub mod sitemap;
pub mod source;

pub use config::{ConfigLoader, LineBreakStyle, SourceConfig};
pub use document::{normalize, parse_document, segment, Entry, EntryList, MARKER};
pub use errors::{ConfigError, LoadError};
pub use loader::EntryLoader;
pub use page::PageView;
pub use render::HtmlRenderer;
pub use selection::{parse_entry_index, LastEntryLink, Selection};
pub use sitemap::{Sitemap, SitemapUrl, DEFAULT_SITE_URL};
pub use source::{DocumentSource, FileSource, HttpSource};
