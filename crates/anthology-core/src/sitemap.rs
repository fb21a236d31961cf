//! XML sitemap listing the index page and one shareable link per entry

use crate::document::EntryList;
use crate::selection::entry_href;
use chrono::NaiveDate;

/// Public address of the published anthology page.
pub const DEFAULT_SITE_URL: &str = "https://wllclngn.github.io/SomeKindofFiction";

const CHANGE_FREQUENCY: &str = "Occasionally";
const PRIORITY: &str = "0.8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
}

impl SitemapUrl {
    fn to_xml(&self) -> String {
        let mut block = format!("  <url>\n    <loc>{}</loc>", html_escape::encode_text(&self.loc));
        if let Some(date) = self.lastmod {
            block.push_str(&format!("\n    <lastmod>{}</lastmod>", date.format("%Y-%m-%d")));
        }
        block.push_str(&format!(
            "\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
            CHANGE_FREQUENCY, PRIORITY
        ));
        block
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sitemap {
    urls: Vec<SitemapUrl>,
}

impl Sitemap {
    /// The index page as `<site>/`, followed by `<site>/?entry=N` for every entry.
    pub fn for_entries(site_url: &str, entries: &EntryList, lastmod: Option<NaiveDate>) -> Self {
        let base = site_url.trim_end_matches('/');
        let urls = std::iter::once(format!("{}/", base))
            .chain((0..entries.len()).map(|index| format!("{}/{}", base, entry_href(index))))
            .map(|loc| SitemapUrl { loc, lastmod })
            .collect();
        Self { urls }
    }

    pub fn urls(&self) -> &[SitemapUrl] {
        &self.urls
    }

    pub fn to_xml(&self) -> String {
        let blocks: Vec<String> = self.urls.iter().map(SitemapUrl::to_xml).collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
            blocks.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_index_then_one_url_per_entry() {
        let entries = parse_document("●one\n\n●two\n\n●three").unwrap();
        let sitemap = Sitemap::for_entries(DEFAULT_SITE_URL, &entries, None);

        let locs: Vec<&str> = sitemap.urls().iter().map(|url| url.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://wllclngn.github.io/SomeKindofFiction/",
                "https://wllclngn.github.io/SomeKindofFiction/?entry=0",
                "https://wllclngn.github.io/SomeKindofFiction/?entry=1",
                "https://wllclngn.github.io/SomeKindofFiction/?entry=2",
            ]
        );
    }

    #[test]
    fn test_trailing_slash_on_site_url() {
        let entries = parse_document("●only").unwrap();
        let sitemap = Sitemap::for_entries("http://example.test/stories/", &entries, None);
        assert_eq!(sitemap.urls()[0].loc, "http://example.test/stories/");
        assert_eq!(sitemap.urls()[1].loc, "http://example.test/stories/?entry=0");
    }

    #[test]
    fn test_xml_layout() {
        let entries = parse_document("●only").unwrap();
        let xml = Sitemap::for_entries("http://example.test", &entries, Some(date())).to_xml();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             \x20 <url>\n\
             \x20   <loc>http://example.test/</loc>\n\
             \x20   <lastmod>2024-05-17</lastmod>\n\
             \x20   <changefreq>Occasionally</changefreq>\n\
             \x20   <priority>0.8</priority>\n\
             \x20 </url>\n\
             \x20 <url>\n\
             \x20   <loc>http://example.test/?entry=0</loc>\n\
             \x20   <lastmod>2024-05-17</lastmod>\n\
             \x20   <changefreq>Occasionally</changefreq>\n\
             \x20   <priority>0.8</priority>\n\
             \x20 </url>\n\
             </urlset>\n"
        );
    }

    #[test]
    fn test_lastmod_is_optional() {
        let entries = parse_document("●only").unwrap();
        let xml = Sitemap::for_entries("http://example.test", &entries, None).to_xml();
        assert!(!xml.contains("<lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_loc_is_escaped() {
        let entries = parse_document("●only").unwrap();
        let xml = Sitemap::for_entries("http://example.test/tales&lies", &entries, None).to_xml();
        assert!(xml.contains("<loc>http://example.test/tales&amp;lies/</loc>"));
        assert!(xml.contains("<loc>http://example.test/tales&amp;lies/?entry=0</loc>"));
    }
}
