//! Named helpers for the standard RSS 2.0 channel elements.

use super::{collapse_line_breaks, rfc2822, Feed};
use crate::error::Result;
use crate::types::{Element, ElementGroup, Node};

impl Feed {
    fn add_text_field(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        Ok(self.add_channel_field(Element::new(name, value)?))
    }

    /// Append `<title>`.
    ///
    /// # Examples
    /// ```
    /// use rss_feed_generator::Feed;
    ///
    /// let mut feed = Feed::new();
    /// feed.add_title("My Feed")?.add_link("https://example.com")?;
    /// assert_eq!(feed.channel_fields().len(), 2);
    /// # Ok::<(), rss_feed_generator::FeedError>(())
    /// ```
    pub fn add_title(&mut self, title: &str) -> Result<&mut Self> {
        self.add_text_field("title", title)
    }

    pub fn add_link(&mut self, link: &str) -> Result<&mut Self> {
        self.add_text_field("link", link)
    }

    /// Append `<description>` with line breaks collapsed to single spaces.
    pub fn add_description(&mut self, description: &str) -> Result<&mut Self> {
        self.add_text_field("description", &collapse_line_breaks(description))
    }

    pub fn add_language(&mut self, language: &str) -> Result<&mut Self> {
        self.add_text_field("language", language)
    }

    pub fn add_copyright(&mut self, copyright: &str) -> Result<&mut Self> {
        self.add_text_field("copyright", copyright)
    }

    pub fn add_managing_editor(&mut self, email: &str) -> Result<&mut Self> {
        self.add_text_field("managingEditor", email)
    }

    pub fn add_web_master(&mut self, email: &str) -> Result<&mut Self> {
        self.add_text_field("webMaster", email)
    }

    /// Append `<pubDate>` formatted from a UNIX timestamp.
    pub fn add_pub_date(&mut self, timestamp: i64) -> Result<&mut Self> {
        self.add_text_field("pubDate", &rfc2822(timestamp)?)
    }

    /// Append `<lastBuildDate>` formatted from a UNIX timestamp.
    pub fn add_last_build_date(&mut self, timestamp: i64) -> Result<&mut Self> {
        self.add_text_field("lastBuildDate", &rfc2822(timestamp)?)
    }

    pub fn add_category(&mut self, category: &str) -> Result<&mut Self> {
        self.add_text_field("category", category)
    }

    pub fn add_generator(&mut self, generator: &str) -> Result<&mut Self> {
        self.add_text_field("generator", generator)
    }

    pub fn add_docs(&mut self, url: &str) -> Result<&mut Self> {
        self.add_text_field("docs", url)
    }

    /// Append `<ttl>` in minutes.
    pub fn add_ttl(&mut self, minutes: u32) -> Result<&mut Self> {
        self.add_text_field("ttl", &minutes.to_string())
    }

    /// Append an `<image>` group with `url`, `title` and `link` children.
    pub fn add_image(&mut self, url: &str, title: &str, link: &str) -> Result<&mut Self> {
        let children = vec![
            Node::from(Element::new("url", url)?),
            Node::from(Element::new("title", title)?),
            Node::from(Element::new("link", link)?),
        ];
        Ok(self.add_channel_field(ElementGroup::new("image", children)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(feed: &Feed, index: usize) -> (&str, Option<&str>) {
        match &feed.channel_fields()[index] {
            Node::Element(element) => (element.name(), element.content()),
            Node::Group(group) => (group.name(), None),
        }
    }

    #[test]
    fn test_text_helpers_use_fixed_tags() {
        let mut feed = Feed::new();
        feed.add_title("T")
            .unwrap()
            .add_link("L")
            .unwrap()
            .add_language("de-ch")
            .unwrap()
            .add_managing_editor("editor@example.com")
            .unwrap()
            .add_web_master("web@example.com")
            .unwrap()
            .add_ttl(60)
            .unwrap();

        assert_eq!(field(&feed, 0), ("title", Some("T")));
        assert_eq!(field(&feed, 1), ("link", Some("L")));
        assert_eq!(field(&feed, 2), ("language", Some("de-ch")));
        assert_eq!(field(&feed, 3), ("managingEditor", Some("editor@example.com")));
        assert_eq!(field(&feed, 4), ("webMaster", Some("web@example.com")));
        assert_eq!(field(&feed, 5), ("ttl", Some("60")));
    }

    #[test]
    fn test_add_description_collapses_line_breaks() {
        let mut feed = Feed::new();
        feed.add_description("first line\r\n\nsecond line").unwrap();
        assert_eq!(field(&feed, 0), ("description", Some("first line second line")));
    }

    #[test]
    fn test_date_helpers() {
        let mut feed = Feed::new();
        feed.add_pub_date(1_700_000_000)
            .unwrap()
            .add_last_build_date(1_700_000_000)
            .unwrap();

        assert_eq!(
            field(&feed, 0),
            ("pubDate", Some("Tue, 14 Nov 2023 22:13:20 +0000"))
        );
        assert_eq!(field(&feed, 1).0, "lastBuildDate");
    }

    #[test]
    fn test_date_helper_rejects_out_of_range() {
        let mut feed = Feed::new();
        assert!(feed.add_pub_date(i64::MIN).is_err());
        assert!(feed.channel_fields().is_empty());
    }

    #[test]
    fn test_add_image() {
        let mut feed = Feed::new();
        feed.add_image("https://x/logo.png", "Logo", "https://x").unwrap();

        let Node::Group(image) = &feed.channel_fields()[0] else {
            panic!("expected a group");
        };
        let names: Vec<&str> = image.children().iter().map(Node::name).collect();
        assert_eq!(image.name(), "image");
        assert_eq!(names, vec!["url", "title", "link"]);
    }
}
