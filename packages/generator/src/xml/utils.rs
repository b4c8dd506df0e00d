//! Read-side helpers for checking rendered feeds with `roxmltree`.

use roxmltree::{Document, Node};

use crate::config::RSS_VERSION;
use crate::error::{FeedError, Result};

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Local tag name (e.g., "link" for `<atom:link>`)
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use rss_feed_generator::xml::get_tag_name;
///
/// let xml = r#"<rss xmlns:atom="http://www.w3.org/2005/Atom"><atom:link/></rss>"#;
/// let doc = Document::parse(xml).unwrap();
/// let link = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(link), "link");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use rss_feed_generator::xml::find_child;
///
/// let xml = r#"<rss><channel><title>t</title></channel></rss>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_child(doc.root_element(), "channel").is_some());
/// assert!(find_child(doc.root_element(), "item").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements, in document order
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use rss_feed_generator::xml::find_children;
///
/// let xml = r#"<channel><item/><title/><item/></channel>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(find_children(doc.root_element(), "item").count(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node, skipping text and comments.
///
/// # Arguments
/// * `node` - Parent node
///
/// # Returns
/// Iterator over child elements, in document order
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use rss_feed_generator::xml::{element_children, get_tag_name};
///
/// let xml = "<channel>\n  <title>t</title>\n  <!--c-->\n  <link>l</link>\n</channel>";
/// let doc = Document::parse(xml).unwrap();
///
/// let names: Vec<&str> = element_children(doc.root_element()).map(get_tag_name).collect();
/// assert_eq!(names, vec!["title", "link"]);
/// ```
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the text content of a node, trimmed.
///
/// CDATA sections are read like plain text.
///
/// # Arguments
/// * `node` - Node to get text from
///
/// # Returns
/// Trimmed text, or an empty string if the node has no text
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use rss_feed_generator::xml::get_text;
///
/// let xml = r#"<description><![CDATA[ <p>hi</p> ]]></description>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_text(doc.root_element()), "<p>hi</p>");
///
/// let doc = Document::parse("<enclosure/>").unwrap();
/// assert_eq!(get_text(doc.root_element()), "");
/// ```
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Shape of a rendered feed as read back from its XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    /// Value of the `version` attribute on `<rss>`.
    pub version: String,

    /// Text of `<channel><title>`, if present.
    pub title: Option<String>,

    /// Tag names of the channel children before the first `<item>`.
    pub channel_fields: Vec<String>,

    /// Number of `<item>` elements.
    pub item_count: usize,
}

/// Parse rendered XML and check the `rss > channel` shape.
///
/// # Errors
/// Returns `FeedError::XmlParse` if the input is not well-formed and
/// `FeedError::Structure` if the root is not `<rss version="2.0">` with
/// exactly one `<channel>`.
///
/// # Examples
/// ```
/// use rss_feed_generator::xml::inspect_feed;
///
/// let summary = inspect_feed(
///     r#"<rss version="2.0"><channel><title>T</title><item/></channel></rss>"#,
/// )
/// .unwrap();
/// assert_eq!(summary.title.as_deref(), Some("T"));
/// assert_eq!(summary.item_count, 1);
/// ```
pub fn inspect_feed(xml: &str) -> Result<FeedSummary> {
    let doc = Document::parse(xml)?;
    let rss = doc.root_element();

    if get_tag_name(rss) != "rss" {
        return Err(FeedError::Structure(format!(
            "root element is <{}>, expected <rss>",
            get_tag_name(rss)
        )));
    }

    let version = rss.attribute("version").unwrap_or_default().to_string();
    if version != RSS_VERSION {
        return Err(FeedError::Structure(format!(
            "rss version is '{version}', expected '{RSS_VERSION}'"
        )));
    }

    let mut channels = element_children(rss);
    let channel = match (channels.next(), channels.next()) {
        (Some(channel), None) if get_tag_name(channel) == "channel" => channel,
        _ => {
            return Err(FeedError::Structure(
                "<rss> must contain exactly one <channel>".to_string(),
            ))
        }
    };

    let channel_fields = element_children(channel)
        .map(get_tag_name)
        .take_while(|name| *name != "item")
        .map(str::to_string)
        .collect();

    Ok(FeedSummary {
        version,
        title: find_child(channel, "title").map(get_text),
        channel_fields,
        item_count: find_children(channel, "item").count(),
    })
}
