//! End-to-end tests for building, rendering and saving feeds.
//!
//! Rendered output is parsed back with roxmltree so the checks look at the
//! document structure rather than at formatting details.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use roxmltree::Document;
use tempfile::tempdir;

use rss_feed_generator::xml::{element_children, find_child, find_children, get_tag_name, get_text};
use rss_feed_generator::{
    Element, ElementGroup, Feed, FeedConfig, FeedError, FeedManifest, FeedSink, FileSink,
    FilterTable, Formatter, ItemBuilder, Node,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_feed() -> Feed {
    let mut feed = Feed::new();
    feed.add_title("Release notes")
        .unwrap()
        .add_link("https://example.com")
        .unwrap()
        .add_description("All\nreleases")
        .unwrap()
        .add_pub_date(1_700_000_000)
        .unwrap();

    for (version, day) in [("1.0", 0), ("1.1", 1)] {
        let item = ItemBuilder::new()
            .title(&format!("Version {version}"))
            .unwrap()
            .link(&format!("https://example.com/{version}"))
            .unwrap()
            .description("<p>Notes</p>")
            .unwrap()
            .pub_date(1_700_000_000 + day * 86_400)
            .unwrap()
            .build()
            .unwrap();
        feed.add_item(item);
    }
    feed
}

#[test]
fn test_rendered_feed_structure() {
    let rendered = sample_feed().render(&Formatter::default()).unwrap();
    let doc = Document::parse(rendered.as_str()).unwrap();

    let rss = doc.root_element();
    assert_eq!(get_tag_name(rss), "rss");
    assert_eq!(rss.attribute("version"), Some("2.0"));
    assert_eq!(element_children(rss).count(), 1);

    let channel = find_child(rss, "channel").unwrap();
    let names: Vec<&str> = element_children(channel).map(get_tag_name).collect();
    assert_eq!(
        names,
        vec!["title", "link", "description", "pubDate", "item", "item"]
    );

    let description = find_child(channel, "description").unwrap();
    assert_eq!(get_text(description), "All releases");
}

#[test]
fn test_items_render_in_append_order() {
    let rendered = sample_feed().render(&Formatter::default()).unwrap();
    let doc = Document::parse(rendered.as_str()).unwrap();
    let channel = find_child(doc.root_element(), "channel").unwrap();

    let titles: Vec<String> = find_children(channel, "item")
        .map(|item| get_text(find_child(item, "title").unwrap()))
        .collect();
    assert_eq!(titles, vec!["Version 1.0", "Version 1.1"]);

    let first = find_children(channel, "item").next().unwrap();
    let dates: Vec<String> = find_children(first, "pubDate").map(get_text).collect();
    assert_eq!(dates, vec!["Tue, 14 Nov 2023 22:13:20 +0000"]);
}

#[test]
fn test_item_description_is_cdata() {
    let rendered = sample_feed().render(&Formatter::default()).unwrap();
    assert!(rendered
        .as_str()
        .contains("<description><![CDATA[<p>Notes</p>]]></description>"));
}

#[test]
fn test_standard_filters_apply_to_text() {
    let mut feed = Feed::new();
    feed.set_pretty_print(false);
    feed.add_title("Bundes&shy;rat[nbsp]news").unwrap();

    let rendered = feed.render(&Formatter::new(FilterTable::standard())).unwrap();
    let doc = Document::parse(rendered.as_str()).unwrap();
    let channel = find_child(doc.root_element(), "channel").unwrap();
    assert_eq!(get_text(find_child(channel, "title").unwrap()), "Bundesrat news");
}

#[test]
fn test_local_filter_overrides_configured_default() {
    let config = FeedConfig::from_yaml_str("filter:\n  'X': 'Y'\n").unwrap();
    let formatter = Formatter::from_config(&config).unwrap();

    let mut feed = Feed::new();
    feed.add_channel_field(
        Element::new("title", "X")
            .unwrap()
            .with_filter(FilterTable::new([("X", "Z")]).unwrap()),
    );
    feed.add_channel_field(Element::new("category", "X").unwrap());

    let rendered = feed.render(&formatter).unwrap();
    let doc = Document::parse(rendered.as_str()).unwrap();
    let channel = find_child(doc.root_element(), "channel").unwrap();
    assert_eq!(get_text(find_child(channel, "title").unwrap()), "Z");
    assert_eq!(get_text(find_child(channel, "category").unwrap()), "Y");
}

#[test]
fn test_render_is_repeatable() {
    let feed = sample_feed();
    let formatter = Formatter::default();

    let first = feed.render(&formatter).unwrap();
    let second = feed.render(&formatter).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_save_writes_rendered_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("feed.xml");

    let rendered = sample_feed().render(&Formatter::default()).unwrap();
    let saved = FileSink::new(&path).accept(&rendered).unwrap();

    assert_eq!(saved, path);
    assert_eq!(fs::read_to_string(&path).unwrap(), rendered.as_str());
}

#[test]
fn test_save_failure_keeps_rendered_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("feed.xml");

    let rendered = sample_feed().render(&Formatter::default()).unwrap();
    let err = rendered.save(&path).unwrap_err();

    assert!(matches!(err, FeedError::FilesystemWrite { .. }));
    assert!(err.to_string().contains("no-such-dir"));
    assert!(Document::parse(rendered.as_str()).is_ok());
}

#[test]
fn test_manifest_fixture_renders() {
    let manifest = FeedManifest::load(&fixture_path("feed.yaml")).unwrap();
    let config = FeedConfig::load(&fixture_path("filters.yaml")).unwrap();
    let feed = manifest.into_feed().unwrap();
    let rendered = feed.render(&Formatter::from_config(&config).unwrap()).unwrap();

    let doc = Document::parse(rendered.as_str()).unwrap();
    let rss = doc.root_element();
    assert_eq!(
        rss.lookup_namespace_uri(Some("atom")),
        Some("http://www.w3.org/2005/Atom")
    );

    let channel = find_child(rss, "channel").unwrap();
    let names: Vec<&str> = element_children(channel).map(get_tag_name).collect();
    assert_eq!(
        names,
        vec!["title", "link", "description", "language", "image", "item", "item"]
    );
    assert_eq!(
        get_text(find_child(channel, "description").unwrap()),
        "Every release of the project"
    );

    let image = find_child(channel, "image").unwrap();
    let image_fields: Vec<&str> = element_children(image).map(get_tag_name).collect();
    assert_eq!(image_fields, vec!["url", "title", "link"]);

    let items: Vec<_> = find_children(channel, "item").collect();
    let guid = find_child(items[0], "guid").unwrap();
    assert_eq!(guid.attribute("isPermaLink"), Some("false"));
    assert_eq!(
        get_text(find_child(items[0], "description").unwrap()),
        "<p>Bugfixes</p>"
    );

    let enclosure = find_child(items[1], "enclosure").unwrap();
    assert_eq!(enclosure.attribute("length"), Some("52480"));
    assert_eq!(enclosure.attribute("type"), Some("application/gzip"));
    assert!(enclosure.first_child().is_none());
}

#[test]
fn test_filter_config_fixture() {
    let config = FeedConfig::load(&fixture_path("filters.yaml")).unwrap();
    let table = config.filter_table().unwrap();

    let patterns: Vec<&str> = table.entries().map(|(pattern, _)| pattern).collect();
    assert_eq!(patterns, vec![r"\[nbsp\]", "&shy;", "Version"]);
    assert_eq!(table.apply("Version[nbsp]1"), "Release 1");
}

#[test]
fn test_nested_groups_render_recursively() {
    let size = ElementGroup::new(
        "size",
        vec![
            Element::new("width", "88").unwrap(),
            Element::new("height", "31").unwrap(),
        ],
    )
    .unwrap();
    let image = ElementGroup::new(
        "image",
        vec![Node::from(Element::new("url", "u").unwrap()), Node::from(size)],
    )
    .unwrap();

    let mut feed = Feed::new();
    feed.add_channel_field(image);
    let rendered = feed.render(&Formatter::default()).unwrap();

    let doc = Document::parse(rendered.as_str()).unwrap();
    let size = doc.descendants().find(|n| n.has_tag_name("size")).unwrap();
    assert_eq!(get_tag_name(size.parent_element().unwrap()), "image");
    assert_eq!(element_children(size).count(), 2);
}
