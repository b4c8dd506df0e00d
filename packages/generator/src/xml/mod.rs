//! XML tree, serialization and read-back helpers.

mod tree;
mod utils;
mod writer;

pub use tree::{is_valid_name, XmlDocument, XmlElement, XmlNode};
pub use utils::{
    element_children, find_child, find_children, get_tag_name, get_text, inspect_feed,
    FeedSummary,
};
pub use writer::to_xml_string;
