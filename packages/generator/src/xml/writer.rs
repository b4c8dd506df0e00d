//! Serialization of [`XmlDocument`] trees with `quick-xml`.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::{XmlDocument, XmlElement, XmlNode};
use crate::config::{INDENT_WIDTH, XML_VERSION};
use crate::error::{FeedError, Result};

/// Serialize a document to a string.
///
/// With `pretty` set, nested elements go on their own line indented by
/// [`INDENT_WIDTH`] spaces per level; text and CDATA stay on the line of
/// their element. Without it nothing is inserted between elements. The
/// declaration and the comment end with a newline in both modes, and so does
/// the document.
pub fn to_xml_string(document: &XmlDocument, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH)
    } else {
        Writer::new(Vec::new())
    };

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new(XML_VERSION, Some(document.encoding()), None)),
    )?;
    if !pretty {
        writer.get_mut().push(b'\n');
    }

    if let Some(comment) = document.comment() {
        write_event(&mut writer, Event::Comment(BytesText::from_escaped(comment)))?;
        if !pretty {
            writer.get_mut().push(b'\n');
        }
    }

    write_element(&mut writer, document.root())?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| FeedError::Serialization(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children().is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in element.children() {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => write_event(
                writer,
                Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))),
            )?,
            XmlNode::CData(text) => {
                write_event(writer, Event::CData(BytesCData::new(text.as_str())))?;
            }
        }
    }
    write_event(writer, Event::End(BytesEnd::new(element.name())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::Serialization(e.to_string()))
}
