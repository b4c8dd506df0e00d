//! In-memory XML tree produced by the formatter.
//!
//! Names, attribute values and text are validated when they enter the tree,
//! so a finished [`XmlDocument`] always serializes to well-formed XML.

use crate::error::{FeedError, Result};

/// End marker of a CDATA section; cannot appear inside one.
const CDATA_END: &str = "]]>";

/// A complete XML document: declaration data, optional leading comment and
/// exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    encoding: String,
    comment: Option<String>,
    root: XmlElement,
}

impl XmlDocument {
    #[must_use]
    pub fn new(encoding: impl Into<String>, root: XmlElement) -> Self {
        Self {
            encoding: encoding.into(),
            comment: None,
            root,
        }
    }

    /// Place a comment before the root element.
    ///
    /// # Errors
    /// Returns `FeedError::Serialization` if the text contains `--` or ends
    /// with `-`, which XML forbids inside comments.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Result<Self> {
        let comment = comment.into();
        if comment.contains("--") || comment.ends_with('-') {
            return Err(FeedError::Serialization(format!(
                "comment must not contain '--' or end with '-': {comment}"
            )));
        }
        check_chars(&comment, "comment")?;
        self.comment = Some(comment);
        Ok(self)
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

/// Child of an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Text that is entity-escaped on output.
    Text(String),
    /// Text written verbatim inside `<![CDATA[...]]>`.
    CData(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidName` if `name` is not a valid XML name.
    pub fn new(name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        check_name(name)?;
        check_chars(value, &format!("attribute '{name}' of <{}>", self.name))?;

        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| n == name) {
            existing.1 = value.to_string();
        } else {
            self.attributes.push((name.to_string(), value.to_string()));
        }
        Ok(())
    }

    pub fn append_child(&mut self, child: Self) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append escaped text.
    pub fn append_text(&mut self, text: &str) -> Result<()> {
        check_chars(text, &format!("text of <{}>", self.name))?;
        self.children.push(XmlNode::Text(text.to_string()));
        Ok(())
    }

    /// Append text as CDATA.
    ///
    /// Text containing `]]>` is split over adjacent sections so the marker
    /// never appears inside one.
    pub fn append_cdata(&mut self, text: &str) -> Result<()> {
        check_chars(text, &format!("CDATA of <{}>", self.name))?;
        self.children
            .extend(split_cdata(text).into_iter().map(XmlNode::CData));
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }
}

/// Split text into CDATA payloads that never contain `]]>`.
///
/// `a]]>b` becomes `a]]` and `>b`, which concatenate back to the input.
fn split_cdata(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(CDATA_END) {
        // Keep "]]" in this section and start the next one with ">"
        let cut = pos + 2;
        sections.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    sections.push(rest.to_string());
    sections
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Check whether `name` matches the XML 1.0 `Name` production.
///
/// # Examples
/// ```
/// use rss_feed_generator::xml::is_valid_name;
///
/// assert!(is_valid_name("pubDate"));
/// assert!(is_valid_name("atom:link"));
/// assert!(!is_valid_name("1st"));
/// assert!(!is_valid_name("two words"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check whether a character may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(FeedError::InvalidName {
            name: name.to_string(),
        })
    }
}

fn check_chars(text: &str, context: &str) -> Result<()> {
    if text.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(FeedError::InvalidCharacter {
            context: context.to_string(),
        })
    }
}
