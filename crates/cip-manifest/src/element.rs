use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ParseError, Result, xml_error};

/// A parsed XML element: tag, optional `lang` attribute, direct text, children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub lang: Option<String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// First direct child with `tag`.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Text of the first direct child with `tag`.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.text.as_deref())
    }

    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let tag = std::str::from_utf8(start.local_name().as_ref())?.to_string();
        let mut lang = None;

        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            if attr.key.local_name().as_ref() == b"lang" {
                lang = Some(attr.unescape_value().map_err(xml_error)?.into_owned());
            }
        }

        Ok(Self {
            tag,
            lang,
            text: None,
            children: Vec::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// Parse a whole document and return its root element.
pub fn parse_document(bytes: &[u8]) -> Result<Element> {
    let xml = std::str::from_utf8(bytes)?;
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(ParseError::Unbalanced)?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Xml(format!(
            "unexpected end of document inside <{}>",
            stack.last().map(|e| e.tag.as_str()).unwrap_or_default()
        )));
    }

    root.ok_or(ParseError::NoRoot)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_document() {
        let root = parse_document(
            br#"<?xml version="1.0"?>
            <config>
                <release>2.1</release>
                <description lang="en">New lessons</description>
                <update>
                    <remove>examples/old</remove>
                    <copy>examples/new</copy>
                </update>
            </config>"#,
        )
        .unwrap();

        assert_eq!(root.tag, "config");
        assert_eq!(root.child_text("release"), Some("2.1"));
        assert_eq!(root.child("description").unwrap().lang.as_deref(), Some("en"));
        let update = root.child("update").unwrap();
        assert_eq!(update.children.len(), 2);
        assert_eq!(update.children[0].tag, "remove");
        assert_eq!(update.children[1].text.as_deref(), Some("examples/new"));
    }

    #[test]
    fn parse_entities_and_cdata() {
        let root =
            parse_document(b"<d><t>a &amp; b</t><c><![CDATA[<raw>]]></c><e/></d>").unwrap();
        assert_eq!(root.child_text("t"), Some("a & b"));
        assert_eq!(root.child_text("c"), Some("<raw>"));
        assert_eq!(root.child("e").unwrap().text, None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_document(b"not xml at all").is_err());
        assert!(parse_document(b"<a><b></a>").is_err());
        assert!(parse_document(b"<a>").is_err());
        assert!(matches!(parse_document(b""), Err(ParseError::NoRoot)));
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        assert!(matches!(
            parse_document(&[0x3c, 0x61, 0xff, 0x3e]),
            Err(ParseError::Encoding(_))
        ));
    }
}
