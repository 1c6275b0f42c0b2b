//! XML manifest adapter.
//!
//! Parses the `<site><home ...>...</home></site>` layout with a manual
//! `quick-xml` event reader. Element attributes become node attributes,
//! nested `child` and `attachment` elements recurse and repeated
//! `<label>text</label>` elements collect into the label list.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::ManifestFormat;
use crate::error::ManifestError;
use crate::node::SiteNode;

/// XML flavour of the site manifest.
pub struct XmlManifest;

impl ManifestFormat for XmlManifest {
    fn read_root(&self, path: &Path) -> Result<SiteNode, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_site(&text)
    }
}

/// Parse the manifest text into the root page node.
fn parse_site(text: &str) -> Result<SiteNode, ManifestError> {
    let mut reader = Reader::from_str(text);
    // Text is assembled manually; trimming here would split entity-bearing
    // label text incorrectly.
    reader.config_mut().trim_text(false);

    // Skip to the document element; its name does not matter.
    loop {
        match reader.read_event()? {
            Event::Start(_) => break,
            Event::Eof => return Err(ManifestError::MissingRoot),
            _ => {}
        }
    }

    // The first `home` element below it is the site root.
    loop {
        match reader.read_event()? {
            Event::Start(element) if element.local_name().as_ref() == b"home" => {
                return parse_node(&mut reader, &element);
            }
            Event::Empty(element) if element.local_name().as_ref() == b"home" => {
                return node_from_attributes(&element);
            }
            Event::End(_) | Event::Eof => return Err(ManifestError::MissingRoot),
            _ => {}
        }
    }
}

/// Parse one element with open/close tags into a node, consuming events up
/// to and including its end tag.
fn parse_node(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<SiteNode, ManifestError> {
    let mut node = node_from_attributes(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"child" => {
                    let child = parse_node(reader, &element)?;
                    node.children.push(child);
                }
                b"attachment" => {
                    let attachment = parse_node(reader, &element)?;
                    node.attachments.push(attachment);
                }
                b"label" => node.labels.push(read_text(reader)?),
                _ => {
                    reader.read_to_end(element.name())?;
                }
            },
            Event::Empty(element) => match element.local_name().as_ref() {
                b"child" => node.children.push(node_from_attributes(&element)?),
                b"attachment" => node.attachments.push(node_from_attributes(&element)?),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(ManifestError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(node)
}

/// Build a node from an element's attributes. `name` is required, `uri` is
/// optional and everything else lands in the attribute map.
fn node_from_attributes(element: &BytesStart<'_>) -> Result<SiteNode, ManifestError> {
    let mut node = SiteNode::default();

    for attribute in element.attributes() {
        let attribute = attribute?;
        // Namespace declarations are not site attributes
        if attribute.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attribute.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        match key.as_str() {
            "name" => node.name = value,
            "uri" => node.uri = Some(value),
            _ => {
                node.attributes.insert(key, value);
            }
        }
    }

    if node.name.is_empty() {
        return Err(ManifestError::MissingAttribute {
            element: String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
            attribute: "name".to_owned(),
        });
    }

    Ok(node)
}

/// Collect the text content of the current element up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ManifestError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(chunk) => text.push_str(&reader.decoder().decode(&chunk)?),
            Event::GeneralRef(entity) => {
                text.push_str(&decode_entity(&reader.decoder().decode(&entity)?));
            }
            Event::End(_) => break,
            Event::Eof => return Err(ManifestError::UnexpectedEof),
            _ => {}
        }
    }
    Ok(text.trim().to_owned())
}

/// Resolve the predefined XML entities and numeric character references.
fn decode_entity(name: &str) -> String {
    match name {
        "amp" => "&".to_owned(),
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "quot" => "\"".to_owned(),
        "apos" => "'".to_owned(),
        _ => name
            .strip_prefix('#')
            .and_then(|digits| {
                let code = digits
                    .strip_prefix(['x', 'X'])
                    .map_or_else(|| digits.parse::<u32>().ok(), |hex| {
                        u32::from_str_radix(hex, 16).ok()
                    })?;
                char::from_u32(code).map(String::from)
            })
            .unwrap_or_else(|| format!("&{name};")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<site xmlns="https://example.com/site/schema">
  <home name="Home" uri="home.md">
    <label>documentation</label>
    <label>generated</label>
    <attachment name="arch.png" uri="images/arch.png" contentType="image/png"/>
    <child name="Getting Started" uri="start.md">
      <child name="Install"/>
    </child>
    <child name="Reference" uri="reference.md"/>
  </home>
</site>"#;

    #[test]
    fn parses_nested_tree_in_document_order() {
        let root = parse_site(MANIFEST).unwrap();

        assert_eq!(root.name, "Home");
        assert_eq!(root.uri.as_deref(), Some("home.md"));
        assert_eq!(root.labels, vec!["documentation", "generated"]);
        assert_eq!(root.attachments.len(), 1);
        assert_eq!(root.attachments[0].uri.as_deref(), Some("images/arch.png"));

        let titles: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(titles, vec!["Getting Started", "Reference"]);
        assert_eq!(root.children[0].children[0].name, "Install");
        assert_eq!(root.children[0].children[0].uri, None);
    }

    #[test]
    fn extra_attributes_are_preserved() {
        let root = parse_site(
            r#"<site><home name="Home" uri="home.md">
                 <attachment name="a.bin" contentType="application/octet-stream" comment="raw dump"/>
               </home></site>"#,
        )
        .unwrap();

        let attachment = &root.attachments[0];
        assert_eq!(
            attachment.attribute("contentType"),
            Some("application/octet-stream")
        );
        assert_eq!(attachment.attribute("comment"), Some("raw dump"));
        assert_eq!(attachment.attribute("name"), None);
    }

    #[test]
    fn entities_in_attributes_and_labels() {
        let root = parse_site(
            r#"<site><home name="Q&amp;A" uri="qa.md"><label>tips &amp; tricks</label></home></site>"#,
        )
        .unwrap();
        assert_eq!(root.name, "Q&A");
        assert_eq!(root.labels, vec!["tips & tricks"]);
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = parse_site(r#"<site><home uri="home.md"/></site>"#).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingAttribute { element, attribute }
                if element == "home" && attribute == "name"
        ));
    }

    #[test]
    fn manifest_without_home_is_rejected() {
        let err = parse_site("<site><page name=\"x\"/></site>").unwrap_err();
        assert!(matches!(err, ManifestError::MissingRoot));
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let root = parse_site(
            r#"<site><home name="Home"><metadata><author>x</author></metadata><child name="A"/></home></site>"#,
        )
        .unwrap();
        assert_eq!(root.children.len(), 1);
    }
}
