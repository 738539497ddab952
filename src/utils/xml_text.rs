//! Minimal XML lookups on top of `xml-rs`.
//!
//! Both documents we read (distribution scripts and BootCamp.xml) only need
//! the text of elements at a fixed position below the root, so a streaming
//! pass is enough.

use std::io::Read;
use xml::reader::{EventReader, XmlEvent};

/// Collect the text of every element found at `path` below the root element.
///
/// `path` excludes the root itself: `["script"]` matches `<root><script>`,
/// `["MsiInfo", "ProductVersion"]` matches `<root><MsiInfo><ProductVersion>`.
/// Text of nested children and CDATA sections is included.
pub fn element_texts<R: Read>(source: R, path: &[&str]) -> Result<Vec<String>, xml::reader::Error> {
    let reader = EventReader::new(source);
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut texts = Vec::new();

    for event in reader {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                stack.push(name.local_name);
                if current.is_none() && matches_path(&stack, path) {
                    current = Some(String::new());
                }
            }
            XmlEvent::EndElement { .. } => {
                if matches_path(&stack, path) {
                    if let Some(text) = current.take() {
                        texts.push(text);
                    }
                }
                stack.pop();
            }
            XmlEvent::Characters(s) | XmlEvent::CData(s) | XmlEvent::Whitespace(s) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&s);
                }
            }
            _ => {}
        }
    }

    Ok(texts)
}

/// Text of the first element at `path`, trimmed
pub fn first_element_text<R: Read>(
    source: R,
    path: &[&str],
) -> Result<Option<String>, xml::reader::Error> {
    let texts = element_texts(source, path)?;
    Ok(texts.into_iter().next().map(|t| t.trim().to_string()))
}

fn matches_path(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() + 1 && stack[1..].iter().zip(path).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_direct_children_only() {
        let doc = r#"<root>
            <script>one</script>
            <choice><script>nested</script></choice>
            <script><![CDATA[two < three]]></script>
        </root>"#;

        let texts = element_texts(doc.as_bytes(), &["script"]).unwrap();
        assert_eq!(texts, vec!["one".to_string(), "two < three".to_string()]);
    }

    #[test]
    fn test_first_element_text_nested_path() {
        let doc = "<BootCamp><MsiInfo><ProductVersion> 6.1.6259 </ProductVersion></MsiInfo></BootCamp>";
        let version = first_element_text(doc.as_bytes(), &["MsiInfo", "ProductVersion"]).unwrap();
        assert_eq!(version.as_deref(), Some("6.1.6259"));
    }

    #[test]
    fn test_missing_path_is_none() {
        let doc = "<BootCamp><MsiInfo/></BootCamp>";
        let version = first_element_text(doc.as_bytes(), &["MsiInfo", "ProductVersion"]).unwrap();
        assert!(version.is_none());
    }

    #[test]
    fn test_malformed_document_errors() {
        let doc = "<root><script>unclosed</root>";
        assert!(element_texts(doc.as_bytes(), &["script"]).is_err());
    }
}
