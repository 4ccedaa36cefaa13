//! Typed element tree.
//!
//! The source document is read once with a quick-xml event reader into an
//! owned [`Element`] tree. Only elements and their attributes are kept; text,
//! comments, processing instructions and doctypes are dropped.
//!
//! Element names are stored without their namespace prefix (`svg:path` is
//! stored as `path`), so documents that bind the SVG namespace to a prefix are
//! walked exactly like unprefixed ones. Attribute names are kept as written.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;

use super::SvgError;

/// A single element node with owned children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local (unprefixed) tag name.
    pub name: String,
    pub attributes: FxHashMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: FxHashMap::default(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by its written name.
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Depth-first pre-order walk, starting with `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Parse markup text into a tree rooted at its first top-level element.
    ///
    /// Near-well-formed input is accepted: an end tag closes the innermost
    /// open element whatever its name, stray end tags are ignored, and
    /// elements still open at end of input are closed implicitly. Anything
    /// after the first top-level element is ignored.
    pub fn parse(source: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => open.push(Self::from_start(&start, &reader)?),
                Ok(Event::Empty(start)) => {
                    let element = Self::from_start(&start, &reader)?;
                    attach(&mut open, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = open.pop() {
                        attach(&mut open, &mut root, element);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(source) => return Err(xml_error(&reader, source)),
            }
        }

        while let Some(element) = open.pop() {
            attach(&mut open, &mut root, element);
        }

        root.ok_or(SvgError::NoRoot)
    }

    fn from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, SvgError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = FxHashMap::default();
        for attr in start.attributes() {
            let attr = attr
                .map_err(quick_xml::Error::from)
                .map_err(|e| xml_error(reader, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(quick_xml::Error::from)
                .map_err(|e| xml_error(reader, e))?;
            attributes.insert(key, value.into_owned());
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

impl Drop for Element {
    /// Flattens the subtree onto a work stack so deep nesting drops without
    /// recursion.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut element) = stack.pop() {
            stack.append(&mut element.children);
        }
    }
}

/// Hand a closed element to its parent, or make it the root.
fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {}
    }
}

#[allow(clippy::unnecessary_cast)]
fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> SvgError {
    SvgError::Xml {
        position: reader.error_position() as u64,
        source,
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(root: &Element) -> Vec<&str> {
        root.descendants().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_parse_builds_nested_tree() {
        let root = Element::parse(
            r#"<?xml version="1.0"?>
<!DOCTYPE svg>
<svg viewBox="0 0 10 10"><!-- note --><g id="a"><path d="M0 0"/></g><rect/></svg>"#,
        )
        .unwrap();

        assert_eq!(root.name, "svg");
        assert_eq!(root.attr("viewBox"), Some("0 0 10 10"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attr("id"), Some("a"));
        assert_eq!(root.children[0].children[0].attr("d"), Some("M0 0"));
    }

    #[test]
    fn test_parse_strips_namespace_prefix() {
        let root = Element::parse(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:path d="M1 1"/></svg:svg>"#,
        )
        .unwrap();

        assert_eq!(names(&root), vec!["svg", "path"]);
        assert_eq!(
            root.attr("xmlns:svg"),
            Some("http://www.w3.org/2000/svg")
        );
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let root = Element::parse(r#"<svg><path d="M0 0 &amp; L1 1"/></svg>"#).unwrap();
        assert_eq!(root.children[0].attr("d"), Some("M0 0 & L1 1"));
    }

    #[test]
    fn test_parse_tolerates_unclosed_and_mismatched_tags() {
        let root = Element::parse("<svg><g><path d=\"M0 0\"></p></g><g>").unwrap();
        assert_eq!(names(&root), vec!["svg", "g", "path", "g"]);
    }

    #[test]
    fn test_parse_ignores_stray_end_and_trailing_elements() {
        let root = Element::parse("</x><svg/><svg id=\"second\"/>").unwrap();
        assert_eq!(root.name, "svg");
        assert!(root.attr("id").is_none());
    }

    #[test]
    fn test_parse_without_elements_fails() {
        assert!(matches!(Element::parse(""), Err(SvgError::NoRoot)));
        assert!(matches!(
            Element::parse("<?xml version=\"1.0\"?> just text"),
            Err(SvgError::NoRoot)
        ));
    }

    #[test]
    fn test_parse_reports_broken_markup() {
        let err = Element::parse("<svg><path d=\"M0 0/></svg>").unwrap_err();
        assert!(matches!(err, SvgError::Xml { .. }));
    }

    #[test]
    fn test_parse_and_drop_deeply_nested_groups() {
        let depth = 100_000;
        let source = format!(
            "<svg>{}<path d=\"M0 0\"/>{}</svg>",
            "<g>".repeat(depth),
            "</g>".repeat(depth)
        );

        let root = Element::parse(&source).unwrap();
        assert_eq!(root.descendants().count(), depth + 2);
        assert_eq!(
            root.descendants().last().and_then(|e| e.attr("d")),
            Some("M0 0")
        );
        drop(root);
    }

    #[test]
    fn test_descendants_is_depth_first_pre_order() {
        let root = Element::new("svg")
            .with_child(
                Element::new("g")
                    .with_child(Element::new("a"))
                    .with_child(Element::new("b")),
            )
            .with_child(Element::new("c"));

        assert_eq!(names(&root), vec!["svg", "g", "a", "b", "c"]);
    }
}
