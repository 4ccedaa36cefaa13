//! Canonical document serialization.
//!
//! Output shape is fixed:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
//!   <g fill="none" stroke="black" ... transform="translate(..) scale(..)">
//!     <path id="s1" d="..."/>
//!     ...
//!   </g>
//! </svg>
//! ```
//!
//! (written without the indentation shown above).

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::borrow::Cow;
use std::io::{Cursor, Write};

use super::{AffineTransform, PathRecord};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Root `viewBox` of every emitted document.
pub const CANONICAL_VIEWBOX: &str = "0 0 100 100";

/// Presentation attributes on the wrapping group, in output order.
/// Source styling is never carried over.
const STROKE_STYLE: [(&str, &str); 5] = [
    ("fill", "none"),
    ("stroke", "black"),
    ("stroke-width", "3"),
    ("stroke-linecap", "round"),
    ("stroke-linejoin", "round"),
];

/// Serialize the canonical document for `paths` under `transform`.
pub fn emit_document(transform: &AffineTransform, paths: &[PathRecord]) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(estimate_len(paths))));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.get_mut().write_all(b"\n")?;

    let svg = BytesStart::new("svg")
        .with_attributes([("xmlns", SVG_NAMESPACE), ("viewBox", CANONICAL_VIEWBOX)]);
    writer.write_event(Event::Start(svg))?;

    let transform = transform.to_attribute();
    let group = BytesStart::new("g")
        .with_attributes(STROKE_STYLE)
        .with_attributes([("transform", transform.as_str())]);
    writer.write_event(Event::Start(group))?;

    for record in paths {
        let id = record.id();
        let geometry = escape_attribute(&record.geometry);
        let path = BytesStart::new("path").with_attributes([
            Attribute::from(("id", id.as_str())),
            Attribute::from(("d".as_bytes(), geometry.as_bytes())),
        ]);
        writer.write_event(Event::Empty(path))?;
    }

    writer.write_event(Event::End(BytesEnd::new("g")))?;
    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Escape an attribute value, writing tab, LF and CR as character references.
///
/// Readers normalize literal whitespace in attribute values to spaces, so
/// these must be referenced to read back unchanged.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for ch in escaped.chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Rough output size: fixed envelope plus geometry.
fn estimate_len(paths: &[PathRecord]) -> usize {
    320 + paths
        .iter()
        .map(|record| record.geometry.len() + 24)
        .sum::<usize>()
}
