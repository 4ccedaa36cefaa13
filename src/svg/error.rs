//! SVG parsing errors.

use thiserror::Error;

/// Errors raised while reading a source document.
///
/// Malformed `viewBox` values and path-less elements are not errors; they are
/// handled by default substitution further down the pipeline.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error at position {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document has no root element")]
    NoRoot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_error_display() {
        assert_eq!(
            SvgError::NoRoot.to_string(),
            "document has no root element"
        );
    }
}
