//! Path geometry collection.

use super::Element;

/// One drawable path lifted out of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// 1-based position in document order.
    pub sequence_id: usize,
    /// Trimmed `d` attribute, verbatim.
    pub geometry: String,
}

impl PathRecord {
    /// Element id in the emitted document (`s1`, `s2`, ...).
    pub fn id(&self) -> String {
        format!("s{}", self.sequence_id)
    }
}

/// Collect every `<path>` with non-blank geometry, depth-first.
///
/// Ids are assigned in traversal order without gaps; skipped elements do not
/// consume an id.
pub fn collect_paths(root: &Element) -> Vec<PathRecord> {
    root.descendants()
        .filter(|element| element.name == "path")
        .filter_map(|element| element.attr("d").map(str::trim))
        .filter(|geometry| !geometry.is_empty())
        .zip(1..)
        .map(|(geometry, sequence_id)| PathRecord {
            sequence_id,
            geometry: geometry.to_owned(),
        })
        .collect()
}
