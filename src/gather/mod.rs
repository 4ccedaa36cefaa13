//! Character-keyed SVG gathering.
//!
//! Stroke sources such as KanjiVG name each file after the character's code
//! point in hex (`4e9c.svg` for `亜`). Given a list of characters, this copies
//! the matching files out of a source directory and reports which characters
//! had none. It feeds `*.svg` files to the normalizer but shares no state with
//! it.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logger::ProgressLine;

/// What to copy, from where, to where.
#[derive(Debug, Clone)]
pub struct GatherRequest {
    pub keys: Vec<char>,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// A key with no file in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    pub key: char,
    /// Lowercase file name that was looked for.
    pub expected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatherReport {
    pub copied: usize,
    /// Missing keys, in request order.
    pub missing: Vec<Missing>,
}

/// File name for `key`: lowercase hex code point, at least four digits.
#[inline]
pub fn char_file_name(key: char) -> String {
    format!("{:04x}.svg", key as u32)
}

/// Keys from a literal string; whitespace is ignored.
pub fn keys_from_str(keys: &str) -> Vec<char> {
    keys.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Keys from a JSON manifest: an array of objects whose `field` holds a
/// single-character string. Entries that don't fit are skipped.
pub fn keys_from_manifest(path: &Path, field: &str) -> Result<Vec<char>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let manifest: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
    keys_from_json(&manifest, field)
        .with_context(|| format!("Invalid manifest {}", path.display()))
}

fn keys_from_json(manifest: &JsonValue, field: &str) -> Result<Vec<char>> {
    let Some(entries) = manifest.as_array() else {
        bail!("expected a JSON array of objects");
    };

    Ok(entries
        .iter()
        .filter_map(|entry| entry.get(field)?.as_str())
        .filter_map(single_char)
        .collect())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Source file for `name`: the lowercase name, else its uppercase forms.
fn locate(source: &Path, name: &str) -> Option<PathBuf> {
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    let upper_stem = format!("{}.{}", stem.to_ascii_uppercase(), ext);
    let upper_all = name.to_ascii_uppercase();

    [name, upper_stem.as_str(), upper_all.as_str()]
        .into_iter()
        .map(|candidate| source.join(candidate))
        .find(|path| path.is_file())
}

/// Copy every key's file from `request.source` into `request.output`.
///
/// Duplicate keys are copied once. Copies run in parallel.
pub fn gather(request: &GatherRequest, progress: Option<&ProgressLine>) -> Result<GatherReport> {
    if !request.source.is_dir() {
        bail!("source directory {} does not exist", request.source.display());
    }
    fs::create_dir_all(&request.output)
        .with_context(|| format!("Failed to create {}", request.output.display()))?;

    let mut seen = FxHashSet::default();
    let keys: Vec<char> = request
        .keys
        .iter()
        .copied()
        .filter(|key| seen.insert(*key))
        .collect();

    let outcomes: Vec<Option<Missing>> = keys
        .par_iter()
        .map(|&key| -> Result<Option<Missing>> {
            let name = char_file_name(key);
            let Some(src) = locate(&request.source, &name) else {
                return Ok(Some(Missing {
                    key,
                    expected: name,
                }));
            };

            let dst = request.output.join(&name);
            fs::copy(&src, &dst).with_context(|| {
                format!("Failed to copy {} to {}", src.display(), dst.display())
            })?;
            if let Some(progress) = progress {
                progress.inc("copied");
            }
            Ok(None)
        })
        .collect::<Result<_>>()?;

    let missing: Vec<Missing> = outcomes.into_iter().flatten().collect();
    Ok(GatherReport {
        copied: keys.len() - missing.len(),
        missing,
    })
}
