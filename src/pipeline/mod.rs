//! Normalization pipeline.
//!
//! One run turns one source document into one canonical document:
//!
//! ```text
//! read → parse → resolve viewBox ┐
//!              → collect paths ──┼→ derive transform → emit → write
//! ```
//!
//! [`normalize_str`] is the pure in-memory core; [`run`] wraps it with the
//! file I/O for a [`NormalizeJob`].


use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::debug;
use crate::svg::{
    AffineTransform, CANONICAL_VIEWBOX, Element, ViewRect, collect_paths, emit_document,
};

/// Stem suffix marking an unnormalized source (`07626.raw.svg`).
const RAW_SUFFIX: &str = ".raw";

/// Stem suffix used when the source has no [`RAW_SUFFIX`].
const NORM_SUFFIX: &str = ".norm";

/// Input and output location for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl NormalizeJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Job writing to [`default_output_path`].
    pub fn with_default_output(input: impl Into<PathBuf>, output_dir: Option<&Path>) -> Self {
        let input = input.into();
        let output = default_output_path(&input, output_dir);
        Self { input, output }
    }
}

/// Derive the output path for `input`.
///
/// `name.raw.svg` becomes `name.svg`; any other `name.ext` becomes
/// `name.norm.svg`. The file lands in `output_dir` when given, otherwise next
/// to the input.
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match stem.strip_suffix(RAW_SUFFIX) {
        Some(base) if !base.is_empty() => format!("{base}.svg"),
        _ => format!("{stem}{NORM_SUFFIX}.svg"),
    };

    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(file_name)
}

/// Result of normalizing one document in memory.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Serialized canonical document.
    pub svg: String,
    pub view_rect: ViewRect,
    pub transform: AffineTransform,
    pub path_count: usize,
}

/// Normalize SVG source text without touching the filesystem.
pub fn normalize_str(source: &str) -> Result<Normalized> {
    let root = Element::parse(source).context("Failed to parse SVG")?;

    let view_rect = ViewRect::resolve(root.attr("viewBox"));
    let paths = collect_paths(&root);
    let transform = AffineTransform::derive(&view_rect);

    let svg = emit_document(&transform, &paths).context("Failed to serialize SVG")?;

    Ok(Normalized {
        svg,
        view_rect,
        transform,
        path_count: paths.len(),
    })
}

/// Completion signal for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: PathBuf,
    pub path_count: usize,
}

/// Read, normalize, and write one document.
///
/// Nothing is written if reading or parsing fails. The output is replaced
/// atomically, so a failed write leaves any previous file untouched.
pub fn run(job: &NormalizeJob) -> Result<Report> {
    let source = fs::read_to_string(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;

    let normalized = normalize_str(&source)
        .with_context(|| format!("Failed to normalize {}", job.input.display()))?;

    debug!("normalize"; "{}: viewBox [{}] -> [{}] via {}",
        job.input.display(), normalized.view_rect, CANONICAL_VIEWBOX, normalized.transform);

    write_atomic(&job.output, normalized.svg.as_bytes())
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    Ok(Report {
        output: job.output.clone(),
        path_count: normalized.path_count,
    })
}

/// Write via a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
