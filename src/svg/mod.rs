//! SVG normalization core.
//!
//! Rebases a document's drawable paths from whatever coordinate frame its
//! `viewBox` declares onto the canonical `0 0 100 100` square. Path data is
//! never rewritten; a single group transform does the mapping.
//!
//! # Modules
//!
//! - [`tree`]: typed element tree built from quick-xml events
//! - [`viewbox`]: tolerant `viewBox` parsing with a fixed fallback
//! - [`collect`]: depth-first extraction of `<path d>` geometry
//! - [`transform`]: translate-then-scale derivation
//! - [`emit`]: serialization of the canonical document
//!
//! # Architecture
//!
//! ```text
//!               source text
//!                    │
//!                    ▼
//!               ┌────────┐
//!               │  tree  │ ──► Element
//!               └───┬────┘
//!          ┌────────┴────────┐
//!          ▼                 ▼
//!     ┌─────────┐       ┌─────────┐
//!     │ viewbox │       │ collect │ ──► Vec<PathRecord>
//!     └────┬────┘       └────┬────┘
//!          ▼                 │
//!    ┌───────────┐           │
//!    │ transform │           │
//!    └─────┬─────┘           │
//!          └────────┬────────┘
//!                   ▼
//!               ┌────────┐
//!               │  emit  │ ──► canonical SVG text
//!               └────────┘
//! ```

mod collect;
mod emit;
mod error;
mod transform;
mod tree;
mod viewbox;

pub use collect::{PathRecord, collect_paths};
pub use emit::{CANONICAL_VIEWBOX, emit_document};
pub use error::SvgError;
pub use transform::AffineTransform;
pub use tree::Element;
pub use viewbox::ViewRect;
