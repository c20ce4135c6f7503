//! # MathSeek Core
//!
//! Decoding and presentation of step-by-step math solutions produced by a
//! language model.
//!
//! ## Overview
//!
//! The model is asked for a strict JSON [`SolveDocument`], but what comes back
//! is frequently looser than that: the JSON may arrive inside a Markdown code
//! fence, encoded twice as a JSON string, with numbers where strings were
//! expected, or not at all. This crate turns whatever arrived into either a
//! document or nothing, and then into a [`PresentationTree`] that a display
//! layer can walk without any further checks.
//!
//! ## Pipeline
//!
//! ```text
//! SolveEnvelope ──outcome()──► Outcome ──render_outcome()──► PresentationTree
//!      │                          │
//!      │ result                   └─ Document(SolveDocument) ─► render()
//!      ▼
//! RawResponse ──normalize()──► Option<SolveDocument>
//! ```
//!
//! - [`decode`]: lenient decoding of raw model output (two encoding layers, fenced JSON)
//! - [`document`]: the typed solution document
//! - [`render`]: sections and nodes with math split out of mixed text
//! - [`envelope`] / [`record`]: the solve endpoint reply and stored queries
//! - [`prompt`] / [`provider`]: request payloads for the model provider
//!
//! The pipeline never fails. Missing or mistyped fields only remove their own
//! part of the output; [`Error`] is reserved for reading raw payloads and
//! building prompts.
//!
//! ## Example
//!
//! ```
//! use mathseek_core::{SectionKind, SolveEnvelope, render_outcome};
//!
//! let envelope = SolveEnvelope::success(
//!     r#"{"problem_text":"x+1=2","final_answer":"The solution is $x=1$."}"#,
//! );
//! let tree = render_outcome(&envelope.outcome());
//!
//! assert_eq!(tree.sections[0].kind, SectionKind::Problem);
//! assert!(tree.section(SectionKind::FinalAnswer).is_some());
//! ```

pub mod decode;
pub mod document;
pub mod envelope;
pub mod prompt;
pub mod provider;
pub mod record;
pub mod render;

mod error;
mod lenient;

pub use decode::{RawResponse, decode_str, normalize};
pub use document::SolveDocument;
pub use envelope::{Outcome, SolveEnvelope, render_outcome};
pub use error::Error;
pub use record::{QueryList, StoredRecord};
pub use render::{Node, PresentationTree, Section, SectionKind, render};
