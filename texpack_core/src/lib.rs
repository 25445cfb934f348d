//! `texpack_core` is the engine behind [texpack](https://crates.io/crates/texpack_cli), a
//! tool that packs a LaTeX project into a flat, comment-free directory:
//! every `\input` document is rewritten, every figure is copied under a
//! canonical `fig<N>` name, and comments are stripped.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Root document
//!   → Locator (three literal scans: comments, figures, inputs)
//!   → Classifier (marks graphics that share a figure slot as sub-figures)
//!   → Transducer (walks the merged directives left to right)
//!       → Handlers (strip comments, count figures, copy assets, recurse into inputs)
//!   → Output directory (one packed copy per document, one file per figure)
//! ```
//!
//! ## Modules
//!
//! - [`directive`] — Directive locator and sub-figure classifier.
//! - [`filename`] — `[options]{filename}` argument extraction.
//! - [`assets`] — Canonical figure naming and asset copying.
//! - [`config`] — Configuration loading from `texpack.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use texpack_core::PackOptions;
//! use texpack_core::pack;
//!
//! let report = pack(Path::new("paper/main.tex"), &PackOptions::new("submission")).unwrap();
//! println!(
//! 	"{} document(s), {} figure(s)",
//! 	report.document_count(),
//! 	report.graphic_count()
//! );
//! ```

pub use counters::*;
pub use directive::DirectiveKind;
pub use error::*;
pub use handlers::*;
pub use pack::*;
pub use transducer::*;

pub mod assets;
pub mod config;
mod counters;
pub mod directive;
#[allow(unused_assignments)]
mod error;
pub mod filename;
mod handlers;
mod pack;
mod transducer;

#[cfg(test)]
mod __fixtures;
