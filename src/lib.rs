//! casemind - Bidirectional test-case converter between Excel sheets and XMind mind maps
//!
//! This crate converts structured test-case data between a tabular
//! spreadsheet representation (one row per case: module path, case name,
//! precondition, steps, expected result, vehicle type, priority) and a
//! hierarchical mind-map representation (nested topics keyed by module-path
//! segments, with the remaining fields packed into a labeled notes blob on
//! leaf topics).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use casemind::{ConverterBuilder, LogDiagnostics};
//!
//! fn main() -> Result<(), casemind::ConvertError> {
//!     // Direction is detected from the file extension
//!     let converter = ConverterBuilder::new().build();
//!     let outputs = converter.convert_file(Path::new("cases.xlsx"), &mut LogDiagnostics)?;
//!     for path in outputs {
//!         println!("wrote {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Explicit direction and output directory
//!
//! ```rust,no_run
//! use std::path::Path;
//! use casemind::{ConversionKind, ConverterBuilder, LogDiagnostics};
//!
//! # fn main() -> Result<(), casemind::ConvertError> {
//! let converter = ConverterBuilder::new()
//!     .with_kind(ConversionKind::XmindToExcel)
//!     .with_output_dir("/tmp/converted")
//!     .build();
//! converter.convert_file(Path::new("cases.xmind"), &mut LogDiagnostics)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Capturing diagnostics
//!
//! Converters report row-level skips and per-sheet summaries through an
//! injected [`Diagnostics`] sink instead of a global logger, so callers
//! (and tests) can capture them deterministically:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use casemind::{ConverterBuilder, MemoryDiagnostics};
//!
//! # fn main() -> Result<(), casemind::ConvertError> {
//! let converter = ConverterBuilder::new().build();
//! let mut diag = MemoryDiagnostics::new();
//! converter.convert_file(Path::new("cases.xlsx"), &mut diag)?;
//! for (level, message) in &diag.records {
//!     eprintln!("[{level}] {message}");
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod security;

pub mod convert;
pub mod diagnostics;
pub mod excel;
pub mod hierarchy;
pub mod notes;
pub mod sheet_title;
pub mod types;
pub mod validate;
pub mod xmind;

// 公開API
pub use api::ConversionKind;
pub use builder::{Converter, ConverterBuilder};
pub use diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics};
pub use error::ConvertError;
pub use notes::{decode_notes, encode_notes, NoteFields};
pub use types::{TestCaseRow, TopicNode};
