//! Templatemaker: learn a template from two samples, then extract data with it.
//!
//! The crate provides:
//! - Longest-common-run search over byte ranges (`matching`)
//! - Template assembly from two samples (`builder`)
//! - Sample cleaning, templates and data extraction (`clean`, `template`, `extract`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use templatemaker::builder::{Tolerance, make_template};
//!
//! // 0x1F marks the hole where the samples differ.
//! let template = make_template(b"hello dad", b"hello mom", Tolerance::ZERO).unwrap();
//! assert_eq!(template, b"hello \x1f");
//! ```
//!
//! Sample-level learning and extraction:
//!
//! ```
//! use templatemaker::clean::PlainCleaner;
//! use templatemaker::template::{Template, TemplateOptions};
//!
//! let opts = TemplateOptions::default();
//! let t = Template::from_samples(b"<b>this and that</b>", b"<b>alex and sue</b>", &opts).unwrap();
//! assert_eq!(t.as_text(b"{}"), b"<b>{} and {}</b>");
//! let data = t.extract(b"<b>fine and dandy</b>", &PlainCleaner).unwrap();
//! assert_eq!(data, vec![b"fine".to_vec(), b"dandy".to_vec()]);
//! ```

pub mod builder;
pub mod clean;
pub mod error;
pub mod extract;
pub mod io;
pub mod matching;
pub mod template;

#[cfg(feature = "cli")]
pub mod cli;

pub use builder::{MARKER, TemplateBuilder, Tolerance, make_template, marker};
pub use error::TemplateError;
pub use matching::{ByteRange, Match, longest_match};
pub use template::{Template, TemplateOptions};
