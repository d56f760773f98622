// File-level helpers for learning templates and extracting data.
//
// Samples and templates are small enough to read whole, so these wrap
// `std::fs::read` around the in-memory APIs and attach the offending path
// to any I/O failure.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::clean::CleanMode;
use crate::error::TemplateError;
use crate::matching::{Match, longest_match_slices};
use crate::template::{Template, TemplateOptions};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `make_template_files()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeStats {
    /// First sample size in bytes, before cleaning.
    pub a_size: u64,
    /// Second sample size in bytes, before cleaning.
    pub b_size: u64,
    /// Size of the produced template.
    pub template_size: u64,
    /// Number of holes in the template.
    pub holes: u64,
    /// Bytes of literal text kept from the first sample.
    pub literal_bytes: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file-level operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Reading a file failed.
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Building or applying the template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

fn read(path: &Path) -> Result<Vec<u8>, IoError> {
    fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Learn a template from two sample files.
pub fn make_template_files(
    a_path: &Path,
    b_path: &Path,
    opts: &TemplateOptions,
) -> Result<(Template, MakeStats), IoError> {
    let a = read(a_path)?;
    let b = read(b_path)?;
    let (template, build) = Template::from_samples_with_stats(&a, &b, opts)?;

    let stats = MakeStats {
        a_size: a.len() as u64,
        b_size: b.len() as u64,
        template_size: template.as_bytes().len() as u64,
        holes: build.markers as u64,
        literal_bytes: build.literal_bytes as u64,
    };
    log::info!(
        "learned template from {} and {}: {} bytes, {} holes",
        a_path.display(),
        b_path.display(),
        stats.template_size,
        stats.holes
    );
    Ok((template, stats))
}

/// Read a template file and extract the hole values from `input_path`.
pub fn extract_file(
    template_path: &Path,
    input_path: &Path,
    clean: CleanMode,
) -> Result<Vec<Vec<u8>>, IoError> {
    let template = Template::from_bytes(read(template_path)?);
    let input = read(input_path)?;
    Ok(template.extract(&input, &clean)?)
}

/// [`extract_file`] with the values keyed by `field_names` (see
/// [`Template::extract_fields`]).
pub fn extract_file_fields(
    template_path: &Path,
    input_path: &Path,
    clean: CleanMode,
    field_names: &[Option<&str>],
) -> Result<BTreeMap<String, Vec<u8>>, IoError> {
    let template = Template::from_bytes(read(template_path)?);
    let input = read(input_path)?;
    Ok(template.extract_fields(&input, &clean, field_names)?)
}

/// The longest run shared by two files, with absolute file offsets.
pub fn match_files(a_path: &Path, b_path: &Path) -> Result<Option<Match>, IoError> {
    let a = read(a_path)?;
    let b = read(b_path)?;
    let found = longest_match_slices(&a, &b);
    log::debug!(
        "longest run between {} and {}: {} bytes",
        a_path.display(),
        b_path.display(),
        found.map_or(0, |m| m.length)
    );
    Ok(found)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
