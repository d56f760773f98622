// Sample-level template API.
//
// `Template` wraps the builder with the sample hygiene the raw algorithm
// leaves to its caller: samples are cleaned and stripped of marker bytes
// before learning, and texts are cleaned the same way before extraction.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::builder::{BuildStats, MARKER, TemplateBuilder, Tolerance};
use crate::clean::{CleanMode, Cleaner};
use crate::error::TemplateError;
use crate::extract::Extractor;

/// Text substituted for holes by [`Template::as_text`] callers that have no
/// preference.
pub const DEFAULT_HOLE_TEXT: &str = "{{ HOLE }}";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for learning a template from samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Shared runs must be strictly longer than this to become literals.
    pub tolerance: Tolerance,
    /// How samples are normalised before comparison.
    pub clean: CleanMode,
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Literal text with holes where the samples differed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    bytes: Vec<u8>,
}

impl Template {
    /// Learn a template from two samples.
    pub fn from_samples(a: &[u8], b: &[u8], opts: &TemplateOptions) -> Result<Self, TemplateError> {
        Self::from_samples_with_stats(a, b, opts).map(|(template, _)| template)
    }

    /// [`Template::from_samples`], also returning the builder's counters.
    pub fn from_samples_with_stats(
        a: &[u8],
        b: &[u8],
        opts: &TemplateOptions,
    ) -> Result<(Self, BuildStats), TemplateError> {
        let a = prepare_sample(&opts.clean, a);
        let b = prepare_sample(&opts.clean, b);

        let mut bytes = Vec::new();
        let stats = TemplateBuilder::new(opts.tolerance).build_into(&a, &b, &mut bytes)?;
        Ok((Self { bytes }, stats))
    }

    /// Wrap bytes that already are a template, e.g. read back from disk.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn num_holes(&self) -> usize {
        self.bytes.iter().filter(|&&b| b == MARKER).count()
    }

    /// The template with every hole replaced by `hole_text`.
    pub fn as_text(&self, hole_text: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + self.num_holes() * hole_text.len());
        for &byte in &self.bytes {
            if byte == MARKER {
                out.extend_from_slice(hole_text);
            } else {
                out.push(byte);
            }
        }
        out
    }

    /// Compile the template for repeated extraction.
    pub fn extractor(&self) -> Result<Extractor, TemplateError> {
        Extractor::new(&self.bytes)
    }

    /// The data filling each hole of `text`, in template order.
    pub fn extract<C: Cleaner + ?Sized>(
        &self,
        text: &[u8],
        cleaner: &C,
    ) -> Result<Vec<Vec<u8>>, TemplateError> {
        let text = cleaner.clean(text);
        let extractor = self.extractor()?;
        let caps = extractor.captures(&text).ok_or(TemplateError::NoMatch)?;
        Ok(caps.into_iter().map(<[u8]>::to_vec).collect())
    }

    /// Like [`Template::extract`], keyed by `field_names`.
    ///
    /// Names pair up with holes in order; a `None` name skips its hole, and
    /// pairing stops at whichever list runs out first.
    pub fn extract_fields<C: Cleaner + ?Sized>(
        &self,
        text: &[u8],
        cleaner: &C,
        field_names: &[Option<&str>],
    ) -> Result<BTreeMap<String, Vec<u8>>, TemplateError> {
        let values = self.extract(text, cleaner)?;
        Ok(field_names
            .iter()
            .zip(values)
            .filter_map(|(name, value)| name.map(|n| (n.to_string(), value)))
            .collect())
    }
}

/// Clean a sample and remove any marker bytes so they cannot be mistaken
/// for holes.
fn prepare_sample<'t, C: Cleaner + ?Sized>(cleaner: &C, text: &'t [u8]) -> Cow<'t, [u8]> {
    let cleaned = cleaner.clean(text);
    if !cleaned.contains(&MARKER) {
        return cleaned;
    }
    Cow::Owned(cleaned.iter().copied().filter(|&b| b != MARKER).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
