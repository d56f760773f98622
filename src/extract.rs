// Pulls the variable data back out of a text that follows a template.
//
// The template is compiled into an anchored byte regex: literal bytes must
// appear verbatim, each marker becomes a lazy "anything" group. Lazy groups
// make earlier holes as short as possible when the split is ambiguous.

use regex::bytes::{Regex, RegexBuilder};

use crate::builder::MARKER;
use crate::error::TemplateError;

/// Templates built from large samples produce long patterns.
const PATTERN_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// A template compiled for repeated extraction.
#[derive(Debug, Clone)]
pub struct Extractor {
    regex: Regex,
    holes: usize,
}

impl Extractor {
    pub fn new(template: &[u8]) -> Result<Self, TemplateError> {
        let pattern = pattern_for(template);
        let regex = RegexBuilder::new(&pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;
        let holes = template.iter().filter(|&&b| b == MARKER).count();
        log::debug!(
            "compiled extraction pattern: {} template bytes, {holes} holes",
            template.len()
        );
        Ok(Self { regex, holes })
    }

    /// Number of capture groups, one per hole.
    pub fn holes(&self) -> usize {
        self.holes
    }

    /// The bytes filling each hole, in template order, or `None` if `text`
    /// does not follow the template.
    pub fn captures<'t>(&self, text: &'t [u8]) -> Option<Vec<&'t [u8]>> {
        let caps = self.regex.captures(text)?;
        // Every group sits on the only path through the pattern, so each one
        // participates in a successful match.
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or(&[][..], |m| m.as_bytes()))
                .collect(),
        )
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        self.regex.is_match(text)
    }
}

/// Translate template bytes into regex syntax.
///
/// Unicode mode is off so that `.` and `\xHH` address single bytes.
fn pattern_for(template: &[u8]) -> String {
    let mut pattern = String::with_capacity(template.len() * 2 + 12);
    pattern.push_str("(?s-u)^");
    for &byte in template {
        if byte == MARKER {
            pattern.push_str("(.*?)");
        } else if byte.is_ascii_alphanumeric() {
            pattern.push(char::from(byte));
        } else {
            pattern.push_str(&format!("\\x{byte:02X}"));
        }
    }
    pattern.push('$');
    pattern
}
