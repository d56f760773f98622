// Sample normalisation applied before learning a template or extracting
// data with one.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::bytes::Regex;

static CRLF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n").expect("valid CRLF pattern"));

// The `regex` crate has no backreferences, so each element gets its own
// alternative with an explicit closing tag.
static UNWANTED_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?si-u)<\s*?script\b.*?</script>|<\s*?style\b.*?</style>|<\s*?noscript\b.*?</noscript>",
    )
    .expect("valid HTML cleanup pattern")
});

/// Strips content that should not take part in template matching.
pub trait Cleaner {
    /// Return the cleaned sample, borrowing when nothing had to change.
    fn clean<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]>;
}

/// Normalises Windows line endings to `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCleaner;

impl Cleaner for PlainCleaner {
    fn clean<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]> {
        CRLF.replace_all(text, &b"\n"[..])
    }
}

/// For HTML pages where the interesting differences are in the content, not
/// in scripts or styling: drops `<script>`, `<style>` and `<noscript>`
/// elements with everything inside them, then applies [`PlainCleaner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCleaner;

impl Cleaner for HtmlCleaner {
    fn clean<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]> {
        match UNWANTED_HTML.replace_all(text, &b""[..]) {
            Cow::Borrowed(unchanged) => PlainCleaner.clean(unchanged),
            Cow::Owned(stripped) => Cow::Owned(PlainCleaner.clean(&stripped).into_owned()),
        }
    }
}

/// Runtime choice of cleaner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanMode {
    #[default]
    Plain,
    Html,
}

impl Cleaner for CleanMode {
    fn clean<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]> {
        match self {
            Self::Plain => PlainCleaner.clean(text),
            Self::Html => HtmlCleaner.clean(text),
        }
    }
}
