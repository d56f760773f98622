// Template assembly: turns two samples into literals and markers.
//
// Each step finds the longest common run of the current pair of ranges,
// then splits the problem around it:
//   - left of the run in both samples   -> process that pair next
//   - left of the run in only one       -> a single marker
//   - the run itself, if long enough    -> copied verbatim from `a`
//   - right of the run (same rules as left), only if the run was copied
//
// A run at or below the tolerance suppresses both its literal and its right
// side. Nothing is emitted for that part of the input, not even a marker.
//
// Splits are driven from an explicit work stack rather than native
// recursion so that inputs with thousands of splits cannot exhaust the
// call stack. Output order is left, literal, right, exactly as a recursive
// walk would produce it.

use std::fmt;

use crate::error::TemplateError;
use crate::matching::{ByteRange, Match, longest_match};

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// The byte that stands for "variable data here" in a template (ASCII unit
/// separator).
///
/// Literal input bytes equal to `MARKER` are copied unescaped, so inside a
/// built template they cannot be told apart from real holes. Sample-level
/// APIs ([`crate::template::Template`]) strip the byte from their inputs;
/// [`make_template`] does not.
pub const MARKER: u8 = 0x1F;

const MARKER_BYTES: [u8; 1] = [MARKER];

/// The marker as a one-byte slice, for splitting or replacing on it.
pub fn marker() -> &'static [u8] {
    &MARKER_BYTES
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Minimum-length gate for shared runs. A run is kept as literal text only
/// if it is strictly longer than the tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(usize);

impl Tolerance {
    pub const ZERO: Tolerance = Tolerance(0);

    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether a run of `length` bytes is significant.
    pub const fn admits(self, length: usize) -> bool {
        length > self.0
    }
}

impl From<usize> for Tolerance {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Tolerance {
    type Error = TemplateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(TemplateError::NegativeTolerance(value));
        }
        // Anything past usize::MAX already rejects every possible run.
        Ok(Self(usize::try_from(value).unwrap_or(usize::MAX)))
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Build stats
// ---------------------------------------------------------------------------

/// Counters collected while building one template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Range pairs handed to the matcher.
    pub splits: usize,
    /// Runs copied into the template.
    pub literal_runs: usize,
    /// Bytes copied into the template.
    pub literal_bytes: usize,
    /// Markers written.
    pub markers: usize,
    /// Runs found but discarded by the tolerance gate.
    pub rejected_runs: usize,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Pending output, popped in LIFO order.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Match `a[a_start..a_end]` against `b[b_start..b_end]`.
    Split {
        a_start: usize,
        a_end: usize,
        b_start: usize,
        b_end: usize,
    },
    /// Copy `a[offset..offset + length]`.
    Literal { offset: usize, length: usize },
    Marker,
}

/// Reusable template builder.
///
/// Holds the tolerance and a scratch work stack that is kept between
/// builds to avoid reallocating it.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    tolerance: Tolerance,
    stack: Vec<Step>,
}

impl TemplateBuilder {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            stack: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Build the template for `a` and `b` into a fresh buffer.
    pub fn build(&mut self, a: &[u8], b: &[u8]) -> Result<Vec<u8>, TemplateError> {
        let mut out = Vec::new();
        self.build_into(a, b, &mut out)?;
        Ok(out)
    }

    /// Append the template for `a` and `b` to `out`.
    ///
    /// On error `out` holds whatever was appended before the failure.
    pub fn build_into(
        &mut self,
        a: &[u8],
        b: &[u8],
        out: &mut Vec<u8>,
    ) -> Result<BuildStats, TemplateError> {
        let mut stats = BuildStats::default();
        self.stack.clear();
        self.stack.push(Step::Split {
            a_start: 0,
            a_end: a.len(),
            b_start: 0,
            b_end: b.len(),
        });

        while let Some(step) = self.stack.pop() {
            match step {
                Step::Split {
                    a_start,
                    a_end,
                    b_start,
                    b_end,
                } => {
                    stats.splits += 1;
                    let ra = ByteRange::full(a).with_bounds(a_start, a_end);
                    let rb = ByteRange::full(b).with_bounds(b_start, b_end);
                    match longest_match(ra, rb) {
                        Some(m) => self.schedule(m, ra, rb, &mut stats),
                        None => {
                            log::trace!(
                                "no common run in a[{a_start}..{a_end}] b[{b_start}..{b_end}]"
                            );
                            self.stack.push(Step::Marker);
                        }
                    }
                }
                Step::Literal { offset, length } => {
                    append(out, &a[offset..offset + length])?;
                    stats.literal_runs += 1;
                    stats.literal_bytes += length;
                }
                Step::Marker => {
                    append(out, marker())?;
                    stats.markers += 1;
                }
            }
        }

        log::debug!(
            "built template: a={} b={} tolerance={} -> {} literal bytes, {} markers, {} splits",
            a.len(),
            b.len(),
            self.tolerance,
            stats.literal_bytes,
            stats.markers,
            stats.splits
        );
        Ok(stats)
    }

    /// Queue the output for one matched pair of ranges. Pushed in reverse
    /// so the left side pops first.
    fn schedule(
        &mut self,
        m: Match,
        ra: ByteRange<'_>,
        rb: ByteRange<'_>,
        stats: &mut BuildStats,
    ) {
        log::trace!(
            "run of {} at a={} b={} in a[{}..{}] b[{}..{}]",
            m.length,
            m.a_offset,
            m.b_offset,
            ra.start(),
            ra.end(),
            rb.start(),
            rb.end()
        );

        if self.tolerance.admits(m.length) {
            let right = side_step(m.a_end(), ra.end(), m.b_end(), rb.end());
            if let Some(step) = right {
                self.stack.push(step);
            }
            self.stack.push(Step::Literal {
                offset: m.a_offset,
                length: m.length,
            });
        } else {
            log::trace!(
                "run of {} within tolerance {}, dropping it and its right side",
                m.length,
                self.tolerance
            );
            stats.rejected_runs += 1;
        }

        let left = side_step(ra.start(), m.a_offset, rb.start(), m.b_offset);
        if let Some(step) = left {
            self.stack.push(step);
        }
    }
}

/// What to do with the leftover `a[a_start..a_end]` / `b[b_start..b_end]`
/// on one side of a run: split again if both sides have bytes, a marker if
/// only one does, nothing if both are empty.
fn side_step(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Option<Step> {
    match (a_start < a_end, b_start < b_end) {
        (true, true) => Some(Step::Split {
            a_start,
            a_end,
            b_start,
            b_end,
        }),
        (true, false) | (false, true) => Some(Step::Marker),
        (false, false) => None,
    }
}

fn append(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), TemplateError> {
    out.try_reserve(bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(())
}

/// Build a template from two samples.
///
/// The result interleaves literal runs copied from `a` with [`MARKER`]
/// bytes. Empty inputs produce a single marker.
pub fn make_template(a: &[u8], b: &[u8], tolerance: Tolerance) -> Result<Vec<u8>, TemplateError> {
    TemplateBuilder::new(tolerance).build(a, b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
