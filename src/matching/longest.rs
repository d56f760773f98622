// Longest common run between two byte ranges.
//
// The search walks every diagonal (fixed offset between an index into `a`
// and an index into `b`) and tracks the longest stretch of equal bytes.
// Diagonals are visited in two passes:
//
//                     (shift a against b)
//    -------------------------------------------------------
//    a             |  ABC            ABC             ABC
//    b             |  DEF           DEF            DEF
//    start in b    |  0             1              2
//    longest run   |  3             2              1
//
//                     (shift b against a)
//    -------------------------------------------------------
//    a             |  ABC           ABC            ABC
//    b             |  DEF            DEF             DEF
//    start in a    |  0             1              2
//    longest run   |  3             2              1
//
// Each pass starts from the widest overlap, so the possible run length only
// shrinks as the start index advances. Once it cannot beat the best run
// found so far, the pass stops. Identical inputs finish after one diagonal.

use super::range::ByteRange;

// ---------------------------------------------------------------------------
// Match result
// ---------------------------------------------------------------------------

/// The longest run of bytes shared by two ranges.
///
/// Offsets are absolute indices into the full slices the ranges were cut
/// from, not relative to the range starts. A run is never empty: the
/// absence of any common byte is reported as `None` by [`longest_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Number of equal bytes in the run (always at least 1).
    pub length: usize,
    /// Where the run starts in `a`.
    pub a_offset: usize,
    /// Where the run starts in `b`.
    pub b_offset: usize,
}

impl Match {
    /// One past the last matched byte in `a`.
    pub fn a_end(&self) -> usize {
        self.a_offset + self.length
    }

    /// One past the last matched byte in `b`.
    pub fn b_end(&self) -> usize {
        self.b_offset + self.length
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Find the longest run of bytes present in both `a` and `b`.
///
/// Among runs of equal length the first one found wins, where "first" is
/// the order of the scan: every start index in `b` against the start of
/// `a`, then every start index in `a` against the start of `b`. Repeated
/// calls on the same input always return the same offsets.
pub fn longest_match(a: ByteRange<'_>, b: ByteRange<'_>) -> Option<Match> {
    let mut hit = None;
    let best = shift_scan(a, b, 0, &mut hit);

    // Second pass sees the ranges swapped, so swap the recorded offsets too.
    let mut swapped = hit.map(|(a_off, b_off)| (b_off, a_off));
    let best = shift_scan(b, a, best, &mut swapped);

    swapped.map(|(b_offset, a_offset)| Match {
        length: best,
        a_offset,
        b_offset,
    })
}

/// [`longest_match`] over two whole slices.
pub fn longest_match_slices(a: &[u8], b: &[u8]) -> Option<Match> {
    longest_match(ByteRange::full(a), ByteRange::full(b))
}

/// One directional pass: hold `fixed` at its start and slide the start of
/// `moving` forward. Records `(fixed_offset, moving_offset)` in `hit`
/// whenever a run strictly longer than `best` appears, and returns the new
/// best length.
fn shift_scan(
    fixed: ByteRange<'_>,
    moving: ByteRange<'_>,
    mut best: usize,
    hit: &mut Option<(usize, usize)>,
) -> usize {
    let fixed_bytes = fixed.as_slice();
    let moving_data = moving.data();

    for start in moving.start()..moving.end() {
        let overlap = (moving.end() - start).min(fixed_bytes.len());
        if best >= overlap {
            break;
        }

        let mut run = 0usize;
        for (step, (x, y)) in fixed_bytes
            .iter()
            .zip(&moving_data[start..moving.end()])
            .enumerate()
        {
            if x != y {
                run = 0;
                continue;
            }
            run += 1;
            if run > best {
                best = run;
                let run_start = step + 1 - run;
                *hit = Some((fixed.start() + run_start, start + run_start));
            }
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
