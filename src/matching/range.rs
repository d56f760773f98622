// Half-open windows over immutable byte slices.

use std::ops::Range;

/// A view of `data[start..end]` that remembers where it sits in `data`.
///
/// Offsets reported by the matcher are absolute indices into the full
/// slice, so the window keeps the whole slice plus its bounds rather than
/// re-slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange<'a> {
    data: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> ByteRange<'a> {
    /// Window covering all of `data`.
    pub fn full(data: &'a [u8]) -> Self {
        Self {
            data,
            start: 0,
            end: data.len(),
        }
    }

    /// Window over `data[range]`, or `None` if the range is inverted or
    /// runs past the end of `data`.
    pub fn new(data: &'a [u8], range: Range<usize>) -> Option<Self> {
        if range.start <= range.end && range.end <= data.len() {
            Some(Self {
                data,
                start: range.start,
                end: range.end,
            })
        } else {
            None
        }
    }

    /// Narrow to `[start, end)` of the same underlying slice.
    ///
    /// Callers only ever narrow to bounds derived from a match inside the
    /// current window, so the invariant is checked in debug builds only.
    pub(crate) fn with_bounds(self, start: usize, end: usize) -> Self {
        debug_assert!(self.start <= start && start <= end && end <= self.end);
        Self {
            data: self.data,
            start,
            end,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The full underlying slice (not just the window).
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The bytes inside the window.
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.start..self.end]
    }
}
