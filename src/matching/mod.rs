// Longest-common-substring search over byte ranges.
//
// This module provides:
// - `ByteRange`, a zero-copy half-open window over a byte slice
// - The two-pass diagonal scan that finds the longest shared run

pub mod longest;
pub mod range;

pub use longest::{Match, longest_match, longest_match_slices};
pub use range::ByteRange;
