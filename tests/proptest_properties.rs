use proptest::prelude::*;
use templatemaker::builder::{MARKER, Tolerance, make_template};
use templatemaker::matching::{ByteRange, longest_match, longest_match_slices};

/// Longest common run by checking every pair of start positions.
fn brute_force_longest(a: &[u8], b: &[u8]) -> usize {
    let mut best = 0;
    for i in 0..a.len() {
        for j in 0..b.len() {
            let run = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            best = best.max(run);
        }
    }
    best
}

/// Straightforward scan in the matcher's documented order: every start in
/// `b` against the start of `a`, then every start in `a` against the start
/// of `b`, replacing the best run only when a strictly longer one appears.
/// Returns `(length, a_offset, b_offset)` in absolute indices.
fn reference_longest(
    a: &[u8],
    (a_start, a_end): (usize, usize),
    b: &[u8],
    (b_start, b_end): (usize, usize),
) -> Option<(usize, usize, usize)> {
    let mut best = 0;
    let mut found = None;

    for i in b_start..b_end {
        let (mut j, mut k, mut run) = (a_start, i, 0);
        while j < a_end && k < b_end {
            if a[j] == b[k] {
                run += 1;
                if run > best {
                    best = run;
                    found = Some((run, j + 1 - run, k + 1 - run));
                }
            } else {
                run = 0;
            }
            j += 1;
            k += 1;
        }
    }

    for i in a_start..a_end {
        let (mut j, mut k, mut run) = (b_start, i, 0);
        while j < b_end && k < a_end {
            if b[j] == a[k] {
                run += 1;
                if run > best {
                    best = run;
                    found = Some((run, k + 1 - run, j + 1 - run));
                }
            } else {
                run = 0;
            }
            j += 1;
            k += 1;
        }
    }

    found
}

/// Recursive left / literal / right template assembly over
/// [`reference_longest`].
fn reference_template(
    a: &[u8],
    (a_start, a_end): (usize, usize),
    b: &[u8],
    (b_start, b_end): (usize, usize),
    tolerance: usize,
    out: &mut Vec<u8>,
) {
    let Some((length, a_off, b_off)) = reference_longest(a, (a_start, a_end), b, (b_start, b_end))
    else {
        out.push(MARKER);
        return;
    };

    match (a_off > a_start, b_off > b_start) {
        (true, true) => {
            reference_template(a, (a_start, a_off), b, (b_start, b_off), tolerance, out)
        }
        (true, false) | (false, true) => out.push(MARKER),
        (false, false) => {}
    }

    if length > tolerance {
        out.extend_from_slice(&a[a_off..a_off + length]);
        let (a_rest, b_rest) = (a_off + length, b_off + length);
        match (a_rest < a_end, b_rest < b_end) {
            (true, true) => {
                reference_template(a, (a_rest, a_end), b, (b_rest, b_end), tolerance, out)
            }
            (true, false) | (false, true) => out.push(MARKER),
            (false, false) => {}
        }
    }
}

/// True if `needle` appears in order (not necessarily contiguously) in
/// `haystack`.
fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

// Small alphabets make shared runs likely.
fn sample() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()], 0..48)
}

proptest! {
    #[test]
    fn prop_matcher_finds_longest_equal_run(a in sample(), b in sample()) {
        let expected = brute_force_longest(&a, &b);
        match longest_match_slices(&a, &b) {
            Some(m) => {
                prop_assert_eq!(m.length, expected);
                prop_assert!(m.a_end() <= a.len());
                prop_assert!(m.b_end() <= b.len());
                prop_assert_eq!(&a[m.a_offset..m.a_end()], &b[m.b_offset..m.b_end()]);
            }
            None => prop_assert_eq!(expected, 0),
        }
    }

    #[test]
    fn prop_matcher_stays_inside_sub_ranges(
        a in sample(),
        b in sample(),
        cuts in (0usize..48, 0usize..48, 0usize..48, 0usize..48)
    ) {
        let (a0, a1) = (cuts.0.min(a.len()), cuts.1.min(a.len()));
        let (b0, b1) = (cuts.2.min(b.len()), cuts.3.min(b.len()));
        let ra = ByteRange::new(&a, a0.min(a1)..a0.max(a1)).unwrap();
        let rb = ByteRange::new(&b, b0.min(b1)..b0.max(b1)).unwrap();
        let expected = brute_force_longest(ra.as_slice(), rb.as_slice());
        match longest_match(ra, rb) {
            Some(m) => {
                prop_assert_eq!(m.length, expected);
                prop_assert!(m.a_offset >= ra.start() && m.a_end() <= ra.end());
                prop_assert!(m.b_offset >= rb.start() && m.b_end() <= rb.end());
            }
            None => prop_assert_eq!(expected, 0),
        }
    }

    #[test]
    fn prop_matcher_tie_break_follows_scan_order(a in sample(), b in sample()) {
        let got = longest_match_slices(&a, &b).map(|m| (m.length, m.a_offset, m.b_offset));
        prop_assert_eq!(got, reference_longest(&a, (0, a.len()), &b, (0, b.len())));
    }

    #[test]
    fn prop_matcher_tie_break_inside_sub_ranges(
        a in sample(),
        b in sample(),
        cuts in (0usize..48, 0usize..48, 0usize..48, 0usize..48)
    ) {
        let (a0, a1) = (cuts.0.min(a.len()), cuts.1.min(a.len()));
        let (b0, b1) = (cuts.2.min(b.len()), cuts.3.min(b.len()));
        let (a0, a1) = (a0.min(a1), a0.max(a1));
        let (b0, b1) = (b0.min(b1), b0.max(b1));
        let ra = ByteRange::new(&a, a0..a1).unwrap();
        let rb = ByteRange::new(&b, b0..b1).unwrap();
        let got = longest_match(ra, rb).map(|m| (m.length, m.a_offset, m.b_offset));
        prop_assert_eq!(got, reference_longest(&a, (a0, a1), &b, (b0, b1)));
    }

    #[test]
    fn prop_template_matches_recursive_assembly(
        a in sample(),
        b in sample(),
        tolerance in 0usize..5
    ) {
        let mut expected = Vec::new();
        reference_template(&a, (0, a.len()), &b, (0, b.len()), tolerance, &mut expected);
        prop_assert_eq!(make_template(&a, &b, Tolerance::new(tolerance)).unwrap(), expected);
    }

    #[test]
    fn prop_literals_are_a_subsequence_of_first(
        a in sample(),
        b in sample(),
        tolerance in 0usize..4
    ) {
        // Marker bytes in `a` would be indistinguishable from holes.
        let a: Vec<u8> = a.into_iter().filter(|&x| x != MARKER).collect();
        let out = make_template(&a, &b, Tolerance::new(tolerance)).unwrap();
        let literals: Vec<u8> = out.iter().copied().filter(|&x| x != MARKER).collect();
        prop_assert!(is_subsequence(&literals, &a));
        prop_assert!(literals.len() <= a.len());
    }

    #[test]
    fn prop_identical_inputs_round_trip(
        s in proptest::collection::vec(any::<u8>(), 1..64),
        slack in 1usize..8
    ) {
        let tolerance = s.len().saturating_sub(slack);
        prop_assert_eq!(make_template(&s, &s, Tolerance::new(tolerance)).unwrap(), s);
    }

    #[test]
    fn prop_markers_bounded_by_splits(a in sample(), b in sample()) {
        let a: Vec<u8> = a.into_iter().filter(|&x| x != MARKER).collect();
        let out = make_template(&a, &b, Tolerance::ZERO).unwrap();
        let markers = out.iter().filter(|&&x| x == MARKER).count();
        // Consecutive markers never appear and each literal run is at least
        // one byte, so markers can at most alternate with literals.
        prop_assert!(markers <= a.len().min(b.len()) + 1);
        prop_assert!(!out.windows(2).any(|w| w == [MARKER, MARKER]));
    }
}

#[test]
#[ignore = "performance properties are workload and machine dependent"]
fn perf_property_identical_inputs_stop_early() {
    use std::time::Instant;
    let s: Vec<u8> = (0..2_000_000u32).map(|i| (i % 251) as u8).collect();
    let t0 = Instant::now();
    let out = make_template(&s, &s, Tolerance::ZERO).unwrap();
    let dt = t0.elapsed();
    assert_eq!(out, s);
    assert!(dt.as_secs_f64() < 20.0, "build took {:?}", dt);
}
