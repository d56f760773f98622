#![no_main]
use libfuzzer_sys::fuzz_target;
use templatemaker::builder::{MARKER, Tolerance, make_template};
use templatemaker::matching::longest_match_slices;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let tolerance = Tolerance::new((data[0] % 8) as usize);
    let split = 1 + (data[1] as usize % (data.len() - 1));
    let a = &data[1..split];
    let b = &data[split..];

    if let Some(m) = longest_match_slices(a, b) {
        assert_eq!(&a[m.a_offset..m.a_end()], &b[m.b_offset..m.b_end()]);
    }

    let template = make_template(a, b, tolerance).unwrap();
    let literal_bytes = template.iter().filter(|&&x| x != MARKER).count();
    assert!(literal_bytes <= a.len());
});
