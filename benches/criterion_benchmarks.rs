use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use templatemaker::builder::{Tolerance, make_template};
use templatemaker::clean::HtmlCleaner;
use templatemaker::matching::longest_match_slices;
use templatemaker::template::{Template, TemplateOptions};

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random_range(b'a'..=b'z')).collect()
}

/// Replace a short span every `stride` bytes, like data slotted into a
/// fixed layout.
fn mutate(base: &[u8], stride: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = base.to_vec();
    for i in (0..out.len()).step_by(stride.max(1)) {
        let end = (i + 4).min(out.len());
        for b in &mut out[i..end] {
            *b = rng.random_range(b'0'..=b'9');
        }
    }
    out
}

fn listing_page(rows: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut page = String::from("<html><head><script>init()</script></head><body><table>\n");
    for i in 0..rows {
        let price: u32 = rng.random_range(1..10_000);
        page.push_str(&format!(
            "<tr><td class=\"name\">item {i}</td><td class=\"price\">{price}</td></tr>\n"
        ));
    }
    page.push_str("</table></body></html>\n");
    page.into_bytes()
}

fn bench_longest_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("longest_match");
    for size in [256usize, 1024, 4096] {
        let a = gen_data(size, 1);
        let b = mutate(&a, size / 4, 2);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("quarter_mutated", size), &size, |bench, _| {
            bench.iter(|| longest_match_slices(black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("identical", size), &size, |bench, _| {
            bench.iter(|| longest_match_slices(black_box(&a), black_box(&a)))
        });
    }
    group.finish();
}

fn bench_make_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_template");
    for stride in [64usize, 256] {
        let a = gen_data(2048, 3);
        let b = mutate(&a, stride, 4);
        group.throughput(Throughput::Bytes(a.len() as u64));
        group.bench_with_input(BenchmarkId::new("stride", stride), &stride, |bench, _| {
            bench.iter(|| make_template(black_box(&a), black_box(&b), Tolerance::new(2)).unwrap())
        });
    }
    group.finish();
}

fn bench_html_learn_extract(c: &mut Criterion) {
    let a = listing_page(20, 5);
    let b = listing_page(20, 6);
    let third = listing_page(20, 7);
    let opts = TemplateOptions {
        tolerance: Tolerance::new(3),
        clean: templatemaker::clean::CleanMode::Html,
    };

    c.bench_function("html_learn", |bench| {
        bench.iter(|| Template::from_samples(black_box(&a), black_box(&b), &opts).unwrap())
    });

    let template = Template::from_samples(&a, &b, &opts).unwrap();
    c.bench_function("html_extract", |bench| {
        bench.iter(|| template.extract(black_box(&third), &HtmlCleaner))
    });
}

criterion_group!(
    benches,
    bench_longest_match,
    bench_make_template,
    bench_html_learn_extract
);
criterion_main!(benches);
