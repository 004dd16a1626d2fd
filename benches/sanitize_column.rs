use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sanitize_precision::csv_io;
use sanitize_precision::frame::Table;
use sanitize_precision::sanitize::sanitize_in_place;

fn generate_readings(rows: usize) -> String {
    let mut text = String::from("id,latitude,longitude,station\n");
    for i in 0..rows {
        let lat = -90.0 + (i as f64 * 0.000_731) % 180.0;
        let lon = -180.0 + (i as f64 * 0.001_417) % 360.0;
        text.push_str(&format!("{i},{lat},{lon},st-{}\n", i % 97));
    }
    text
}

fn bench_sanitize(c: &mut Criterion) {
    let text = generate_readings(100_000);
    let table: Table = csv_io::parse_table(&text, b',').expect("parse readings");

    let mut group = c.benchmark_group("sanitize_column");
    group.sample_size(20);
    group.bench_function("parse_csv_100k", |b| {
        b.iter(|| csv_io::parse_table(&text, b',').expect("parse readings"))
    });
    group.bench_function("round_latitude_100k", |b| {
        b.iter_batched(
            || table.clone(),
            |mut table| sanitize_in_place(&mut table, "latitude", 2).expect("sanitize"),
            BatchSize::LargeInput,
        )
    });
    group.bench_function("render_csv_100k", |b| {
        b.iter(|| csv_io::render_table(&table, b',').expect("render readings"))
    });
    group.finish();
}

criterion_group!(benches, bench_sanitize);
criterion_main!(benches);
