// benches/codec_benchmark.rs
use chess_tcn::{decode_tcn, encode_tcn};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn codec_benchmark(c: &mut Criterion) {
    // 32 plies of plain moves; legality is irrelevant to the codec.
    let tcn = "mC0Kgv5Q".repeat(8);
    let moves = decode_tcn(&tcn).unwrap();

    c.bench_function("decode_tcn", |b| b.iter(|| decode_tcn(black_box(&tcn))));
    c.bench_function("encode_tcn", |b| b.iter(|| encode_tcn(black_box(&moves))));
}

criterion_group!(benches, codec_benchmark);
criterion_main!(benches);
