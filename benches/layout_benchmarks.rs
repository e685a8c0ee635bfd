use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;
use zkp_layout::{decode, ProofConfig, ProofPipeline, RawProof, SelectionSpec};

const CONFIG_JSON: &str = include_str!("../configs/keccak_goldilocks.json");
const SELECTION_JSON: &str = include_str!("../configs/keccak_goldilocks_selection.json");

fn sample_proof(config: &ProofConfig, trailer_len: usize) -> Vec<u8> {
    (0..config.fixed_len() + trailer_len)
        .map(|i| if i % 8 == 0 { (i % 251) as u8 } else { 0 })
        .collect()
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.measurement_time(Duration::from_secs(5));

    let config = ProofConfig::from_json_str(CONFIG_JSON).unwrap();
    let proof = sample_proof(&config, 120 * 1024);

    group.bench_function("reference_layout", |b| {
        b.iter(|| decode(black_box(&proof), black_box(&config)).unwrap())
    });

    let wide = ProofConfig::builder()
        .section("caps", 32, 256)
        .section("openings", 16, 4096)
        .build()
        .unwrap();
    let wide_proof = sample_proof(&wide, 0);
    group.bench_function("wide_layout", |b| {
        b.iter(|| decode(black_box(&wide_proof), black_box(&wide)).unwrap())
    });

    group.finish();
}

fn benchmark_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    group.measurement_time(Duration::from_secs(5));

    let config = Arc::new(ProofConfig::from_json_str(CONFIG_JSON).unwrap());
    let selection = SelectionSpec::from_json_str(SELECTION_JSON).unwrap();
    let pipeline = ProofPipeline::new(config.clone(), selection).unwrap();
    let proof = RawProof::from_bytes(sample_proof(&config, 120 * 1024)).unwrap();

    group.bench_function("prepare", |b| {
        b.iter(|| pipeline.prepare(black_box(&proof)).unwrap())
    });

    let input = pipeline.prepare(&proof).unwrap();
    group.bench_function("encode_argument", |b| {
        b.iter(|| black_box(&input).to_abi_bytes())
    });

    group.finish();
}

criterion_group!(benches, benchmark_decode, benchmark_assemble);
criterion_main!(benches);
