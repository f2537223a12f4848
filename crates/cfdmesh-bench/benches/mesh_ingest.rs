use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cfdmesh_comm::SingleRankCommunicator;
use cfdmesh_common::Label;
use cfdmesh_mesh::ingest_mesh;
use cfdmesh_testkit::StructuredGridSource;

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mesh/Ingest");
    for n in [3usize, 8, 16] {
        group.bench_with_input(BenchmarkId::new("StructuredCube", n), &n, |b, &n| {
            let source = StructuredGridSource::unit_cube(n);
            let assigned: Vec<Label> = (0..(n * n * n) as i64).map(Label).collect();
            b.iter(|| {
                black_box(ingest_mesh(&source, &assigned, Box::new(SingleRankCommunicator::new())).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
