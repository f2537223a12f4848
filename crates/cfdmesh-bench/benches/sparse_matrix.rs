use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cfdmesh_sparse::{MatrixStorage, SparseMatrix};

fn tridiagonal(n: usize) -> SparseMatrix {
    let mut matrix = SparseMatrix::new_csr(n, n, 0).unwrap();
    for i in 0..n as i64 {
        matrix.set_element(i, i, 2.0).unwrap();
        if i > 0 {
            matrix.set_element(i, i - 1, -1.0).unwrap();
        }
        if i + 1 < n as i64 {
            matrix.set_element(i, i + 1, -1.0).unwrap();
        }
    }
    matrix
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("SparseMatrix/Insert");
    for n in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("Tridiagonal", n), &n, |b, &n| {
            b.iter(|| black_box(tridiagonal(n)))
        });
    }
    group.finish();
}

fn bench_row_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("SparseMatrix/RowLookup");
    for n in [100usize, 1_000, 10_000] {
        let matrix = tridiagonal(n);
        group.bench_with_input(BenchmarkId::new("Tridiagonal", n), &n, |b, &n| {
            b.iter(|| {
                for row in 0..n as i64 {
                    black_box(matrix.row_values(row).unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insertion, bench_row_lookup);
criterion_main!(benches);
