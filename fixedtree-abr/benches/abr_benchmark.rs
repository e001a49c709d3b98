#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use fixedtree_abr::{FixedAbrTree, input_size_for_height};
use fixedtree_hash::{OneBlockHasher, Sha256Compress, Sha512Compress};
use rand::Rng;

fn random_input<H: OneBlockHasher>(height: usize) -> Vec<u8> {
    let mut buf = vec![0u8; input_size_for_height::<H>(height)];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn bench(c: &mut Criterion) {
    let heights = [4usize, 8, 12, 16];

    {
        let mut group = c.benchmark_group("ABR build sha256");
        for height in heights {
            let input = random_input::<Sha256Compress>(height);
            group.bench_with_input(BenchmarkId::new("height", height), &input, |b, input| {
                b.iter(|| FixedAbrTree::<Sha256Compress>::build(height, input).unwrap());
            });
        }
    }

    {
        let mut group = c.benchmark_group("ABR build sha512");
        for height in heights {
            let input = random_input::<Sha512Compress>(height);
            group.bench_with_input(BenchmarkId::new("height", height), &input, |b, input| {
                b.iter(|| FixedAbrTree::<Sha512Compress>::build(height, input).unwrap());
            });
        }
    }

    c.bench_function("ABR auth paths height 12", |b| {
        let input = random_input::<Sha256Compress>(12);
        let tree = FixedAbrTree::<Sha256Compress>::build(12, &input).unwrap();
        b.iter(|| {
            for leaf in 0..tree.leaf_count() {
                tree.auth_path(leaf).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
