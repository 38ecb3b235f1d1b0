//! Benchmarks for curvature estimation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use facetkit::algo::create::create_icosphere;
use facetkit::algo::curvature::{update_principal_curvature, CurvatureAlgorithm, CurvatureOptions};
use facetkit::algo::logger::NullLogger;
use facetkit::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
use facetkit::prelude::*;

fn prepared_sphere(subdivisions: usize) -> PolyMesh {
    let mut mesh: PolyMesh = create_icosphere(1.0, subdivisions);
    update_per_vertex_adjacent_faces(&mut mesh);
    update_per_face_adjacent_faces(&mut mesh);
    mesh.enable_per_vertex_principal_curvature();
    mesh
}

fn bench_topology(c: &mut Criterion) {
    let mesh: PolyMesh = create_icosphere(1.0, 4);

    c.bench_function("face_adjacency_ico4", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            update_per_face_adjacent_faces(&mut m);
            m
        });
    });
}

fn bench_taubin(c: &mut Criterion) {
    let mut group = c.benchmark_group("taubin95");
    let mesh = prepared_sphere(4);

    for (name, options) in [
        ("parallel", CurvatureOptions::default()),
        ("sequential", CurvatureOptions::default().sequential()),
    ] {
        group.bench_function(BenchmarkId::new("ico4", name), |b| {
            let mut m = mesh.clone();
            b.iter(|| update_principal_curvature(&mut m, &options, &NullLogger));
        });
    }
    group.finish();
}

fn bench_pca(c: &mut Criterion) {
    let mut group = c.benchmark_group("pca");
    group.sample_size(10);

    let montecarlo = CurvatureOptions::default().with_algorithm(CurvatureAlgorithm::Pca);
    let exact = montecarlo.clone().with_montecarlo_sampling(false).with_radius(0.2);

    let mesh = prepared_sphere(4);
    group.bench_function("montecarlo_ico4", |b| {
        let mut m = mesh.clone();
        b.iter(|| update_principal_curvature(&mut m, &montecarlo, &NullLogger));
    });

    let small = prepared_sphere(2);
    group.bench_function("exact_ico2", |b| {
        let mut m = small.clone();
        b.iter(|| update_principal_curvature(&mut m, &exact, &NullLogger));
    });
    group.finish();
}

criterion_group!(benches, bench_topology, bench_taubin, bench_pca);
criterion_main!(benches);
