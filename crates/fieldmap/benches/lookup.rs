// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name Lookup Benchmark
//!
//! Measures the cost of resolving logical names on a warm mapper against a
//! cold discovery run:
//! - first-request discovery of a nested record type
//! - cached single-name write lookup
//! - batch lookups and location resolution

#![allow(clippy::uninlined_format_args)]

use criterion::{criterion_group, criterion_main, Criterion};
use fieldmap::{Mapper, Reflect, Typed};
use std::hint::black_box as bb;

#[derive(Debug, Default, Reflect)]
pub struct Meta {
    #[reflect(tag(db = "created_at"))]
    pub created_at: u64,
    #[reflect(tag(db = "updated_at"))]
    pub updated_at: u64,
}

#[derive(Debug, Default, Reflect)]
pub struct Geo {
    #[reflect(tag(db = "lat"))]
    pub lat: f64,
    #[reflect(tag(db = "lon"))]
    pub lon: f64,
}

#[derive(Debug, Default, Reflect)]
pub struct Customer {
    #[reflect(tag(db = "id"))]
    pub id: u64,
    #[reflect(tag(db = "name"))]
    pub name: String,
    #[reflect(embed)]
    pub meta: Meta,
    #[reflect(tag(db = "geo"))]
    pub geo: Geo,
    #[reflect(tag(db = "backup"))]
    pub backup: Option<Geo>,
}

const NAMES: [&str; 5] = ["id", "name", "created_at", "geo.lat", "missing"];

fn bench_discovery(c: &mut Criterion) {
    c.bench_function("discovery_cold", |b| {
        b.iter(|| {
            let mapper = Mapper::new("db");
            bb(mapper.type_map_of::<Customer>().expect("record"));
        });
    });
}

fn bench_cached_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_lookup");
    let mapper = Mapper::new("db");
    mapper.type_map_of::<Customer>().expect("record");

    group.bench_function("field_by_name_nested", |b| {
        let mut customer = Customer::default();
        b.iter(|| {
            let lat = mapper
                .field_by_name(&mut customer, bb("geo.lat"))
                .expect("record");
            bb(lat.is_nil());
        });
    });

    group.bench_function("field_by_name_read_only", |b| {
        let customer = Customer::default();
        b.iter(|| {
            bb(mapper
                .field_by_name_read_only(&customer, bb("created_at"))
                .expect("record")
                .is_some());
        });
    });

    group.bench_function("fields_by_name_5", |b| {
        let mut customer = Customer::default();
        b.iter(|| {
            let fields = mapper
                .fields_by_name(&mut customer, &NAMES)
                .expect("record");
            bb(fields.len());
        });
    });

    group.bench_function("traversals_by_name_5", |b| {
        b.iter(|| {
            bb(mapper
                .traversals_by_name(Customer::type_info(), &NAMES)
                .expect("record"));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_discovery, bench_cached_lookups);
criterion_main!(benches);
