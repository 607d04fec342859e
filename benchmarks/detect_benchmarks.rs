#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Detection and normalization benchmarks
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use url_detector::{DetectorOptions, NormalizedUrl, UrlSpan, detect};

const PROSE: &str = "The release notes are at https://example.com/releases/1.2?lang=en#notes \
and mirrored on www.mirror.example.org/pub. Contact admin@example.net or ping \
192.168.1.10 if the mirror at http://[2001:db8::1]:8080/status is down. Version \
1.2.3 fixes a crash (see example.com/issues/42).";

const HTML: &str = "<p>Read <a href=\"http://docs.example.com/guide/intro\">the guide</a> \
or <a href='https://cdn.example.com/assets/app.js'>download</a>.</p>\
<img src=\"//static.example.com/logo.png\"><a href=\"mailto:team@example.com\">mail</a>";

fn bench_detect_prose(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_prose");
    group.throughput(Throughput::Bytes(PROSE.len() as u64));

    group.bench_function("default", |b| {
        b.iter(|| detect(black_box(PROSE), DetectorOptions::default()).unwrap());
    });

    group.bench_function("javascript", |b| {
        b.iter(|| detect(black_box(PROSE), DetectorOptions::JAVASCRIPT).unwrap());
    });

    group.finish();
}

fn bench_detect_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_html");
    group.throughput(Throughput::Bytes(HTML.len() as u64));

    group.bench_function("html", |b| {
        b.iter(|| detect(black_box(HTML), DetectorOptions::HTML).unwrap());
    });

    group.finish();
}

fn bench_detect_large(c: &mut Criterion) {
    let text = PROSE.repeat(200);
    let mut group = c.benchmark_group("detect_large");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("prose_x200", |b| {
        b.iter(|| detect(black_box(&text), DetectorOptions::default()).unwrap());
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let span = UrlSpan::create("https://WWW.Example.COM:443/a/./b/../c//d?q=1#top").unwrap();
    group.bench_function("domain", |b| {
        b.iter(|| black_box(&span).normalize());
    });

    let span = UrlSpan::create("http://0xC0A80101/%7Euser/").unwrap();
    group.bench_function("ipv4", |b| {
        b.iter(|| black_box(&span).normalize());
    });

    group.bench_function("create", |b| {
        b.iter(|| NormalizedUrl::create(black_box("http://münchen.de/a/../b")).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_detect_prose,
    bench_detect_html,
    bench_detect_large,
    bench_normalize
);
criterion_main!(benches);
