use criterion::{black_box, criterion_group, criterion_main, Criterion};

use delf_core::parser::parse_structured;
use delf_core::sanitize::sanitize_response;

fn evaluation_json(corrections: usize) -> String {
    let items: Vec<String> = (0..corrections)
        .map(|i| {
            format!(
                r#"{{"type":"grammar","original":"faute {i}","correction":"correction {i}","explanation":"Accord","explanation_uk":"Узгодження","severity":"minor"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"score":18,"max_score":25,"feedback":"Bien","feedback_uk":"Добре","corrections":[{}],"strengths":["Clarté"],"strengths_uk":["Ясність"],"weaknesses":[],"weaknesses_uk":[],"recommendations":[],"recommendations_uk":[]}}"#,
        items.join(",")
    )
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    let payload = evaluation_json(10);
    let fenced = format!("```json\n{payload}\n```");
    let plain = payload.clone();

    group.bench_function("fenced", |b| {
        b.iter(|| sanitize_response(black_box(&fenced)))
    });

    group.bench_function("plain_passthrough", |b| {
        b.iter(|| sanitize_response(black_box(&plain)))
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_structured");

    let small = evaluation_json(1);
    let large = evaluation_json(200);
    let with_prose = format!("Voici mon évaluation :\n\n{small}\n\nBonne continuation !");
    let prose_only = "Je ne peux pas évaluer ce texte. ".repeat(50);

    group.bench_function("direct_small", |b| {
        b.iter(|| parse_structured(black_box(&small)))
    });

    group.bench_function("direct_200_corrections", |b| {
        b.iter(|| parse_structured(black_box(&large)))
    });

    group.bench_function("embedded_in_prose", |b| {
        b.iter(|| parse_structured(black_box(&with_prose)))
    });

    group.bench_function("no_json", |b| {
        b.iter(|| parse_structured(black_box(&prose_only)))
    });

    group.finish();
}

criterion_group!(benches, bench_sanitize, bench_parse);
criterion_main!(benches);
