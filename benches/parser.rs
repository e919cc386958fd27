use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snake_client::core::parser::{matching_bracket, split_groups};
use snake_client::core::parse;

fn snapshot_doc(len: usize) -> String {
    let snake: Vec<String> = (0..len).map(|i| format!("[{}, {}]", i % 20, i / 20)).collect();
    format!(
        r#"{{"snake": [{}], "food": [3, 3], "score": {}, "game_over": false, "width": 20, "height": 15}}"#,
        snake.join(", "),
        len * 10
    )
}

fn bench_parse(c: &mut Criterion) {
    let short = snapshot_doc(3);
    let long = snapshot_doc(300);

    c.bench_function("parse_snake_3", |b| b.iter(|| parse(black_box(&short))));
    c.bench_function("parse_snake_300", |b| b.iter(|| parse(black_box(&long))));
}

fn bench_scan(c: &mut Criterion) {
    let doc = snapshot_doc(300);
    let open = doc.find("[[").unwrap_or(0);

    c.bench_function("matching_bracket_300", |b| {
        b.iter(|| matching_bracket(black_box(&doc), black_box(open)))
    });

    let span = match matching_bracket(&doc, open) {
        Some(close) => doc[open..=close].to_string(),
        None => String::new(),
    };
    c.bench_function("split_groups_300", |b| b.iter(|| split_groups(black_box(&span))));
}

criterion_group!(benches, bench_parse, bench_scan);
criterion_main!(benches);
