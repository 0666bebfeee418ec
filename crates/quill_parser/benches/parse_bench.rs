use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill_parser::Parser;

// A small program exercising every statement form.
const QUILL_SOURCE: &str = r#"
type number = number;
type flag = boolean;
let a = 1;
let b: number = 2;
let c: flag = true;
let d = a;
let e: number = a = b = 1234567890;
c = false;
d = e = a;
42;
"#;

/// The same shape repeated with fresh names, plus one broken statement per
/// block so recovery is measured too.
fn generated_source(blocks: usize) -> String {
    let mut source = String::from("type num = number;\n");
    for i in 0..blocks {
        source.push_str(&format!(
            "let x{i}: num = {i};\nlet y{i} = x{i} = {i};\nlet z{i} = ;\n"
        ));
    }
    source
}

fn bench_parse_small(c: &mut Criterion) {
    c.bench_function("parse_quill_small", |b| {
        b.iter(|| {
            let result = Parser::new(black_box(QUILL_SOURCE)).parse_module();
            black_box(result);
        });
    });
}

fn bench_parse_generated(c: &mut Criterion) {
    let source = generated_source(1_000);
    c.bench_function("parse_quill_3000_statements", |b| {
        b.iter(|| {
            let result = Parser::new(black_box(&source)).parse_module();
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_parse_small, bench_parse_generated);
criterion_main!(benches);
