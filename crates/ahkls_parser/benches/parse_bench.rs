//! Parser benchmark over a synthetic but representative script.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ahkls_parser::Parser;

fn sample_script(repeats: usize) -> String {
    let unit = r#"
#Include lib\common.ahk

global counter := 0, limit := 100

Tally(n, step := 1) {
    total := 0
    loop {
        total += step
        counter := counter + n * 2 ** 3
    }
    until total >= limit
    return total > limit ? limit : total
}

class Counter extends Base {
    Bump(amount) {
        this.value := this.value + amount
        return this.value
    }
}

^!t::
result := Tally(5, 2)
label_done:
return
"#;
    unit.repeat(repeats)
}

fn bench_parse(c: &mut Criterion) {
    let small = sample_script(1);
    let large = sample_script(64);

    c.bench_function("parse_small", |b| {
        b.iter(|| {
            let parser = Parser::new(black_box(&small), "bench.ahk");
            black_box(parser.parse())
        })
    });

    c.bench_function("parse_large", |b| {
        b.iter(|| {
            let parser = Parser::new(black_box(&large), "bench.ahk");
            black_box(parser.parse())
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
