//! Scanner throughput benchmarks.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use slatec_lex::{Scanner, Token};
use slatec_util::SymbolTable;

fn sample_program(statements: usize) -> String {
    let mut source = String::from("begin\ndim total, count : integer;\ndim ratio : real;\n");
    for i in 0..statements {
        source.push_str(&format!("total as total plus {i} mult 2;\n"));
        source.push_str("{ running total }\n");
    }
    source.push_str("write ( total )\nend\n");
    source
}

fn scan_to_eof(source: &str) -> usize {
    let mut symtab = SymbolTable::new();
    let mut scanner = Scanner::new(Cursor::new(source.to_owned()));
    let mut count = 0;
    while scanner.get_next_token(&mut symtab).unwrap() != Token::Eof {
        count += 1;
    }
    count
}

fn bench_scanner(c: &mut Criterion) {
    let small = sample_program(10);
    let large = sample_program(1_000);

    c.bench_function("scan_small_program", |b| {
        b.iter(|| scan_to_eof(black_box(&small)))
    });
    c.bench_function("scan_large_program", |b| {
        b.iter(|| scan_to_eof(black_box(&large)))
    });
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
