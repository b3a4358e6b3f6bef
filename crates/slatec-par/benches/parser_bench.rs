//! Parser throughput benchmarks.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use slatec_lex::Scanner;
use slatec_par::actions::{NullSemantics, NullSink};
use slatec_par::Parser;
use slatec_util::SymbolTable;

fn sample_program(statements: usize) -> String {
    let mut source = String::from("begin\ndim i, total : integer;\ndim flag : boolean;\n");
    for _ in 0..statements {
        source.push_str("total as total plus i mult 2;\n");
        source.push_str("if total GT 100 then flag as true else flag as false;\n");
        source.push_str("while flag do total as total min 1;\n");
    }
    source.push_str("write ( total )\nend\n");
    source
}

fn parse_source(source: &str) -> usize {
    let mut symtab = SymbolTable::new();
    let mut parser = Parser::new(Scanner::new(Cursor::new(source.to_owned())));
    parser
        .parse(&mut symtab, &mut NullSemantics, &mut NullSink)
        .unwrap();
    parser.syntax_errors().len()
}

fn bench_parser(c: &mut Criterion) {
    let small = sample_program(5);
    let large = sample_program(500);

    c.bench_function("parse_small_program", |b| {
        b.iter(|| parse_source(black_box(&small)))
    });
    c.bench_function("parse_large_program", |b| {
        b.iter(|| parse_source(black_box(&large)))
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
