//! slatec-drv - Compiler driver.
//!
//! Owns the one run of the pipeline:
//!
//! ```text
//! source file ──▶ Scanner ──▶ Parser ──▶ SemanticAnalyser
//!                    │           │             │
//!                    │           │             └── semantic_errors.txt
//!                    │           ├── parse_tree.txt, syntax_errors.txt
//!                    └── tokens.txt, symbol_table.txt, lexical_errors.txt
//! ```
//!
//! The driver creates the symbol table, lends it to each phase, collects
//! the error lists, writes the report files and decides the exit status
//! from the monotonic error flag. Code generation is out of scope; its
//! seam is the [`CodeSink`](slatec_par::actions::CodeSink) handed to the
//! parser, a [`NullSink`](slatec_par::actions::NullSink) here.

pub mod reports;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use slatec_lex::{Scanner, ScannerConfig};
use slatec_par::actions::NullSink;
use slatec_par::Parser;
use slatec_sem::SemanticAnalyser;
use slatec_util::SymbolTable;

/// What to compile and where the reports go.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub input: PathBuf,
    /// Directory for `tokens.txt`, `symbol_table.txt`, `parse_tree.txt`.
    pub output_dir: PathBuf,
    /// Directory for the three error report files.
    pub errors_dir: PathBuf,
    /// Scanner read size in bytes.
    pub chunk_size: usize,
    /// Token-report retention window in source lines; `None` keeps all.
    pub retention: Option<usize>,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("output"),
            errors_dir: PathBuf::from("errors"),
            chunk_size: slatec_lex::window::DEFAULT_CHUNK_SIZE,
            retention: None,
        }
    }
}

/// Result of one compilation run.
#[derive(Clone, Debug)]
pub struct CompileOutcome {
    /// True when the error flag stayed clear; gates downstream execution.
    pub success: bool,
    pub lexical_errors: usize,
    pub syntax_errors: usize,
    pub semantic_errors: usize,
    /// The user-visible banner, already formatted.
    pub banner: String,
}

/// Compile one source file and write the six report files.
///
/// Source-level errors never fail this function; they are reported through
/// the files and the outcome. Only I/O problems (unreadable input,
/// unwritable report directories) surface as `Err`.
pub fn compile(options: &CompileOptions) -> Result<CompileOutcome> {
    let file = File::open(&options.input)
        .with_context(|| format!("cannot open source file {}", options.input.display()))?;
    let config = ScannerConfig {
        chunk_size: options.chunk_size.max(slatec_lex::window::MIN_CHUNK_SIZE),
        retention: options.retention,
    };
    let scanner = Scanner::with_config(BufReader::new(file), config);

    let mut symtab = SymbolTable::new();
    let mut parser = Parser::new(scanner);
    let mut analyser = SemanticAnalyser::new();
    let mut sink = NullSink;

    let start = Instant::now();
    parser
        .parse(&mut symtab, &mut analyser, &mut sink)
        .context("reading the source failed mid-parse")?;
    tracing::info!(
        elapsed = ?start.elapsed(),
        input = %options.input.display(),
        "front-end finished"
    );

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("cannot create output directory {}", options.output_dir.display())
    })?;
    std::fs::create_dir_all(&options.errors_dir).with_context(|| {
        format!("cannot create errors directory {}", options.errors_dir.display())
    })?;

    let scanner = parser.scanner();
    let lexical = scanner.lexical_errors();
    let syntax = parser.syntax_errors();
    let semantic = analyser.semantic_errors();

    reports::write_tokens(&options.output_dir.join("tokens.txt"), scanner.token_lines())
        .context("writing tokens.txt")?;
    reports::write_symbol_table(&options.output_dir.join("symbol_table.txt"), &symtab)
        .context("writing symbol_table.txt")?;
    reports::write_parse_tree(
        &options.output_dir.join("parse_tree.txt"),
        parser.tree(),
        &symtab,
    )
    .context("writing parse_tree.txt")?;
    reports::write_lexical_errors(&options.errors_dir.join("lexical_errors.txt"), lexical)
        .context("writing lexical_errors.txt")?;
    reports::write_syntax_errors(&options.errors_dir.join("syntax_errors.txt"), syntax)
        .context("writing syntax_errors.txt")?;
    reports::write_semantic_errors(&options.errors_dir.join("semantic_errors.txt"), semantic)
        .context("writing semantic_errors.txt")?;

    let success = !symtab.error_flag();
    if success {
        tracing::info!("compilation successful");
    } else {
        tracing::warn!(
            lexical = lexical.len(),
            syntax = syntax.len(),
            semantic = semantic.len(),
            "compilation failed"
        );
    }

    Ok(CompileOutcome {
        success,
        lexical_errors: lexical.len(),
        syntax_errors: syntax.len(),
        semantic_errors: semantic.len(),
        banner: reports::banner(success, lexical, syntax, semantic),
    })
}
