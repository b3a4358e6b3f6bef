//! Edge case tests for slatec-par

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use slatec_lex::Scanner;
    use slatec_util::diagnostics::SyntaxErrorKind;
    use slatec_util::SymbolTable;

    use crate::actions::{NullSemantics, NullSink};
    use crate::parser::Parser;

    fn parse(source: &str) -> (Parser<Cursor<String>>, SymbolTable) {
        let mut symtab = SymbolTable::new();
        let mut parser = Parser::new(Scanner::new(Cursor::new(source.to_owned())));
        parser
            .parse(&mut symtab, &mut NullSemantics, &mut NullSink)
            .unwrap();
        (parser, symtab)
    }

    fn error_messages(parser: &Parser<Cursor<String>>) -> Vec<String> {
        parser
            .syntax_errors()
            .iter()
            .map(|e| e.kind.to_string())
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let depth = 64;
        let source = format!(
            "begin {} x as 1 {} end",
            "begin ".repeat(depth),
            "end ".repeat(depth)
        );
        // The loop variable x is undeclared, but syntactically this is fine.
        let (parser, _) = parse(&source);
        assert!(parser.syntax_errors().is_empty(), "{:?}", error_messages(&parser));
        assert!(parser.stack_at_end());
    }

    #[test]
    fn test_edge_deeply_nested_parens() {
        let depth = 64;
        let source = format!(
            "begin dim x : integer; x as {}1{} end",
            "( ".repeat(depth),
            " )".repeat(depth)
        );
        let (parser, _) = parse(&source);
        assert!(parser.syntax_errors().is_empty(), "{:?}", error_messages(&parser));
    }

    #[test]
    fn test_edge_nested_if_else_binds_to_nearest_if() {
        let (parser, symtab) = parse(
            "begin dim x : integer; \
             if true then if false then x as 1 else x as 2 end",
        );
        assert!(parser.syntax_errors().is_empty(), "{:?}", error_messages(&parser));
        // The rendered tree nests the Else-part under the inner conditional.
        let rendered = parser.tree().render(&symtab);
        let conditionals = rendered
            .lines()
            .filter(|l| l.contains("ConditionalStatement"))
            .count();
        assert_eq!(conditionals, 2);
        let else_line = rendered
            .lines()
            .position(|l| l.contains("(KEYWORD, else)"))
            .expect("else keyword rendered");
        let inner_if = rendered
            .lines()
            .skip(1)
            .position(|l| l.contains("ConditionalStatement"))
            .map(|i| i + 1)
            .expect("inner conditional rendered");
        assert!(else_line > inner_if);
    }

    #[test]
    fn test_edge_expression_statement_lists() {
        let (parser, _) = parse(
            "begin dim a, b, c : integer; write ( a, b plus c, 1 EQ 2 ) end",
        );
        assert!(parser.syntax_errors().is_empty(), "{:?}", error_messages(&parser));
    }

    #[test]
    fn test_edge_semicolon_is_separator_not_terminator() {
        let (with_trailing, _) = parse("begin dim x : integer; x as 1; end");
        assert!(with_trailing.syntax_errors().is_empty());
        let (without, _) = parse("begin dim x : integer; x as 1 end");
        assert!(without.syntax_errors().is_empty());
    }

    #[test]
    fn test_edge_tree_renders_token_leaves() {
        let mut symtab = SymbolTable::new();
        let mut parser = Parser::new(Scanner::new(Cursor::new(
            "begin dim x : integer; x as 2 end".to_owned(),
        )));
        parser
            .parse(&mut symtab, &mut NullSemantics, &mut NullSink)
            .unwrap();
        let rendered = parser.tree().render(&symtab);
        assert!(rendered.starts_with("Program\n"));
        assert!(rendered.contains("(KEYWORD, begin)"));
        assert!(rendered.contains("(IDENT, x)"));
        assert!(rendered.contains("(NUMBER, 2)"));
        assert!(rendered.contains("(PUNCT, as)"));
        assert!(!rendered.contains("EPSILON"));
    }

    // ==================== ERROR RECOVERY ====================

    #[test]
    fn test_err_missing_then() {
        let (parser, symtab) = parse("begin dim x : integer; if x LT 1 x as 2 end");
        assert!(symtab.error_flag());
        assert!(
            error_messages(&parser)
                .iter()
                .any(|m| m.contains("Missing \"then\"")),
            "{:?}",
            error_messages(&parser)
        );
    }

    #[test]
    fn test_err_missing_paren() {
        let (parser, _) = parse("begin dim x : integer; x as ( 1 plus 2 end");
        assert_eq!(error_messages(&parser), vec!["Missing \")\""]);
    }

    #[test]
    fn test_err_missing_declaration_type() {
        let (parser, _) = parse("begin dim x : ; x as 1 end");
        assert!(
            error_messages(&parser)
                .iter()
                .any(|m| m.contains("Missing \"integer\"")),
            "{:?}",
            error_messages(&parser)
        );
    }

    #[test]
    fn test_err_unexpected_eof_mid_statement() {
        let (parser, symtab) = parse("begin dim x : integer; x as");
        assert!(symtab.error_flag());
        assert!(parser
            .syntax_errors()
            .iter()
            .any(|e| e.kind == SyntaxErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_err_garbage_after_program_sets_flag() {
        let (parser, symtab) = parse("begin end begin end");
        // No message is recorded for trailing input, but the run is marked
        // as failed.
        assert!(symtab.error_flag());
        let _ = parser;
    }

    #[test]
    fn test_err_cleanup_leaves_no_empty_nonterminal_leaves() {
        let (parser, symtab) = parse("begin dim x : integer; x as 1");
        let tree = parser.tree();
        let rendered = tree.render(&symtab);
        // Every rendered leaf line is either a matched token or had an
        // epsilon expansion; unexpanded non-terminals are cleaned away.
        for line in rendered.lines().skip(1) {
            let label = line.trim_start_matches(['│', ' ', '├', '└', '─']);
            if label.starts_with('(') {
                continue;
            }
            assert!(
                !label.is_empty(),
                "blank label in rendered tree:\n{rendered}"
            );
        }
        assert!(!rendered.contains("EPSILON"));
    }

    #[test]
    fn test_err_every_line_reports_its_own_line_number() {
        let (parser, _) = parse("begin\nx as ;\ny as ;\nend");
        let lines: Vec<u32> = parser.syntax_errors().iter().map(|e| e.line).collect();
        assert!(lines.contains(&2), "{lines:?}");
        assert!(lines.contains(&3), "{lines:?}");
    }

    #[test]
    fn test_err_recovery_is_bounded() {
        // Pathological input: recovery must terminate and keep the error
        // list proportional to the input.
        let junk = "; ) ( as to do then else , : ".repeat(20);
        let (parser, symtab) = parse(&junk);
        assert!(symtab.error_flag());
        assert!(!parser.syntax_errors().is_empty());
        assert!(parser.syntax_errors().len() <= 250);
    }
}
