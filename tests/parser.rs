#[cfg(test)]
mod parser_tests {
    use snox::ast::{Expr, LiteralValue, Stmt};
    use snox::ast_printer::AstPrinter;
    use snox::error::Diagnostics;
    use snox::parser::Parser;
    use snox::scanner::Scanner;

    fn parse_program(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens).parse(&mut diagnostics);

        (statements, diagnostics)
    }

    fn print_expr(source: &str) -> String {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        assert!(!diagnostics.had_error(), "{}", diagnostics);

        let expr = Parser::new(tokens)
            .parse_expression()
            .unwrap_or_else(|e| panic!("parse failed for {:?}: {}", source, e));

        AstPrinter::print(&expr)
    }

    fn messages(diagnostics: &Diagnostics) -> Vec<String> {
        diagnostics.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
        assert_eq!(print_expr("1 == 2 < 3"), "(== 1.0 (< 2.0 3.0))");
        assert_eq!(print_expr("-!x"), "(- (! x))");
    }

    #[test]
    fn test_binary_levels_are_left_associative() {
        assert_eq!(print_expr("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
        assert_eq!(print_expr("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(print_expr("a = b = 3"), "(= a (= b 3.0))");
    }

    #[test]
    fn test_logical_operators_bind_looser_than_equality() {
        assert_eq!(print_expr("a or b and c"), "(or a (and b c))");
        assert_eq!(print_expr("a == 1 and b"), "(and (== a 1.0) b)");
    }

    #[test]
    fn test_calls_chain() {
        assert_eq!(print_expr("f()"), "(call f)");
        assert_eq!(print_expr("f(1)(2, \"s\")"), "(call (call f 1.0) 2.0 s)");
    }

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("1 2").scan_tokens(&mut diagnostics);

        let err = Parser::new(tokens).parse_expression().unwrap_err();
        assert_eq!(err.to_string(), "[line 1] Error at '2': Expected end of expression.");
    }

    #[test]
    fn test_two_malformed_statements_give_two_diagnostics() {
        let (statements, diagnostics) = parse_program("print 1 +; var = 2; print 3;");

        assert_eq!(
            messages(&diagnostics),
            vec![
                "[line 1] Error at ';': Expected expression.",
                "[line 1] Error at '=': Expected variable name.",
            ]
        );

        // only the good statement survives
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Stmt::Print(_)));
    }

    #[test]
    fn test_error_at_end_of_input() {
        let (_, diagnostics) = parse_program("print 1");

        assert_eq!(
            messages(&diagnostics),
            vec!["[line 1] Error at end: Expected ';' after value."]
        );
    }

    #[test]
    fn test_errors_report_their_line() {
        let (_, diagnostics) = parse_program("print 1;\n\nvar 3;");

        assert_eq!(
            messages(&diagnostics),
            vec!["[line 3] Error at '3': Expected variable name."]
        );
    }

    #[test]
    fn test_invalid_assignment_target_is_reported_not_thrown() {
        let (statements, diagnostics) = parse_program("1 = 2; print 3;");

        assert_eq!(
            messages(&diagnostics),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_recovery_inside_block() {
        let (statements, diagnostics) = parse_program("{ print ; print 2; } print 3;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 2);

        match &statements[0] {
            Stmt::Block(inner) => assert_eq!(inner.len(), 1),
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_arguments_is_not_fatal() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (statements, diagnostics) = parse_program(&source);

        assert_eq!(
            messages(&diagnostics),
            vec!["[line 1] Error at '255': Can't have more than 255 arguments."]
        );
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_too_many_parameters_is_not_fatal() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let (statements, diagnostics) = parse_program(&source);

        assert_eq!(
            messages(&diagnostics),
            vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
        );
        assert!(matches!(&statements[0], Stmt::Function(decl) if decl.params.len() == 256));
    }

    #[test]
    fn test_for_desugars_into_while() {
        let (statements, diagnostics) =
            parse_program("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(!diagnostics.had_error());
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected outer block, got {:?}", statements[0]);
        };
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };
        assert_eq!(AstPrinter::print(condition), "(< i 3.0)");

        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected body block, got {:?}", body);
        };
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(&inner[1], Stmt::Expression(e) if AstPrinter::print(e) == "(= i (+ i 1.0))"));
    }

    #[test]
    fn test_for_without_clauses_loops_on_true() {
        let (statements, diagnostics) = parse_program("for (;;) print 1;");

        assert!(!diagnostics.had_error());

        match &statements[0] {
            Stmt::While { condition, body } => {
                assert_eq!(condition, &Expr::Literal(LiteralValue::True));
                assert!(matches!(body.as_ref(), Stmt::Print(_)));
            }
            other => panic!("expected bare while, got {:?}", other),
        }
    }

    #[test]
    fn test_class_is_reserved_but_not_declarable() {
        let (_, diagnostics) = parse_program("class Foo {}");

        assert!(diagnostics.had_error());
        assert_eq!(
            messages(&diagnostics)[0],
            "[line 1] Error at 'class': Expected expression."
        );
    }
}
