#[cfg(test)]
mod resolver_tests {
    use snox::error::Diagnostics;
    use snox::parser::Parser;
    use snox::resolver::{Locals, Resolver};
    use snox::scanner::Scanner;

    /// Scan, parse and resolve `source`; return the hop table and every
    /// message produced.
    fn resolve_with_locals(source: &str) -> (Locals, Vec<String>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens).parse(&mut diagnostics);
        assert!(!diagnostics.had_error(), "unexpected syntax error: {}", diagnostics);

        let locals = Resolver::new(&mut diagnostics).resolve(&statements);

        (locals, diagnostics.iter().map(|e| e.to_string()).collect())
    }

    fn resolve(source: &str) -> Vec<String> {
        resolve_with_locals(source).1
    }

    #[test]
    fn test_local_self_initializer_is_an_error() {
        assert_eq!(
            resolve("{ var a = a; }"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_self_initializer_inside_function_is_an_error() {
        assert_eq!(
            resolve("fun f() {\n  var x = x + 1;\n}"),
            vec!["[line 2] Error at 'x': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_global_self_initializer_is_left_to_runtime() {
        assert!(resolve("var a = a;").is_empty());
    }

    #[test]
    fn test_shadowing_outer_local_in_initializer_is_an_error() {
        // the inner `a` is declared before its initializer is resolved
        assert_eq!(resolve("{ var a = 1; { var a = a; } }").len(), 1);
    }

    #[test]
    fn test_top_level_return_is_an_error() {
        assert_eq!(
            resolve("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn test_return_inside_function_is_fine() {
        assert!(resolve("fun f() { if (true) { return 1; } return; }").is_empty());
    }

    #[test]
    fn test_return_after_function_body_is_still_top_level() {
        assert_eq!(resolve("fun f() {} return;").len(), 1);
    }

    #[test]
    fn test_redeclaration_in_same_scope_is_allowed() {
        assert!(resolve("{ var a = 1; var a = 2; }").is_empty());
        assert!(resolve("fun f(a) { var a = 2; }").is_empty());
    }

    #[test]
    fn test_errors_do_not_stop_the_pass() {
        let messages = resolve("return 1;\n{ var b = b; }\nreturn;");

        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("[line 1]"));
        assert!(messages[1].starts_with("[line 2]"));
        assert!(messages[2].starts_with("[line 3]"));
    }

    #[test]
    fn test_recursive_function_resolves_its_own_name() {
        assert!(resolve("{ fun f(n) { if (n > 0) f(n - 1); } f(3); }").is_empty());
    }

    #[test]
    fn test_hop_counts_cover_locals_only() {
        // `a` is read twice one scope up, `b` once in place; global `g` is absent
        let (locals, messages) =
            resolve_with_locals("var g = 0; { var a = 1; { var b = a; print a + b + g; } }");

        assert!(messages.is_empty());

        let mut depths: Vec<usize> = locals.values().copied().collect();
        depths.sort_unstable();
        assert_eq!(depths, vec![0, 1, 1]);
    }
}
