#[cfg(test)]
mod environment_tests {
    use std::rc::Rc;

    use snox::environment::Environment;
    use snox::token::{Token, TokenType};
    use snox::value::Value;

    fn name(lexeme: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, lexeme, 3)
    }

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        assert_eq!(env.get(&name("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_redefine_overwrites() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::String("two".to_string()));

        assert_eq!(env.get(&name("a")).unwrap(), Value::String("two".to_string()));
    }

    #[test]
    fn test_get_walks_enclosing_chain() {
        let globals = Environment::new().into_shared();
        globals.borrow_mut().define("a", Value::Bool(true));

        let inner = Environment::with_enclosing(Rc::clone(&globals));

        assert_eq!(inner.get(&name("a")).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_undefined_get_is_a_runtime_error() {
        let env = Environment::new();
        let err = env.get(&name("missing")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "[line 3] Error at 'missing': Undefined variable 'missing'."
        );
    }

    #[test]
    fn test_assign_updates_nearest_binding_and_never_creates() {
        let globals = Environment::new().into_shared();
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&globals));
        inner.assign(&name("a"), Value::Number(2.0)).unwrap();

        assert_eq!(globals.borrow().get(&name("a")).unwrap(), Value::Number(2.0));

        assert!(inner.assign(&name("b"), Value::Nil).is_err());
        assert!(inner.get(&name("b")).is_err());
    }

    #[test]
    fn test_get_at_and_assign_at_hop_exactly() {
        let outer = Environment::new().into_shared();
        outer.borrow_mut().define("x", Value::String("outer".to_string()));

        let middle = Environment::with_enclosing(Rc::clone(&outer)).into_shared();
        middle.borrow_mut().define("x", Value::String("middle".to_string()));

        let inner = Environment::with_enclosing(Rc::clone(&middle)).into_shared();

        assert_eq!(
            Environment::get_at(&inner, 1, &name("x")).unwrap(),
            Value::String("middle".to_string())
        );
        assert_eq!(
            Environment::get_at(&inner, 2, &name("x")).unwrap(),
            Value::String("outer".to_string())
        );

        // a resolved lookup does not fall back to outer scopes
        assert!(Environment::get_at(&inner, 0, &name("x")).is_err());

        Environment::assign_at(&inner, 2, &name("x"), Value::Nil).unwrap();
        assert_eq!(outer.borrow().get(&name("x")).unwrap(), Value::Nil);
        assert_eq!(
            middle.borrow().get(&name("x")).unwrap(),
            Value::String("middle".to_string())
        );
    }

    #[test]
    fn test_ancestor_past_the_root_is_none() {
        let root = Environment::new().into_shared();
        let child = Environment::with_enclosing(Rc::clone(&root)).into_shared();

        let found = Environment::ancestor(&child, 1).unwrap();
        assert!(Rc::ptr_eq(&found, &root));
        assert!(Environment::ancestor(&child, 2).is_none());
        assert!(Environment::assign_at(&child, 5, &name("x"), Value::Nil).is_err());
    }
}
