//! Snox: a small dynamically-typed scripting language with a tree-walking
//! interpreter.
//!
//! The pipeline is [`scanner`] → [`parser`] → [`resolver`] →
//! [`interpreter`]; [`session::Session`] wires the stages together.
//!
//! ```
//! use snox::session::Session;
//!
//! let mut session = Session::with_output(Vec::new());
//! session.run("var a = 1; print a + 2;").unwrap();
//!
//! assert_eq!(session.into_output(), b"3\n");
//! ```

pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod token;
pub mod value;
