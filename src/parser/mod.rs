//! Lossless parsing: **logos** for lexing, **rowan** for the CST.
//!
//! The tree preserves all whitespace and comments; `syntax().text()`
//! reproduces the input byte-for-byte. Typed AST wrappers live in
//! `crate::syntax`.

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{
    MiniLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxNodePtr,
    SyntaxToken,
};
