//! Syntax layer: typed AST wrappers, structural equality, and pure tree
//! edits over the lossless CST.

pub mod ast;
pub mod ed;
pub mod factory;

pub use ast::{
    ArgList, Argument, AstNode, Block, CallExpr, DeclExpr, Declarator, ElseClause, ForStmt,
    FuncDecl, IfStmt, LocalDecl, Name, NameRef, Param, ParamList, SourceFile, TypeRef, WhileStmt,
};
pub use ed::{containing_statement, is_equivalent_to};
