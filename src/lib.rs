//! # declint
//!
//! Scope-aware lint and rewrite engine over a lossless syntax tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analysis  → rule contract, analyzer driver, code fixes
//!   ↓
//! sema      → name resolution: symbols, scopes, SemanticModel
//!   ↓
//! syntax    → typed AST wrappers, structural equality, tree edits
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST
//! ```
//!
//! The tree is immutable: every fix is a green-tree splice producing a
//! complete replacement tree, and the input tree stays valid throughout.
//! Analysis is stateless per invocation, so independent trees can be
//! analyzed in parallel and any traversal can be cancelled mid-flight.

// ============================================================================
// MODULES (dependency order: parser → syntax → sema → analysis)
// ============================================================================

/// Parser: Logos lexer, recursive-descent parser, rowan CST
pub mod parser;

/// Syntax: typed AST wrappers, structural equality, tree edits, fragments
pub mod syntax;

/// Semantic model: symbols, lexical scopes, name resolution
pub mod sema;

/// Analysis: rule contract, analyzer driver, code fixes, built-in rules
pub mod analysis;

// Re-export commonly needed items
pub use analysis::{
    Analyzer, CodeAction, CodeFix, Finding, FixRegistry, RewriteError, RewriteOutcome,
    RuleDescriptor, RuleId, Severity, SyntaxRule,
};
pub use parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken, parse};
pub use sema::{SemanticModel, SymbolId, SymbolKind};
