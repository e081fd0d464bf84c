//! Green fragment construction for rewrites.
//!
//! Fragments are assembled from copies of existing subtrees with their
//! leading trivia stripped; the surrounding code's formatting applies
//! instead, and callers mark the edited range for re-formatting.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::ast::{AstNode, Declarator, TypeRef};
use super::ed::green_of;
use crate::parser::{SyntaxKind, SyntaxNode};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Build a declare-at-use fragment: `TYPE NAME (= init)?` as a single
/// DECL_EXPR, combining the original declared type with the original
/// declarator.
pub fn decl_expr(type_ref: &TypeRef, declarator: &Declarator) -> GreenNode {
    let children: Vec<GreenElement> = vec![
        NodeOrToken::Node(without_leading_trivia(type_ref.syntax())),
        NodeOrToken::Token(whitespace(" ")),
        NodeOrToken::Node(without_leading_trivia(declarator.syntax())),
    ];
    GreenNode::new(SyntaxKind::DECL_EXPR.into(), children)
}

/// Wrap a statement in a block: `{ <stmt> }`.
pub fn block_around(stmt: &SyntaxNode) -> GreenNode {
    let children: Vec<GreenElement> = vec![
        NodeOrToken::Token(GreenToken::new(SyntaxKind::L_BRACE.into(), "{")),
        NodeOrToken::Token(whitespace(" ")),
        NodeOrToken::Node(without_leading_trivia(stmt)),
        NodeOrToken::Token(whitespace(" ")),
        NodeOrToken::Token(GreenToken::new(SyntaxKind::R_BRACE.into(), "}")),
    ];
    GreenNode::new(SyntaxKind::BLOCK.into(), children)
}

fn whitespace(text: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::WHITESPACE.into(), text)
}

/// Copy a subtree, dropping trivia tokens at the front of its child list.
fn without_leading_trivia(node: &SyntaxNode) -> GreenNode {
    let children: Vec<GreenElement> = node
        .children_with_tokens()
        .skip_while(|el| el.as_token().is_some_and(|t| t.kind().is_trivia()))
        .map(|el| green_of(&el))
        .collect();
    GreenNode::new(node.kind().into(), children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn first<N: AstNode>(input: &str) -> N {
        parse(input)
            .syntax()
            .descendants()
            .find_map(N::cast)
            .expect("node not found")
    }

    #[test]
    fn decl_expr_joins_type_and_declarator() {
        let local: crate::syntax::LocalDecl = first("func f() { int x; }");
        let fragment = decl_expr(
            &local.type_ref().unwrap(),
            &local.declarators().next().unwrap(),
        );
        assert_eq!(SyntaxNode::new_root(fragment).text().to_string(), "int x");
    }

    #[test]
    fn decl_expr_keeps_initializer() {
        let local: crate::syntax::LocalDecl = first("func f() { int x = 1 + 2; }");
        let fragment = decl_expr(
            &local.type_ref().unwrap(),
            &local.declarators().next().unwrap(),
        );
        assert_eq!(
            SyntaxNode::new_root(fragment).text().to_string(),
            "int x = 1 + 2"
        );
    }

    #[test]
    fn block_wraps_statement() {
        let root = parse("func f() { if (c) m(); }").syntax();
        let stmt = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EXPR_STMT)
            .unwrap();
        let block = block_around(&stmt);
        assert_eq!(SyntaxNode::new_root(block).text().to_string(), "{ m(); }");
    }
}
