//! Pure tree edits over the immutable CST.
//!
//! Every operation here is a green-tree splice: it rebuilds the affected
//! parent without mutating anything and returns the new green root of the
//! tree the target node belongs to. Callers wrap the result with
//! `SyntaxNode::new_root` to obtain the replacement tree.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::ast::{AstNode, Declarator};
use crate::parser::{SyntaxElement, SyntaxKind, SyntaxNode};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Find the smallest enclosing statement of `node` (the unit of
/// sequencing), walking strict ancestors. Returns `None` when the tree
/// root is reached first, which disables any dependent analysis.
pub fn containing_statement(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.ancestors().skip(1).find(|a| a.kind().is_statement())
}

/// Structural equality ignoring trivia: same kinds, same non-trivia
/// token texts, in the same order.
pub fn is_equivalent_to(a: &SyntaxNode, b: &SyntaxNode) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    let mut left = non_trivia_children(a);
    let mut right = non_trivia_children(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(NodeOrToken::Node(na)), Some(NodeOrToken::Node(nb))) => {
                if !is_equivalent_to(&na, &nb) {
                    return false;
                }
            }
            (Some(NodeOrToken::Token(ta)), Some(NodeOrToken::Token(tb))) => {
                if ta.kind() != tb.kind() || ta.text() != tb.text() {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Find a node of the given kind inside `scope` that is structurally
/// equivalent to `target`. Used to re-target an edit onto an
/// already-edited tree, where node identities have changed.
pub fn find_equivalent(
    scope: &SyntaxNode,
    kind: SyntaxKind,
    target: &SyntaxNode,
) -> Option<SyntaxNode> {
    scope
        .descendants()
        .filter(|n| n.kind() == kind)
        .find(|n| is_equivalent_to(n, target))
}

/// Detach a subtree into an independent tree rooted at the node itself.
pub fn detach(node: &SyntaxNode) -> SyntaxNode {
    SyntaxNode::new_root(node.green().into_owned())
}

/// Remove a statement from its parent, preserving the line break.
///
/// The whitespace token immediately preceding the statement is removed
/// with it; the whitespace after the statement (which carries the next
/// statement's line break and indentation) is kept, so surrounding
/// statements are not joined and comments between statements survive.
///
/// Returns the new green root of the tree `target` belongs to, or `None`
/// if `target` has no parent.
pub fn remove_statement(target: &SyntaxNode) -> Option<GreenNode> {
    let parent = target.parent()?;
    let elements: Vec<SyntaxElement> = parent.children_with_tokens().collect();
    let index = position_of(&elements, target)?;

    let mut drop = vec![index];
    if index > 0 {
        if let NodeOrToken::Token(t) = &elements[index - 1] {
            if t.kind() == SyntaxKind::WHITESPACE {
                drop.push(index - 1);
            }
        }
    }

    Some(rebuild_without(&parent, &elements, &drop))
}

/// Remove one declarator from a multi-variable declaration, dropping the
/// adjoining comma (and the whitespace runs the comma separated) so the
/// remaining list stays well-formed.
///
/// Returns the new green root of the tree the declarator belongs to.
pub fn remove_declarator(declarator: &Declarator) -> Option<GreenNode> {
    let target = declarator.syntax();
    let parent = target.parent()?;
    let elements: Vec<SyntaxElement> = parent.children_with_tokens().collect();
    let index = position_of(&elements, target)?;

    let mut drop = vec![index];

    // Prefer the comma after the declarator; fall back to the one before
    // when the declarator is last in the list.
    let mut j = index + 1;
    while j < elements.len() && elements[j].kind().is_trivia() {
        j += 1;
    }
    if j < elements.len() && elements[j].kind() == SyntaxKind::COMMA {
        drop.extend(index + 1..=j);
        let mut k = j + 1;
        while k < elements.len() && elements[k].kind() == SyntaxKind::WHITESPACE {
            drop.push(k);
            k += 1;
        }
    } else {
        let mut j = index;
        while j > 0 && elements[j - 1].kind().is_trivia() {
            j -= 1;
        }
        if j > 0 && elements[j - 1].kind() == SyntaxKind::COMMA {
            let comma = j - 1;
            drop.extend(comma..index);
            let mut k = comma;
            while k > 0 && elements[k - 1].kind() == SyntaxKind::WHITESPACE {
                drop.push(k - 1);
                k -= 1;
            }
        } else {
            // No comma on either side: not a separated list element
            return None;
        }
    }

    Some(rebuild_without(&parent, &elements, &drop))
}

fn position_of(elements: &[SyntaxElement], target: &SyntaxNode) -> Option<usize> {
    elements
        .iter()
        .position(|el| el.as_node().is_some_and(|n| n == target))
}

fn rebuild_without(parent: &SyntaxNode, elements: &[SyntaxElement], drop: &[usize]) -> GreenNode {
    let children: Vec<GreenElement> = elements
        .iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, el)| green_of(el))
        .collect();
    let new_parent = GreenNode::new(parent.kind().into(), children);
    parent.replace_with(new_parent)
}

/// Copy a red element's green data.
pub(crate) fn green_of(el: &SyntaxElement) -> GreenElement {
    match el {
        NodeOrToken::Node(n) => NodeOrToken::Node(n.green().into_owned()),
        NodeOrToken::Token(t) => NodeOrToken::Token(t.green().to_owned()),
    }
}

fn non_trivia_children(node: &SyntaxNode) -> impl Iterator<Item = SyntaxElement> + '_ {
    node.children_with_tokens()
        .filter(|el| !el.kind().is_trivia())
}
