//! Missing braces: the embedded statement of `if`, `else`, `while`, or
//! `for` should be a block. `else if` chains are left alone.

use text_size::TextRange;
use tokio_util::sync::CancellationToken;

use crate::analysis::{
    CodeAction, CodeFix, Finding, RewriteError, RewriteOutcome, RuleDescriptor, RuleId, Severity,
    SyntaxRule,
};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::sema::SemanticModel;
use crate::syntax::ast::AstNode;
use crate::syntax::{ElseClause, ForStmt, IfStmt, WhileStmt, factory};

pub static MISSING_BRACES: RuleDescriptor = RuleDescriptor {
    id: "missing-braces",
    description: "Embedded statements should be wrapped in braces",
    message: "Add braces around the embedded statement",
    category: "Style",
    severity: Severity::Warning,
};

/// The keyword token and embedded statement of a braceable construct.
fn keyword_and_body(node: &SyntaxNode) -> Option<(SyntaxToken, SyntaxNode)> {
    match node.kind() {
        SyntaxKind::IF_STMT => {
            let stmt = IfStmt::cast(node.clone())?;
            Some((stmt.keyword()?, stmt.then_branch()?))
        }
        SyntaxKind::ELSE_CLAUSE => {
            let clause = ElseClause::cast(node.clone())?;
            let body = clause.body()?;
            // An `else if` chain reads fine without braces.
            if body.kind() == SyntaxKind::IF_STMT {
                return None;
            }
            Some((clause.keyword()?, body))
        }
        SyntaxKind::WHILE_STMT => {
            let stmt = WhileStmt::cast(node.clone())?;
            Some((stmt.keyword()?, stmt.body()?))
        }
        SyntaxKind::FOR_STMT => {
            let stmt = ForStmt::cast(node.clone())?;
            Some((stmt.keyword()?, stmt.body()?))
        }
        _ => None,
    }
}

pub struct MissingBraces;

impl SyntaxRule for MissingBraces {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &MISSING_BRACES
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::IF_STMT,
            SyntaxKind::ELSE_CLAUSE,
            SyntaxKind::WHILE_STMT,
            SyntaxKind::FOR_STMT,
        ]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        _sema: &SemanticModel,
        _cancel: &CancellationToken,
    ) -> Option<Finding> {
        let (keyword, body) = keyword_and_body(node)?;
        if body.kind() == SyntaxKind::BLOCK {
            return None;
        }
        Some(Finding::new(&MISSING_BRACES, keyword.text_range(), &[]))
    }
}

pub struct MissingBracesFix;

impl CodeFix for MissingBracesFix {
    fn fixable(&self) -> &'static [RuleId] {
        &["missing-braces"]
    }

    fn fixes(
        &self,
        root: &SyntaxNode,
        _sema: &SemanticModel,
        range: TextRange,
        cancel: &CancellationToken,
    ) -> Vec<CodeAction> {
        if cancel.is_cancelled() {
            return Vec::new();
        }
        let node = match root.covering_element(range) {
            rowan::NodeOrToken::Node(n) => n,
            rowan::NodeOrToken::Token(t) => match t.parent() {
                Some(p) => p,
                None => return Vec::new(),
            },
        };
        let Some((_, body)) = node
            .ancestors()
            .find_map(|a| keyword_and_body(&a).filter(|(k, _)| k.text_range().contains_range(range)))
        else {
            return Vec::new();
        };
        if body.kind() == SyntaxKind::BLOCK {
            return Vec::new();
        }
        vec![CodeAction::new("Add braces", move || wrap_in_block(&body))]
    }
}

fn wrap_in_block(body: &SyntaxNode) -> Result<RewriteOutcome, RewriteError> {
    let offset = body.text_range().start();
    let block = factory::block_around(body);
    let new_len = SyntaxNode::new_root(block.clone()).text_range().len();
    let root = SyntaxNode::new_root(body.replace_with(block));
    Ok(RewriteOutcome {
        root,
        reformat: Some(TextRange::at(offset, new_len)),
    })
}
