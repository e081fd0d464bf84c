//! Declare-at-use: a local variable whose only uses sit inside a single
//! statement that passes it as an `out` argument can be declared inline
//! at the call site.
//!
//! Detection walks out + bare identifier → resolution → plain local with
//! exactly one declaring site → usage containment. The fix removes the
//! original declaration (or just the matching declarator when the
//! declaration owns several) and splices a `TYPE NAME` declaration
//! expression into the argument, as one atomic tree replacement.

use text_size::TextRange;
use tokio_util::sync::CancellationToken;

use crate::analysis::{
    CodeAction, CodeFix, Finding, RewriteError, RewriteOutcome, RuleDescriptor, RuleId, Severity,
    SyntaxRule,
};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::sema::{SemanticModel, SymbolId, SymbolKind};
use crate::syntax::ast::AstNode;
use crate::syntax::{Argument, Declarator, LocalDecl, NameRef, ed, factory};

pub static DECLARE_AT_USE: RuleDescriptor = RuleDescriptor {
    id: "declare-at-use",
    description: "Variable can be declared at its point of use",
    message: "'{0}' can be declared at its point of use",
    category: "Declaration",
    severity: Severity::Warning,
};

/// Everything the rewrite needs, derived once from a tree snapshot.
struct Candidate {
    symbol: SymbolId,
    argument: Argument,
    declarator: Declarator,
    declaration: LocalDecl,
    /// Statement enclosing the declaration statement; bounds the usage
    /// search and is the unit the rewrite replaces.
    search_scope: SyntaxNode,
    /// Statement containing the out argument.
    argument_stmt: SyntaxNode,
}

/// Classify one argument. `None` means the shape is unsupported, which
/// is a rejection, not an error.
fn candidate_for(argument: &Argument, sema: &SemanticModel, root: &SyntaxNode) -> Option<Candidate> {
    if !argument.is_out() {
        return None;
    }
    // Only a bare identifier qualifies; any richer expression already
    // does something with the value.
    let name_ref = NameRef::cast(argument.expr()?)?;
    let symbol = sema.resolve(&name_ref)?;
    let data = sema.symbol(symbol);
    if data.kind != SymbolKind::Local {
        return None;
    }
    if data.decl_sites.len() != 1 {
        tracing::trace!(name = %data.name, "ambiguous declaration, skipping");
        return None;
    }
    let site = sema.declaring_sites(symbol, root).pop()?;
    let declarator = Declarator::cast(site)?;
    let declaration = LocalDecl::cast(declarator.syntax().parent()?)?;
    // Declarations in special positions (for-loop headers) are not
    // removable as plain statements.
    if declaration.syntax().parent()?.kind() != SyntaxKind::BLOCK {
        return None;
    }
    let search_scope = ed::containing_statement(declaration.syntax())?;
    let argument_stmt = ed::containing_statement(argument.syntax())?;
    Some(Candidate {
        symbol,
        argument: argument.clone(),
        declarator,
        declaration,
        search_scope,
        argument_stmt,
    })
}

pub struct DeclareAtUse;

impl SyntaxRule for DeclareAtUse {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DECLARE_AT_USE
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ARGUMENT]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        sema: &SemanticModel,
        cancel: &CancellationToken,
    ) -> Option<Finding> {
        let argument = Argument::cast(node.clone())?;
        let root = node.ancestors().last()?;
        let candidate = candidate_for(&argument, sema, &root)?;

        // Accept only if every use of the symbol inside the search scope
        // lands within the statement holding the argument. A use in the
        // argument itself trivially qualifies.
        let allowed = candidate.argument_stmt.text_range();
        for usage in candidate.search_scope.descendants().filter_map(NameRef::cast) {
            if cancel.is_cancelled() {
                return None;
            }
            if sema.resolve(&usage) == Some(candidate.symbol)
                && !allowed.contains_range(usage.syntax().text_range())
            {
                tracing::trace!(
                    name = %sema.symbol(candidate.symbol).name,
                    escape = ?usage.syntax().text_range(),
                    "use escapes the argument statement"
                );
                return None;
            }
        }

        let name = &sema.symbol(candidate.symbol).name;
        Some(Finding::new(
            &DECLARE_AT_USE,
            argument.syntax().text_range(),
            &[name.as_str()],
        ))
    }
}

pub struct DeclareAtUseFix;

impl CodeFix for DeclareAtUseFix {
    fn fixable(&self) -> &'static [RuleId] {
        &["declare-at-use"]
    }

    fn fixes(
        &self,
        root: &SyntaxNode,
        sema: &SemanticModel,
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
        let Some(argument) = node.ancestors().find_map(Argument::cast) else {
            return Vec::new();
        };
        let Some(candidate) = candidate_for(&argument, sema, root) else {
            return Vec::new();
        };
        let description = format!(
            "Declare '{}' at its point of use",
            sema.symbol(candidate.symbol).name
        );
        vec![CodeAction::new(description, move || {
            apply_rewrite(&candidate)
        })]
    }
}

/// Perform the surgery: remove the declaration (or declarator), splice
/// the declaration expression into the argument, and replace the
/// enclosing statement in one step. Any inconsistency aborts with an
/// error and the input tree is untouched.
fn apply_rewrite(c: &Candidate) -> Result<RewriteOutcome, RewriteError> {
    let enclosing = &c.search_scope;
    let offset = enclosing.text_range().start();

    // Work on a detached copy of the enclosing statement so both edits
    // compose before anything touches the original tree.
    let detached = ed::detach(enclosing);

    let multi = c.declaration.declarators().count() > 1;
    let (target_kind, target_range) = if multi {
        (SyntaxKind::DECLARATOR, c.declarator.syntax().text_range() - offset)
    } else {
        (SyntaxKind::LOCAL_DECL, c.declaration.syntax().text_range() - offset)
    };
    let removal_target = detached
        .descendants()
        .find(|n| n.kind() == target_kind && n.text_range() == target_range)
        .ok_or(RewriteError::MissingRemovalTarget)?;

    let after_removal = if multi {
        let declarator =
            Declarator::cast(removal_target).ok_or(RewriteError::MissingRemovalTarget)?;
        ed::remove_declarator(&declarator).ok_or(RewriteError::MissingRemovalTarget)?
    } else {
        ed::remove_statement(&removal_target).ok_or(RewriteError::MissingRemovalTarget)?
    };
    let edited = SyntaxNode::new_root(after_removal);

    let type_ref = c
        .declaration
        .type_ref()
        .ok_or(RewriteError::MissingRemovalTarget)?;
    let fragment = factory::decl_expr(&type_ref, &c.declarator);

    // Node identities changed with the removal; re-find the argument by
    // structural equality before editing it.
    let new_argument =
        ed::find_equivalent(&edited, SyntaxKind::ARGUMENT, c.argument.syntax())
            .ok_or(RewriteError::StructuralMismatch)?;
    let inner = Argument::cast(new_argument)
        .and_then(|a| a.expr())
        .ok_or(RewriteError::StructuralMismatch)?;
    let spliced = inner.replace_with(fragment);

    let new_len = SyntaxNode::new_root(spliced.clone()).text_range().len();
    let new_root = SyntaxNode::new_root(enclosing.replace_with(spliced));
    tracing::debug!(range = ?TextRange::at(offset, new_len), "declare-at-use rewrite applied");
    Ok(RewriteOutcome {
        root: new_root,
        reformat: Some(TextRange::at(offset, new_len)),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::analysis::{Analyzer, FixRegistry};
    use crate::parser::parse;

    fn analyze(source: &str) -> Vec<Finding> {
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(DeclareAtUse));
        analyzer.analyze(&root, &sema, &CancellationToken::new())
    }

    fn apply_first_fix(source: &str) -> Result<String, RewriteError> {
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(DeclareAtUse));
        let cancel = CancellationToken::new();
        let findings = analyzer.analyze(&root, &sema, &cancel);
        assert_eq!(findings.len(), 1, "expected one finding in {source:?}");
        let mut registry = FixRegistry::new();
        registry.register(Box::new(DeclareAtUseFix));
        let actions = registry.fixes_for(&findings[0], &root, &sema, &cancel);
        assert_eq!(actions.len(), 1);
        let outcome = actions[0].apply()?;
        Ok(outcome.root.text().to_string())
    }

    #[test]
    fn accepts_single_use_out_argument() {
        let findings = analyze("func f() { int x; m(out x); }");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "'x' can be declared at its point of use");
    }

    #[test]
    fn accepts_when_later_uses_share_the_statement() {
        let findings = analyze("func f() { int x; use(m(out x) + x); }");
        assert_eq!(findings.len(), 1);
    }

    #[rstest]
    #[case::use_escapes_after("func f() { int x; m(out x); use(x); }")]
    #[case::use_escapes_before("func f() { int x; use(x); m(out x); }")]
    #[case::ref_argument("func f() { int x; m(ref x); }")]
    #[case::plain_argument("func f() { int x; m(x); }")]
    #[case::complex_expression("func f() { int x; m(out x + 1); }")]
    #[case::parameter_symbol("func f(int x) { m(out x); }")]
    #[case::unresolved_name("func f() { m(out x); }")]
    #[case::ambiguous_declaration("func f() { int x; int x; m(out x); }")]
    #[case::already_inline("func f() { m(out int x); }")]
    #[case::for_header_declaration("func f() { for (int i = 0; ;) { m(out i); } }")]
    fn rejects(#[case] source: &str) {
        assert!(analyze(source).is_empty(), "expected no finding in {source:?}");
    }

    #[test]
    fn rejection_is_idempotent() {
        let source = "func f() { int x; m(out x); use(x); }";
        assert!(analyze(source).is_empty());
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn fix_removes_single_declaration() {
        let result = apply_first_fix("func f() {\n    int x;\n    m(out x);\n}").unwrap();
        assert_eq!(result, "func f() {\n    m(out int x);\n}");
    }

    #[test]
    fn fix_keeps_other_declarators() {
        let result = apply_first_fix("func f() { int x, y = 1; m(out x); use(y); }").unwrap();
        assert_eq!(result, "func f() { int y = 1; m(out int x); use(y); }");
    }

    #[test]
    fn fix_carries_initializer() {
        let result = apply_first_fix("func f() { int x = 0; m(out x); }").unwrap();
        assert_eq!(result, "func f() { m(out int x = 0); }");
    }

    #[test]
    fn fix_preserves_unrelated_comments() {
        let result =
            apply_first_fix("func f() {\n    // result slot\n    int x;\n    m(out x);\n}")
                .unwrap();
        assert_eq!(result, "func f() {\n    // result slot\n    m(out int x);\n}");
    }

    #[test]
    fn fixed_tree_reparses_without_findings() {
        let result = apply_first_fix("func f() { int x; m(out x); }").unwrap();
        assert!(analyze(&result).is_empty());
    }

    #[test]
    fn stale_argument_fails_without_touching_the_tree() {
        let source = "func f() { int x; m(out x); }";
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let argument = root.descendants().find_map(Argument::cast).unwrap();
        let mut candidate = candidate_for(&argument, &sema, &root).unwrap();

        // An argument from a different snapshot has no structural match
        // in the edited statement.
        let other = parse("func f() { int x; m(out y); }").syntax();
        candidate.argument = other.descendants().find_map(Argument::cast).unwrap();

        let err = apply_rewrite(&candidate).unwrap_err();
        assert_eq!(err, RewriteError::StructuralMismatch);
        assert_eq!(root.text().to_string(), source);
    }

    #[test]
    fn diverged_scope_fails_without_touching_the_tree() {
        let source = "func f() { int x; m(out x); }";
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let argument = root.descendants().find_map(Argument::cast).unwrap();
        let mut candidate = candidate_for(&argument, &sema, &root).unwrap();

        // A scope that no longer holds the declaration cannot satisfy
        // the removal step.
        let other = parse("func f() { m(out x); }").syntax();
        candidate.search_scope = other
            .descendants()
            .find(|n| n.kind() == SyntaxKind::BLOCK)
            .unwrap();

        let err = apply_rewrite(&candidate).unwrap_err();
        assert_eq!(err, RewriteError::MissingRemovalTarget);
        assert_eq!(root.text().to_string(), source);
    }

    #[test]
    fn input_tree_is_untouched_by_the_fix() {
        let source = "func f() { int x; m(out x); }";
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let cancel = CancellationToken::new();
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(DeclareAtUse));
        let findings = analyzer.analyze(&root, &sema, &cancel);
        let mut registry = FixRegistry::new();
        registry.register(Box::new(DeclareAtUseFix));
        let actions = registry.fixes_for(&findings[0], &root, &sema, &cancel);
        let _ = actions[0].apply().unwrap();
        assert_eq!(root.text().to_string(), source);
    }
}
