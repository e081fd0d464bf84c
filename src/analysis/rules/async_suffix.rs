//! Async naming: an `async func` should carry the `Async` name suffix.
//! The fix renames the declaration together with every reference in the
//! file, replacing tokens back-to-front so earlier offsets stay valid.

use rowan::GreenToken;
use text_size::TextRange;
use tokio_util::sync::CancellationToken;

use crate::analysis::{
    CodeAction, CodeFix, Finding, RewriteError, RewriteOutcome, RuleDescriptor, RuleId, Severity,
    SyntaxRule,
};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::sema::SemanticModel;
use crate::syntax::FuncDecl;
use crate::syntax::ast::AstNode;

pub static ASYNC_SUFFIX: RuleDescriptor = RuleDescriptor {
    id: "async-name-suffix",
    description: "Async function names should end with 'Async'",
    message: "'{0}' is async and should be named '{1}'",
    category: "Naming",
    severity: Severity::Warning,
};

const SUFFIX: &str = "Async";

pub struct AsyncSuffix;

impl SyntaxRule for AsyncSuffix {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ASYNC_SUFFIX
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::FUNC_DECL]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        _sema: &SemanticModel,
        _cancel: &CancellationToken,
    ) -> Option<Finding> {
        let func = FuncDecl::cast(node.clone())?;
        if !func.is_async() {
            return None;
        }
        let name = func.name()?;
        let text = name.text();
        if text.ends_with(SUFFIX) {
            return None;
        }
        let suggested = format!("{text}{SUFFIX}");
        Some(Finding::new(
            &ASYNC_SUFFIX,
            name.syntax().text_range(),
            &[text.as_str(), suggested.as_str()],
        ))
    }
}

pub struct AsyncSuffixFix;

impl CodeFix for AsyncSuffixFix {
    fn fixable(&self) -> &'static [RuleId] {
        &["async-name-suffix"]
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
        let Some(func) = node.ancestors().find_map(FuncDecl::cast) else {
            return Vec::new();
        };
        let Some(name) = func.name() else {
            return Vec::new();
        };
        let text = name.text();
        if text.ends_with(SUFFIX) {
            return Vec::new();
        }
        let Some(symbol) = sema.symbol_at_decl(name.syntax()) else {
            return Vec::new();
        };

        // Resolve every occurrence up front; the action itself must not
        // hold on to the semantic model.
        let mut ranges: Vec<TextRange> = sema
            .references_to(symbol)
            .iter()
            .map(|ptr| ptr.text_range())
            .collect();
        for site in &sema.symbol(symbol).decl_sites {
            ranges.push(site.text_range());
        }
        ranges.sort_by_key(|r| r.start());
        ranges.dedup();

        let new_name = format!("{text}{SUFFIX}");
        let description = format!("Rename '{text}' to '{new_name}'");
        let snapshot = root.clone();
        vec![CodeAction::new(description, move || {
            rename_at(&snapshot, &ranges, &new_name)
        })]
    }
}

/// Replace the identifier token at each range with `new_name`, working
/// from the highest offset down so the remaining ranges stay valid.
fn rename_at(
    root: &SyntaxNode,
    ranges: &[TextRange],
    new_name: &str,
) -> Result<RewriteOutcome, RewriteError> {
    let mut current = root.clone();
    for range in ranges.iter().rev() {
        let token = match current.covering_element(*range) {
            rowan::NodeOrToken::Token(t) => t,
            rowan::NodeOrToken::Node(n) => n
                .first_token()
                .ok_or(RewriteError::StructuralMismatch)?,
        };
        if token.kind() != SyntaxKind::IDENT || token.text_range() != *range {
            return Err(RewriteError::StructuralMismatch);
        }
        let green = token.replace_with(GreenToken::new(SyntaxKind::IDENT.into(), new_name));
        current = SyntaxNode::new_root(green);
    }
    Ok(RewriteOutcome {
        root: current,
        reformat: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, FixRegistry};
    use crate::parser::parse;

    fn analyze(source: &str) -> Vec<Finding> {
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(AsyncSuffix));
        analyzer.analyze(&root, &sema, &CancellationToken::new())
    }

    #[test]
    fn flags_async_without_suffix() {
        let findings = analyze("async func fetch() { return; }");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "'fetch' is async and should be named 'fetchAsync'"
        );
    }

    #[test]
    fn accepts_suffixed_and_sync_functions() {
        assert!(analyze("async func fetchAsync() { return; }").is_empty());
        assert!(analyze("func fetch() { return; }").is_empty());
    }

    #[test]
    fn fix_renames_declaration_and_references() {
        let source = "async func fetch() { return; }\nfunc g() { fetch(); fetch(); }";
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let cancel = CancellationToken::new();
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(AsyncSuffix));
        let findings = analyzer.analyze(&root, &sema, &cancel);
        assert_eq!(findings.len(), 1);
        let mut registry = FixRegistry::new();
        registry.register(Box::new(AsyncSuffixFix));
        let actions = registry.fixes_for(&findings[0], &root, &sema, &cancel);
        assert_eq!(actions.len(), 1);
        let outcome = actions[0].apply().unwrap();
        assert_eq!(
            outcome.root.text().to_string(),
            "async func fetchAsync() { return; }\nfunc g() { fetchAsync(); fetchAsync(); }"
        );
    }

    #[test]
    fn fixed_tree_reparses_without_findings() {
        let source = "async func fetch() { return; }";
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        let cancel = CancellationToken::new();
        let mut analyzer = Analyzer::new();
        analyzer.register(Box::new(AsyncSuffix));
        let findings = analyzer.analyze(&root, &sema, &cancel);
        let mut registry = FixRegistry::new();
        registry.register(Box::new(AsyncSuffixFix));
        let actions = registry.fixes_for(&findings[0], &root, &sema, &cancel);
        let fixed = actions[0].apply().unwrap().root.text().to_string();
        assert!(analyze(&fixed).is_empty());
    }
}
