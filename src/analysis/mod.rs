//! Analyzer/fix contract layer and the analysis driver.
//!
//! Rules declare the node kinds they want to be invoked for and return
//! findings as values; fixes re-derive their triggering node from the
//! tree at fix time, because the snapshot may differ from analysis time.
//! Analysis is stateless and read-only per invocation: independent trees
//! can be analyzed in parallel, and a cancellation token is checked at
//! every visited node.

pub mod rules;

use std::fmt;

use rustc_hash::FxHashMap;
use text_size::TextRange;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::parser::{SyntaxKind, SyntaxNode, parse};
use crate::sema::SemanticModel;

/// Stable rule identifier.
pub type RuleId = &'static str;

/// Severity level of a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Static description of a rule: identifier, category, and message
/// template with positional `{0}` placeholders.
#[derive(Debug)]
pub struct RuleDescriptor {
    pub id: RuleId,
    pub description: &'static str,
    pub message: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

/// A reported occurrence of an undesirable pattern, anchored to a source
/// location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub rule: RuleId,
    pub range: TextRange,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    /// Build a finding from a rule descriptor, formatting its message
    /// template with the given positional arguments.
    pub fn new(descriptor: &RuleDescriptor, range: TextRange, args: &[&str]) -> Self {
        let mut message = descriptor.message.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        Self {
            rule: descriptor.id,
            range,
            message,
            severity: descriptor.severity,
        }
    }
}

/// A syntax rule: invoked once per matching node, returns zero or one
/// finding per node.
pub trait SyntaxRule: Send + Sync {
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// The node kinds this rule wants to be invoked for.
    fn node_kinds(&self) -> &'static [SyntaxKind];

    /// Analyze one node. Unsupported shapes are not errors: the rule
    /// simply returns `None`.
    fn check(
        &self,
        node: &SyntaxNode,
        sema: &SemanticModel,
        cancel: &CancellationToken,
    ) -> Option<Finding>;
}

/// Ways a rewrite can fail. All of these are local, recoverable
/// conditions: the input tree is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// The node to remove was not found in the tree being edited.
    #[error("removal target not found")]
    MissingRemovalTarget,
    /// No structurally equivalent node exists in the already-edited tree.
    #[error("tree shape changed: no structural match for the edit target")]
    StructuralMismatch,
}

/// Result of a successful rewrite: the replacement tree plus a hint for
/// downstream re-formatting of the edited range.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub root: SyntaxNode,
    pub reformat: Option<TextRange>,
}

/// A candidate tree replacement. Applying is a pure function of the tree
/// snapshot captured when the action was derived; either a complete,
/// consistent replacement tree is produced or the original is untouched.
pub struct CodeAction {
    pub description: String,
    rewrite: Box<dyn Fn() -> Result<RewriteOutcome, RewriteError>>,
}

impl CodeAction {
    pub fn new(
        description: impl Into<String>,
        rewrite: impl Fn() -> Result<RewriteOutcome, RewriteError> + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            rewrite: Box::new(rewrite),
        }
    }

    pub fn apply(&self) -> Result<RewriteOutcome, RewriteError> {
        (self.rewrite)()
    }
}

impl fmt::Debug for CodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeAction")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A fix provider: declares which rules it can remediate and derives
/// candidate rewrites from a finding's location.
pub trait CodeFix: Send + Sync {
    fn fixable(&self) -> &'static [RuleId];

    /// Derive candidate rewrites for a finding at `range`. The triggering
    /// node is re-derived from `root`; an empty result means no fix is
    /// available.
    fn fixes(
        &self,
        root: &SyntaxNode,
        sema: &SemanticModel,
        range: TextRange,
        cancel: &CancellationToken,
    ) -> Vec<CodeAction>;
}

/// The analysis driver: dispatches registered rules over a tree by node
/// kind.
pub struct Analyzer {
    rules: Vec<Box<dyn SyntaxRule>>,
    by_kind: FxHashMap<SyntaxKind, Vec<usize>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            by_kind: FxHashMap::default(),
        }
    }

    /// An analyzer with every built-in rule registered.
    pub fn with_default_rules() -> Self {
        let mut analyzer = Self::new();
        analyzer.register(Box::new(rules::DeclareAtUse));
        analyzer.register(Box::new(rules::MissingBraces));
        analyzer.register(Box::new(rules::AsyncSuffix));
        analyzer
    }

    pub fn register(&mut self, rule: Box<dyn SyntaxRule>) {
        let index = self.rules.len();
        for &kind in rule.node_kinds() {
            self.by_kind.entry(kind).or_default().push(index);
        }
        self.rules.push(rule);
    }

    /// Run every registered rule over the tree. One candidate's rejection
    /// never blocks analysis of other nodes; on cancellation, in-flight
    /// work is abandoned and nothing is reported.
    pub fn analyze(
        &self,
        root: &SyntaxNode,
        sema: &SemanticModel,
        cancel: &CancellationToken,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            if cancel.is_cancelled() {
                tracing::debug!("analysis cancelled");
                return Vec::new();
            }
            let Some(rule_indices) = self.by_kind.get(&node.kind()) else {
                continue;
            };
            for &index in rule_indices {
                if let Some(finding) = self.rules[index].check(&node, sema, cancel) {
                    tracing::trace!(rule = finding.rule, range = ?finding.range, "finding emitted");
                    findings.push(finding);
                }
            }
        }
        findings
    }

    /// Parse, resolve, and analyze one source text.
    pub fn analyze_source(&self, source: &str, cancel: &CancellationToken) -> Vec<Finding> {
        let root = parse(source).syntax();
        let sema = SemanticModel::new(&root);
        self.analyze(&root, &sema, cancel)
    }

    /// Analyze many independent sources in parallel. Each worker operates
    /// on its own tree snapshot; no state is shared.
    pub fn analyze_batch(&self, sources: &[&str], cancel: &CancellationToken) -> Vec<Vec<Finding>> {
        use rayon::prelude::*;
        sources
            .par_iter()
            .map(|source| {
                if cancel.is_cancelled() {
                    return Vec::new();
                }
                self.analyze_source(source, cancel)
            })
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of fix providers, keyed by the rule ids they remediate.
pub struct FixRegistry {
    providers: Vec<Box<dyn CodeFix>>,
}

impl FixRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// A registry with every built-in fix registered.
    pub fn with_default_fixes() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(rules::DeclareAtUseFix));
        registry.register(Box::new(rules::MissingBracesFix));
        registry.register(Box::new(rules::AsyncSuffixFix));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn CodeFix>) {
        self.providers.push(provider);
    }

    /// Collect candidate rewrites for a finding from every provider that
    /// declares its rule fixable.
    pub fn fixes_for(
        &self,
        finding: &Finding,
        root: &SyntaxNode,
        sema: &SemanticModel,
        cancel: &CancellationToken,
    ) -> Vec<CodeAction> {
        self.providers
            .iter()
            .filter(|p| p.fixable().contains(&finding.rule))
            .flat_map(|p| p.fixes(root, sema, finding.range, cancel))
            .collect()
    }
}

impl Default for FixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_template_formatting() {
        static RULE: RuleDescriptor = RuleDescriptor {
            id: "test-rule",
            description: "test",
            message: "'{0}' should be named '{1}'",
            category: "Test",
            severity: Severity::Warning,
        };
        let finding = Finding::new(
            &RULE,
            TextRange::empty(0.into()),
            &["fetch", "fetchAsync"],
        );
        assert_eq!(finding.message, "'fetch' should be named 'fetchAsync'");
        assert_eq!(finding.rule, "test-rule");
    }

    #[test]
    fn cancelled_analysis_reports_nothing() {
        let analyzer = Analyzer::with_default_rules();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let findings = analyzer.analyze_source("func f() { int x; m(out x); }", &cancel);
        assert!(findings.is_empty());
    }

    #[test]
    fn batch_analysis_is_per_source() {
        let analyzer = Analyzer::with_default_rules();
        let cancel = CancellationToken::new();
        let results = analyzer.analyze_batch(
            &[
                "func f() { int x; m(out x); }",
                "func g() { if (c) m(); }",
                "func h() { return; }",
            ],
            &cancel,
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0][0].rule, "declare-at-use");
        assert_eq!(results[1].len(), 1);
        assert_eq!(results[1][0].rule, "missing-braces");
        assert!(results[2].is_empty());
    }
}
