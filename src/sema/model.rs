//! Name resolution for a single tree snapshot.
//!
//! The model is built in two passes: functions first (visible
//! everywhere), then function bodies with a lexical scope stack. Locals
//! become visible at their declarator and stay visible to the end of the
//! enclosing scope.
//!
//! A model is only meaningful against the tree it was built from; every
//! edit produces a new tree and requires a new model.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbols::{SymbolData, SymbolId, SymbolKind};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxNodePtr};
use crate::syntax::ast::{
    AstNode, Block, CallExpr, DeclExpr, Declarator, FuncDecl, IfStmt, NameRef, SourceFile,
};

/// Snapshot-based semantic model: identifier references resolved to
/// symbols, and declaration nodes mapped back to the symbols they
/// introduce.
#[derive(Debug, Default)]
pub struct SemanticModel {
    symbols: Vec<SymbolData>,
    refs: FxHashMap<SyntaxNodePtr, SymbolId>,
    decls: FxHashMap<SyntaxNodePtr, SymbolId>,
}

impl SemanticModel {
    /// Build a model for the given tree root.
    pub fn new(root: &SyntaxNode) -> Self {
        let mut binder = Binder::default();
        if let Some(file) = SourceFile::cast(root.clone()) {
            binder.bind_file(&file);
        }
        tracing::debug!(
            symbols = binder.model.symbols.len(),
            references = binder.model.refs.len(),
            "semantic model built"
        );
        binder.model
    }

    /// Resolve an identifier reference to its symbol, if any.
    pub fn resolve(&self, name_ref: &NameRef) -> Option<SymbolId> {
        self.refs.get(&SyntaxNodePtr::new(name_ref.syntax())).copied()
    }

    /// Look up the symbol introduced by a declaration node (a declarator,
    /// a parameter, or a function name).
    pub fn symbol_at_decl(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.decls.get(&SyntaxNodePtr::new(node)).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.index()]
    }

    /// Materialize the declaring syntax nodes of a symbol against the
    /// tree the model was built from.
    pub fn declaring_sites(&self, id: SymbolId, root: &SyntaxNode) -> Vec<SyntaxNode> {
        self.symbol(id)
            .decl_sites
            .iter()
            .map(|ptr| ptr.to_node(root))
            .collect()
    }

    /// All reference pointers resolved to the given symbol.
    pub fn references_to(&self, id: SymbolId) -> Vec<SyntaxNodePtr> {
        let mut refs: Vec<_> = self
            .refs
            .iter()
            .filter(|&(_, &sym)| sym == id)
            .map(|(ptr, _)| *ptr)
            .collect();
        refs.sort_by_key(|ptr| ptr.text_range().start());
        refs
    }
}

#[derive(Default)]
struct Binder {
    model: SemanticModel,
    scopes: Vec<FxHashMap<SmolStr, SymbolId>>,
}

impl Binder {
    fn bind_file(&mut self, file: &SourceFile) {
        // Functions are visible everywhere, including before their
        // declaration
        self.scopes.push(FxHashMap::default());
        for func in file.funcs() {
            if let Some(name) = func.name() {
                self.define(
                    SmolStr::new(name.text()),
                    SymbolKind::Function,
                    name.syntax(),
                );
            }
        }
        for func in file.funcs() {
            self.bind_func(&func);
        }
        self.scopes.pop();
    }

    fn bind_func(&mut self, func: &FuncDecl) {
        self.scopes.push(FxHashMap::default());
        if let Some(params) = func.param_list() {
            for param in params.params() {
                if let Some(name) = param.name() {
                    self.define(SmolStr::new(name.text()), SymbolKind::Param, param.syntax());
                }
            }
        }
        if let Some(body) = func.body() {
            self.bind_stmt(body.syntax());
        }
        self.scopes.pop();
    }

    fn bind_stmt(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::BLOCK => {
                self.scopes.push(FxHashMap::default());
                if let Some(block) = Block::cast(node.clone()) {
                    for stmt in block.statements() {
                        self.bind_stmt(&stmt);
                    }
                }
                self.scopes.pop();
            }
            SyntaxKind::LOCAL_DECL => {
                for declarator in node.children().filter_map(Declarator::cast) {
                    // The initializer is bound before the name becomes
                    // visible, so `int x = x;` does not resolve
                    if let Some(init) = declarator.initializer() {
                        self.bind_expr(&init);
                    }
                    if let Some(name) = declarator.name() {
                        self.define(
                            SmolStr::new(name.text()),
                            SymbolKind::Local,
                            declarator.syntax(),
                        );
                    }
                }
            }
            SyntaxKind::FOR_STMT => {
                // The header declaration scopes to the loop
                self.scopes.push(FxHashMap::default());
                self.bind_children(node);
                self.scopes.pop();
            }
            SyntaxKind::IF_STMT => {
                if let Some(stmt) = IfStmt::cast(node.clone()) {
                    if let Some(condition) = stmt.condition() {
                        self.bind_expr(&condition);
                    }
                    if let Some(then_branch) = stmt.then_branch() {
                        self.bind_stmt(&then_branch);
                    }
                    if let Some(else_clause) = stmt.else_clause() {
                        self.bind_stmt(else_clause.syntax());
                    }
                }
            }
            SyntaxKind::EXPR_STMT
            | SyntaxKind::RETURN_STMT
            | SyntaxKind::ELSE_CLAUSE
            | SyntaxKind::WHILE_STMT => self.bind_children(node),
            _ => {}
        }
    }

    fn bind_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            if child.kind().is_statement() {
                self.bind_stmt(&child);
            } else if child.kind().is_expr() {
                self.bind_expr(&child);
            }
        }
    }

    fn bind_expr(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::NAME_REF => {
                let name_ref = NameRef::cast(node.clone()).expect("kind checked");
                let name = name_ref.text();
                match self.resolve_name(name.as_str()) {
                    Some(id) => {
                        self.model.refs.insert(SyntaxNodePtr::new(node), id);
                    }
                    None => {
                        tracing::trace!(name = %name, "unresolved reference");
                    }
                }
            }
            SyntaxKind::FIELD_EXPR => {
                // Only the receiver is a name in scope; the member name
                // resolves against the receiver's type, which this model
                // does not track
                if let Some(receiver) = node.children().find(|n| n.kind().is_expr()) {
                    self.bind_expr(&receiver);
                }
            }
            SyntaxKind::CALL_EXPR => {
                if let Some(call) = CallExpr::cast(node.clone()) {
                    if let Some(callee) = call.callee() {
                        self.bind_expr(&callee);
                    }
                    if let Some(args) = call.arg_list() {
                        for argument in args.args() {
                            if let Some(expr) = argument.expr() {
                                self.bind_expr(&expr);
                            }
                        }
                    }
                }
            }
            SyntaxKind::DECL_EXPR => {
                // An inline declaration introduces a local into the
                // current scope
                if let Some(declarator) =
                    DeclExpr::cast(node.clone()).and_then(|d| d.declarator())
                {
                    if let Some(init) = declarator.initializer() {
                        self.bind_expr(&init);
                    }
                    if let Some(name) = declarator.name() {
                        self.define(
                            SmolStr::new(name.text()),
                            SymbolKind::Local,
                            declarator.syntax(),
                        );
                    }
                }
            }
            SyntaxKind::BIN_EXPR
            | SyntaxKind::PREFIX_EXPR
            | SyntaxKind::PAREN_EXPR => {
                for child in node.children() {
                    if child.kind().is_expr() {
                        self.bind_expr(&child);
                    }
                }
            }
            _ => {}
        }
    }

    /// Introduce a name in the current scope. A name already bound in the
    /// same scope gains an extra declaring site instead of a new symbol.
    fn define(&mut self, name: SmolStr, kind: SymbolKind, site: &SyntaxNode) {
        let ptr = SyntaxNodePtr::new(site);
        let scope = self.scopes.last_mut().expect("scope stack is never empty");
        if let Some(&existing) = scope.get(&name) {
            self.model.symbols[existing.index()].decl_sites.push(ptr);
            self.model.decls.insert(ptr, existing);
            return;
        }
        let id = SymbolId::new(self.model.symbols.len());
        self.model.symbols.push(SymbolData {
            name: name.clone(),
            kind,
            decl_sites: vec![ptr],
        });
        scope.insert(name, id);
        self.model.decls.insert(ptr, id);
    }

    fn resolve_name(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn model_for(input: &str) -> (SyntaxNode, SemanticModel) {
        let root = parse(input).syntax();
        let model = SemanticModel::new(&root);
        (root, model)
    }

    fn name_refs(root: &SyntaxNode, text: &str) -> Vec<NameRef> {
        root.descendants()
            .filter_map(NameRef::cast)
            .filter(|r| r.text() == text)
            .collect()
    }

    #[test]
    fn local_resolves_to_its_declarator() {
        let (root, model) = model_for("func f() { int x; m(out x); }");
        let refs = name_refs(&root, "x");
        assert_eq!(refs.len(), 1);
        let id = model.resolve(&refs[0]).unwrap();
        let data = model.symbol(id);
        assert_eq!(data.kind, SymbolKind::Local);
        assert_eq!(data.decl_sites.len(), 1);
        let sites = model.declaring_sites(id, &root);
        assert_eq!(sites[0].kind(), SyntaxKind::DECLARATOR);
    }

    #[test]
    fn all_uses_resolve_to_same_symbol() {
        let (root, model) = model_for("func f() { int x; m(out x); use(x); }");
        let refs = name_refs(&root, "x");
        assert_eq!(refs.len(), 2);
        let first = model.resolve(&refs[0]).unwrap();
        let second = model.resolve(&refs[1]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shadowing_creates_distinct_symbols() {
        let (root, model) = model_for("func f() { int x; { int x; use(x); } use(x); }");
        let refs = name_refs(&root, "x");
        let inner = model.resolve(&refs[0]).unwrap();
        let outer = model.resolve(&refs[1]).unwrap();
        assert_ne!(inner, outer);
        assert_eq!(model.symbol(inner).decl_sites.len(), 1);
        assert_eq!(model.symbol(outer).decl_sites.len(), 1);
    }

    #[test]
    fn same_scope_redeclaration_is_ambiguous() {
        let (root, model) = model_for("func f() { int x; int x; use(x); }");
        let refs = name_refs(&root, "x");
        let id = model.resolve(&refs[0]).unwrap();
        assert_eq!(model.symbol(id).decl_sites.len(), 2);
        let _ = root;
    }

    #[test]
    fn parameters_have_param_kind() {
        let (root, model) = model_for("func f(int a) { use(a); }");
        let refs = name_refs(&root, "a");
        let id = model.resolve(&refs[0]).unwrap();
        assert_eq!(model.symbol(id).kind, SymbolKind::Param);
        assert_eq!(
            model.declaring_sites(id, &root)[0].kind(),
            SyntaxKind::PARAM
        );
    }

    #[test]
    fn calls_resolve_to_functions() {
        let (root, model) = model_for("func g() {} func f() { g(); }");
        let refs = name_refs(&root, "g");
        let id = model.resolve(&refs[0]).unwrap();
        assert_eq!(model.symbol(id).kind, SymbolKind::Function);
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        let (root, model) = model_for("func f() { use(mystery); }");
        let refs = name_refs(&root, "mystery");
        assert!(model.resolve(&refs[0]).is_none());
    }

    #[test]
    fn use_before_declaration_does_not_resolve() {
        let (root, model) = model_for("func f() { use(x); int x; }");
        let refs = name_refs(&root, "x");
        assert!(model.resolve(&refs[0]).is_none());
    }

    #[test]
    fn initializer_cannot_see_its_own_name() {
        let (root, model) = model_for("func f() { int x = x; }");
        let refs = name_refs(&root, "x");
        assert_eq!(refs.len(), 1);
        assert!(model.resolve(&refs[0]).is_none());
    }

    #[test]
    fn inline_declaration_binds_later_uses() {
        let (root, model) = model_for("func f() { m(out int x); use(x); }");
        let refs = name_refs(&root, "x");
        assert_eq!(refs.len(), 1);
        let id = model.resolve(&refs[0]).unwrap();
        assert_eq!(model.symbol(id).kind, SymbolKind::Local);
    }

    #[test]
    fn member_names_are_not_resolved_as_locals() {
        let (root, model) = model_for("func f() { int x; use(s.x); }");
        // Two NAME_REFs spelled `x`: the member name must not resolve to
        // the local
        let refs = name_refs(&root, "x");
        let resolved: Vec<_> = refs.iter().filter_map(|r| model.resolve(r)).collect();
        assert!(resolved.is_empty());
    }

    #[test]
    fn references_are_filtered_by_symbol() {
        let (root, model) = model_for("func f() { int x; int y; m(out x); use(y); use(x); }");
        let x_refs = name_refs(&root, "x");
        let id = model.resolve(&x_refs[0]).unwrap();
        let ptrs = model.references_to(id);
        assert_eq!(ptrs.len(), 2);
        for ptr in &ptrs {
            let node = ptr.to_node(&root);
            assert_eq!(node.text().to_string(), "x");
        }
    }

    #[test]
    fn references_are_in_source_order() {
        let (root, model) = model_for("func f() { int x; m(out x); use(x); }");
        let refs = name_refs(&root, "x");
        let id = model.resolve(&refs[0]).unwrap();
        let ptrs = model.references_to(id);
        assert_eq!(ptrs.len(), 2);
        assert!(ptrs[0].text_range().start() < ptrs[1].text_range().start());
    }
}
