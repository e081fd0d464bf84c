//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.

use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

fn token_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|el| el.into_token())
        .find(|t| t.kind() == kind)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn funcs(&self) -> impl Iterator<Item = FuncDecl> + '_ {
        self.0.children().filter_map(FuncDecl::cast)
    }
}

// ============================================================================
// Declarations
// ============================================================================

ast_node!(FuncDecl, FUNC_DECL);

impl FuncDecl {
    pub fn async_token(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::ASYNC_KW)
    }

    pub fn is_async(&self) -> bool {
        self.async_token().is_some()
    }

    pub fn name(&self) -> Option<Name> {
        child_of_kind(&self.0, SyntaxKind::NAME).and_then(Name::cast)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        child_of_kind(&self.0, SyntaxKind::PARAM_LIST).and_then(ParamList::cast)
    }

    pub fn body(&self) -> Option<Block> {
        child_of_kind(&self.0, SyntaxKind::BLOCK).and_then(Block::cast)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.0.children().filter_map(Param::cast)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_of_kind(&self.0, SyntaxKind::TYPE_REF).and_then(TypeRef::cast)
    }

    pub fn name(&self) -> Option<Name> {
        child_of_kind(&self.0, SyntaxKind::NAME).and_then(Name::cast)
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    pub fn text(&self) -> String {
        self.token().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> String {
        self.ident_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_statement())
    }
}

ast_node!(LocalDecl, LOCAL_DECL);

impl LocalDecl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_of_kind(&self.0, SyntaxKind::TYPE_REF).and_then(TypeRef::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = Declarator> + '_ {
        self.0.children().filter_map(Declarator::cast)
    }
}

ast_node!(Declarator, DECLARATOR);

impl Declarator {
    pub fn name(&self) -> Option<Name> {
        child_of_kind(&self.0, SyntaxKind::NAME).and_then(Name::cast)
    }

    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_expr())
    }
}

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::IF_KW)
    }

    pub fn condition(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_expr())
    }

    pub fn then_branch(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_statement())
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child_of_kind(&self.0, SyntaxKind::ELSE_CLAUSE).and_then(ElseClause::cast)
    }
}

ast_node!(ElseClause, ELSE_CLAUSE);

impl ElseClause {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::ELSE_KW)
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_statement())
    }
}

ast_node!(WhileStmt, WHILE_STMT);

impl WhileStmt {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::WHILE_KW)
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_statement())
    }
}

ast_node!(ForStmt, FOR_STMT);

impl ForStmt {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::FOR_KW)
    }

    /// The loop body. The initializer may itself be a LOCAL_DECL (a
    /// statement kind), so the body is the last statement child.
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().filter(|n| n.kind().is_statement()).last()
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> String {
        self.ident_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    pub fn callee(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_expr())
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_of_kind(&self.0, SyntaxKind::ARG_LIST).and_then(ArgList::cast)
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Argument> + '_ {
        self.0.children().filter_map(Argument::cast)
    }
}

ast_node!(Argument, ARGUMENT);

impl Argument {
    pub fn out_token(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::OUT_KW)
    }

    /// True when the argument is passed by output-reference.
    pub fn is_out(&self) -> bool {
        self.out_token().is_some()
    }

    pub fn expr(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_expr())
    }
}

ast_node!(DeclExpr, DECL_EXPR);

impl DeclExpr {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_of_kind(&self.0, SyntaxKind::TYPE_REF).and_then(TypeRef::cast)
    }

    pub fn declarator(&self) -> Option<Declarator> {
        child_of_kind(&self.0, SyntaxKind::DECLARATOR).and_then(Declarator::cast)
    }
}
