//! Syntax kinds for the rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the mini language analyzed by this crate.

/// All syntax kinds (tokens and nodes) in the mini language
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (functions, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    INT_NUMBER,         // 42
    STRING,             // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACE,            // {
    R_BRACE,            // }
    SEMICOLON,          // ;
    COMMA,              // ,
    DOT,                // .
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    BANG,               // !
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ASYNC_KW,
    FUNC_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    FOR_KW,
    RETURN_KW,
    OUT_KW,
    REF_KW,
    VAR_KW,
    TRUE_KW,
    FALSE_KW,

    // =========================================================================
    // COMPOSITE NODES (non-terminals in the grammar)
    // =========================================================================
    // Root
    SOURCE_FILE,

    // Declarations
    FUNC_DECL,
    PARAM_LIST,
    PARAM,
    TYPE_REF,
    NAME,

    // Statements
    BLOCK,
    LOCAL_DECL,
    DECLARATOR,
    EXPR_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    WHILE_STMT,
    FOR_STMT,
    RETURN_STMT,

    // Expressions
    NAME_REF,
    LITERAL,
    PAREN_EXPR,
    PREFIX_EXPR,
    BIN_EXPR,
    FIELD_EXPR,
    CALL_EXPR,
    ARG_LIST,
    ARGUMENT,
    DECL_EXPR,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ASYNC_KW as u16) && (self as u16) <= (Self::FALSE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PIPE_PIPE as u16)
    }

    /// Check if this node kind is a statement (the unit of sequencing)
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BLOCK
                | Self::LOCAL_DECL
                | Self::EXPR_STMT
                | Self::IF_STMT
                | Self::WHILE_STMT
                | Self::FOR_STMT
                | Self::RETURN_STMT
        )
    }

    /// Check if this node kind is an expression
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            Self::NAME_REF
                | Self::LITERAL
                | Self::PAREN_EXPR
                | Self::PREFIX_EXPR
                | Self::BIN_EXPR
                | Self::FIELD_EXPR
                | Self::CALL_EXPR
                | Self::DECL_EXPR
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MiniLanguage {}

impl rowan::Language for MiniLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<MiniLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<MiniLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<MiniLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<MiniLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<MiniLanguage>;
