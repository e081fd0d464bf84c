//! Recursive descent parser for the mini language
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse mini-language source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the nth non-trivia token from the current position
    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    /// Attach pending trivia tokens at the current tree position.
    ///
    /// Callers decide where trivia lands by choosing when to call this:
    /// before `start_node` the trivia stays in the parent, after it the
    /// trivia belongs to the new node.
    fn eat_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        // Consume one token even when already at a recovery point so the
        // caller is guaranteed to make progress
        if !consumed && !self.at_eof() && !self.at_any(recovery) {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = FuncDecl*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.eat_trivia();
            if self.at_eof() {
                break;
            }
            if self.at(SyntaxKind::ASYNC_KW) || self.at(SyntaxKind::FUNC_KW) {
                self.parse_func_decl();
            } else {
                self.error_recover(
                    format!("expected a function, found {:?}", self.current_kind()),
                    &[SyntaxKind::FUNC_KW, SyntaxKind::ASYNC_KW],
                );
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// FuncDecl = 'async'? 'func' Name ParamList Block
    fn parse_func_decl(&mut self) {
        self.start_node(SyntaxKind::FUNC_DECL);

        if self.at(SyntaxKind::ASYNC_KW) {
            self.bump();
            self.eat_trivia();
        }
        self.expect(SyntaxKind::FUNC_KW);
        self.eat_trivia();
        self.parse_name();
        self.eat_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list();
        } else {
            self.error("expected parameter list");
        }
        self.eat_trivia();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.error("expected function body");
        }

        self.finish_node();
    }

    /// Name = IDENT (a declared name)
    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// NameRef = IDENT (a use of a name)
    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.bump(); // (

        loop {
            self.eat_trivia();
            if self.at(SyntaxKind::R_PAREN) || self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            self.parse_param();
            self.eat_trivia();
            if self.at(SyntaxKind::COMMA) {
                self.bump();
            } else {
                break;
            }
            if self.pos == pos_before {
                break;
            }
        }

        self.eat_trivia();
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Param = ('out' | 'ref')? TypeRef Name
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        if self.at(SyntaxKind::OUT_KW) || self.at(SyntaxKind::REF_KW) {
            self.bump();
            self.eat_trivia();
        }
        self.parse_type_ref();
        self.eat_trivia();
        self.parse_name();
        self.finish_node();
    }

    /// TypeRef = IDENT | 'var'
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);
        if self.at(SyntaxKind::IDENT) || self.at(SyntaxKind::VAR_KW) {
            self.bump();
        } else {
            self.error("expected a type");
        }
        self.finish_node();
    }

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.bump(); // {

        loop {
            self.eat_trivia();
            if self.at(SyntaxKind::R_BRACE) || self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Statement dispatch. Leading trivia must already be consumed.
    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::VAR_KW => self.parse_local_decl(),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::IDENT => self.parse_local_decl(),
            SyntaxKind::IF_KW => self.parse_if_stmt(),
            SyntaxKind::WHILE_KW => self.parse_while_stmt(),
            SyntaxKind::FOR_KW => self.parse_for_stmt(),
            SyntaxKind::RETURN_KW => self.parse_return_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// LocalDecl = TypeRef Declarator (',' Declarator)* ';'
    fn parse_local_decl(&mut self) {
        self.start_node(SyntaxKind::LOCAL_DECL);
        self.parse_type_ref();

        loop {
            self.eat_trivia();
            if !self.at(SyntaxKind::IDENT) {
                self.error("expected a variable name");
                break;
            }
            self.parse_declarator();
            if self.nth(0) == SyntaxKind::COMMA {
                self.eat_trivia();
                self.bump();
            } else {
                break;
            }
        }

        self.eat_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Declarator = Name ('=' Expr)?
    ///
    /// Trailing trivia is left outside so a bare declarator's subtree is
    /// exactly its name (the rewrite engine copies these subtrees verbatim).
    fn parse_declarator(&mut self) {
        self.start_node(SyntaxKind::DECLARATOR);
        self.parse_name();
        if self.nth(0) == SyntaxKind::EQ {
            self.eat_trivia();
            self.bump(); // =
            self.eat_trivia();
            self.parse_expr();
        }
        self.finish_node();
    }

    /// IfStmt = 'if' '(' Expr ')' Statement ElseClause?
    fn parse_if_stmt(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump(); // if
        self.eat_trivia();
        self.expect(SyntaxKind::L_PAREN);
        self.eat_trivia();
        self.parse_expr();
        self.eat_trivia();
        self.expect(SyntaxKind::R_PAREN);
        self.eat_trivia();
        self.parse_statement();
        if self.nth(0) == SyntaxKind::ELSE_KW {
            self.eat_trivia();
            self.parse_else_clause();
        }
        self.finish_node();
    }

    /// ElseClause = 'else' Statement
    fn parse_else_clause(&mut self) {
        self.start_node(SyntaxKind::ELSE_CLAUSE);
        self.bump(); // else
        self.eat_trivia();
        self.parse_statement();
        self.finish_node();
    }

    /// WhileStmt = 'while' '(' Expr ')' Statement
    fn parse_while_stmt(&mut self) {
        self.start_node(SyntaxKind::WHILE_STMT);
        self.bump(); // while
        self.eat_trivia();
        self.expect(SyntaxKind::L_PAREN);
        self.eat_trivia();
        self.parse_expr();
        self.eat_trivia();
        self.expect(SyntaxKind::R_PAREN);
        self.eat_trivia();
        self.parse_statement();
        self.finish_node();
    }

    /// ForStmt = 'for' '(' (LocalDecl | Expr? ';') Expr? ';' Expr? ')' Statement
    fn parse_for_stmt(&mut self) {
        self.start_node(SyntaxKind::FOR_STMT);
        self.bump(); // for
        self.eat_trivia();
        self.expect(SyntaxKind::L_PAREN);
        self.eat_trivia();

        // initializer
        if self.at(SyntaxKind::SEMICOLON) {
            self.bump();
        } else if self.at(SyntaxKind::VAR_KW)
            || (self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::IDENT)
        {
            self.parse_local_decl();
        } else {
            self.parse_expr();
            self.eat_trivia();
            self.expect(SyntaxKind::SEMICOLON);
        }

        // condition
        self.eat_trivia();
        if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
            self.eat_trivia();
        }
        self.expect(SyntaxKind::SEMICOLON);

        // step
        self.eat_trivia();
        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr();
            self.eat_trivia();
        }
        self.expect(SyntaxKind::R_PAREN);

        self.eat_trivia();
        self.parse_statement();
        self.finish_node();
    }

    /// ReturnStmt = 'return' Expr? ';'
    fn parse_return_stmt(&mut self) {
        self.start_node(SyntaxKind::RETURN_STMT);
        self.bump(); // return
        if self.nth(0) != SyntaxKind::SEMICOLON {
            self.eat_trivia();
            self.parse_expr();
        }
        self.eat_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ExprStmt = Expr ';'
    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::EXPR_STMT);
        self.parse_expr();
        self.eat_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    // =========================================================================
    // Expressions (precedence climbing)
    // =========================================================================

    /// Expr entry point. Leading trivia must already be consumed.
    fn parse_expr(&mut self) {
        self.parse_expr_bp(0);
    }

    fn parse_expr_bp(&mut self, min_bp: u8) {
        let checkpoint = self.builder.checkpoint();
        self.parse_unary();

        loop {
            let Some((left_bp, right_bp)) = binding_power(self.nth(0)) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            self.builder
                .start_node_at(checkpoint, SyntaxKind::BIN_EXPR.into());
            self.eat_trivia();
            self.bump(); // operator
            self.eat_trivia();
            self.parse_expr_bp(right_bp);
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if self.at(SyntaxKind::BANG) || self.at(SyntaxKind::MINUS) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.eat_trivia();
            self.parse_unary();
            self.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    /// Postfix = Atom ( ArgList | '.' NameRef )*
    fn parse_postfix(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_atom();

        loop {
            match self.nth(0) {
                SyntaxKind::L_PAREN if self.at(SyntaxKind::L_PAREN) => {
                    // calls bind tightly: no trivia between callee and '('
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::CALL_EXPR.into());
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::DOT => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::FIELD_EXPR.into());
                    self.eat_trivia();
                    self.bump(); // .
                    self.eat_trivia();
                    self.parse_name_ref();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_atom(&mut self) {
        match self.current_kind() {
            SyntaxKind::IDENT => self.parse_name_ref(),
            SyntaxKind::INT_NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.eat_trivia();
                self.parse_expr();
                self.eat_trivia();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            _ => {
                self.error_recover(
                    format!("expected an expression, found {:?}", self.current_kind()),
                    &[
                        SyntaxKind::SEMICOLON,
                        SyntaxKind::R_PAREN,
                        SyntaxKind::R_BRACE,
                        SyntaxKind::COMMA,
                    ],
                );
            }
        }
    }

    /// ArgList = '(' (Argument (',' Argument)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.bump(); // (

        loop {
            self.eat_trivia();
            if self.at(SyntaxKind::R_PAREN) || self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            self.parse_argument();
            self.eat_trivia();
            if self.at(SyntaxKind::COMMA) {
                self.bump();
            } else {
                break;
            }
            if self.pos == pos_before {
                break;
            }
        }

        self.eat_trivia();
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Argument = ('out' | 'ref')? (DeclExpr | Expr)
    fn parse_argument(&mut self) {
        self.start_node(SyntaxKind::ARGUMENT);
        if self.at(SyntaxKind::OUT_KW) || self.at(SyntaxKind::REF_KW) {
            self.bump();
            self.eat_trivia();
        }
        // `m(out int x)` - a type name followed by a variable name is an
        // inline declaration expression
        if (self.at(SyntaxKind::VAR_KW) || self.at(SyntaxKind::IDENT))
            && self.nth(1) == SyntaxKind::IDENT
        {
            self.parse_decl_expr();
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }

    /// DeclExpr = TypeRef Declarator
    fn parse_decl_expr(&mut self) {
        self.start_node(SyntaxKind::DECL_EXPR);
        self.parse_type_ref();
        self.eat_trivia();
        self.parse_declarator();
        self.finish_node();
    }
}

/// Binding powers for binary operators: (left, right).
/// Assignment is right-associative, everything else left-associative.
fn binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    match kind {
        SyntaxKind::EQ => Some((1, 1)),
        SyntaxKind::PIPE_PIPE => Some((2, 3)),
        SyntaxKind::AMP_AMP => Some((3, 4)),
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => Some((4, 5)),
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => Some((5, 6)),
        SyntaxKind::PLUS | SyntaxKind::MINUS => Some((6, 7)),
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => Some((7, 8)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    fn parse_ok(input: &str) -> SyntaxNode {
        let parse = parse(input);
        assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
        parse.syntax()
    }

    #[test]
    fn lossless_roundtrip() {
        let sources = [
            "func main() { int x; m(out x); }",
            "func main() {\n    // leading comment\n    int x = 1, y = 2;\n    m(out x, ref y);\n}\n",
            "async func fetch() { if (ready) return; else wait(); }",
            "func loop() { for (int i = 0; i < 10; i = i + 1) step(i); }",
            "func ops() { int r = a + b * -c == d && !e; }",
            "func member() { use(s.field); }",
        ];
        for src in sources {
            let root = parse_ok(src);
            assert_eq!(root.text().to_string(), src, "roundtrip failed for {src:?}");
        }
    }

    #[test]
    fn broken_input_still_roundtrips() {
        let src = "func main() { int ; ??? m(out ); }";
        let parse = parse(src);
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), src);
    }

    #[test]
    fn out_argument_shape() {
        let root = parse_ok("func main() { m(out x); }");
        let argument = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ARGUMENT)
            .unwrap();
        let kinds: Vec<_> = argument
            .children_with_tokens()
            .filter(|el| !el.kind().is_trivia())
            .map(|el| el.kind())
            .collect();
        assert_eq!(kinds, vec![SyntaxKind::OUT_KW, SyntaxKind::NAME_REF]);
    }

    #[test]
    fn inline_declaration_expression_parses() {
        let root = parse_ok("func main() { m(out int x); }");
        let decl_expr = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::DECL_EXPR)
            .unwrap();
        assert_eq!(decl_expr.text().to_string(), "int x");
    }

    #[test]
    fn multi_declarator_local() {
        let root = parse_ok("func main() { int x, y = 1; }");
        let local = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::LOCAL_DECL)
            .unwrap();
        let declarators: Vec<_> = local
            .children()
            .filter(|n| n.kind() == SyntaxKind::DECLARATOR)
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(declarators, vec!["x", "y = 1"]);
    }

    #[test]
    fn bare_declarator_subtree_has_no_trailing_trivia() {
        let root = parse_ok("func main() { int x ; }");
        let declarator = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::DECLARATOR)
            .unwrap();
        assert_eq!(declarator.text().to_string(), "x");
    }

    #[test]
    fn statement_vs_expression_disambiguation() {
        // `x = 1;` is an assignment, `int x = 1;` a declaration
        let root = parse_ok("func main() { x = 1; int y = 2; }");
        let block = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::BLOCK)
            .unwrap();
        let kinds: Vec<_> = block
            .children()
            .filter(|n| n.kind().is_statement())
            .map(|n| n.kind())
            .collect();
        assert_eq!(kinds, vec![SyntaxKind::EXPR_STMT, SyntaxKind::LOCAL_DECL]);
    }

    #[test]
    fn if_without_braces() {
        let root = parse_ok("func main() { if (c) m(); }");
        let if_stmt = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::IF_STMT)
            .unwrap();
        let body = if_stmt
            .children()
            .find(|n| n.kind().is_statement())
            .unwrap();
        assert_eq!(body.kind(), SyntaxKind::EXPR_STMT);
    }

    #[test]
    fn else_clause_nested_statement() {
        let root = parse_ok("func main() { if (c) { m(); } else n(); }");
        let else_clause = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ELSE_CLAUSE)
            .unwrap();
        let body = else_clause
            .children()
            .find(|n| n.kind().is_statement())
            .unwrap();
        assert_eq!(body.kind(), SyntaxKind::EXPR_STMT);
    }

    #[test]
    fn for_header_local_decl_is_inside_for_statement() {
        let root = parse_ok("func main() { for (int i = 0; i < 3; i = i + 1) m(i); }");
        let local = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::LOCAL_DECL)
            .unwrap();
        assert_eq!(local.parent().unwrap().kind(), SyntaxKind::FOR_STMT);
    }

    #[test]
    fn assignment_is_right_associative() {
        let root = parse_ok("func main() { a = b = 1; }");
        let outer = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::BIN_EXPR)
            .unwrap();
        let inner: Vec<_> = outer
            .children()
            .filter(|n| n.kind() == SyntaxKind::BIN_EXPR)
            .collect();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].text().to_string(), "b = 1");
    }
}
