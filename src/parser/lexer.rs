//! Logos-based lexer for the mini language
//!
//! Fast tokenization using the logos crate. Whitespace and comments are
//! produced as real tokens so the CST stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // KEYWORDS (before Ident so exact matches win)
    // =========================================================================
    #[token("async")]
    AsyncKw,
    #[token("func")]
    FuncKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("while")]
    WhileKw,
    #[token("for")]
    ForKw,
    #[token("return")]
    ReturnKw,
    #[token("out")]
    OutKw,
    #[token("ref")]
    RefKw,
    #[token("var")]
    VarKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    IntNumber,

    #[regex(r#""[^"]*""#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::AsyncKw => SyntaxKind::ASYNC_KW,
            LogosToken::FuncKw => SyntaxKind::FUNC_KW,
            LogosToken::IfKw => SyntaxKind::IF_KW,
            LogosToken::ElseKw => SyntaxKind::ELSE_KW,
            LogosToken::WhileKw => SyntaxKind::WHILE_KW,
            LogosToken::ForKw => SyntaxKind::FOR_KW,
            LogosToken::ReturnKw => SyntaxKind::RETURN_KW,
            LogosToken::OutKw => SyntaxKind::OUT_KW,
            LogosToken::RefKw => SyntaxKind::REF_KW,
            LogosToken::VarKw => SyntaxKind::VAR_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::IntNumber => SyntaxKind::INT_NUMBER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::Bang => SyntaxKind::BANG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_win_over_idents() {
        assert_eq!(
            kinds("out outer"),
            vec![SyntaxKind::OUT_KW, SyntaxKind::WHITESPACE, SyntaxKind::IDENT]
        );
    }

    #[test]
    fn comments_are_tokens() {
        assert_eq!(
            kinds("// note\nx"),
            vec![SyntaxKind::LINE_COMMENT, SyntaxKind::WHITESPACE, SyntaxKind::IDENT]
        );
        assert_eq!(
            kinds("/* a */x"),
            vec![SyntaxKind::BLOCK_COMMENT, SyntaxKind::IDENT]
        );
    }

    #[test]
    fn offsets_are_cumulative() {
        let tokens = tokenize("m(out x);");
        assert_eq!(tokens[0].offset, TextSize::new(0));
        assert_eq!(tokens[1].offset, TextSize::new(1)); // (
        assert_eq!(tokens[2].offset, TextSize::new(2)); // out
        assert_eq!(tokens[3].offset, TextSize::new(5)); // whitespace
        assert_eq!(tokens[4].offset, TextSize::new(6)); // x
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            kinds("==!=<=>=&&||"),
            vec![
                SyntaxKind::EQ_EQ,
                SyntaxKind::BANG_EQ,
                SyntaxKind::LT_EQ,
                SyntaxKind::GT_EQ,
                SyntaxKind::AMP_AMP,
                SyntaxKind::PIPE_PIPE,
            ]
        );
    }

    #[test]
    fn lossless_tokenization() {
        let input = "func main() { int x = 1; m(out x); } // done";
        let text: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(text, input);
    }
}
