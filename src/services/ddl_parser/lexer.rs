// DDLトークナイザー
//
// 入力テキストを識別子・キーワード・文字列リテラル・数値・記号のトークン列に分割します。
// コメントは方言の構文記述子に従ってスキップします。
// 各トークンは元テキスト上のバイト範囲（Span）を保持するため、
// デフォルト値などの生テキストの切り出しとエラー位置の算出に使用できます。

use super::dialect::DialectSyntax;
use crate::core::error::{ErrorLocation, ParseError};

/// ソース上のバイト範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// 開始バイトオフセット（含む）
    pub start: usize,
    /// 終了バイトオフセット（含まない）
    pub end: usize,
}

impl Span {
    /// 新しいSpanを作成
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 2つのSpanを覆うSpanを作成
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// トークン種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// クォートされていない識別子またはキーワード（元の表記のまま）
    Word(String),
    /// クォートされた識別子（クォート除去・エスケープ解除済み）
    QuotedIdent { value: String, quote: char },
    /// 文字列リテラル（クォート除去・エスケープ解除済み）
    StringLit(String),
    /// 数値リテラル
    Number(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Equals,
    /// PostgreSQLの型キャスト `::`
    DoubleColon,
    /// その他の記号
    Symbol(char),
}

/// トークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// 新しいトークンを作成
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 指定キーワードかどうか（大文字小文字を区別しない）
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// クォートされていない語を取得
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }

    /// 識別子として解釈した値を取得（クォート有無を問わない）
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            TokenKind::QuotedIdent { value, .. } => Some(value),
            _ => None,
        }
    }

    /// 文字列値として解釈した値を取得
    ///
    /// MySQLではダブルクォートも文字列として使用されるため、
    /// `"..."` のクォート識別子も文字列として受け付けます。
    pub fn string_value(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::StringLit(s) => Some(s),
            TokenKind::QuotedIdent { value, quote: '"' } => Some(value),
            _ => None,
        }
    }

    /// 指定の種別かどうか
    pub fn is(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }
}

/// 入力テキストをトークン列に変換
pub fn tokenize(input: &str, syntax: &DialectSyntax) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input, syntax).tokenize()
}

/// 字句解析器
struct Lexer<'a> {
    input: &'a str,
    syntax: &'a DialectSyntax,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, syntax: &'a DialectSyntax) -> Self {
        Self {
            input,
            syntax,
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let Some(c) = self.peek() else {
                break;
            };
            let start = self.pos;
            let kind = self.scan_token(c)?;
            tokens.push(Token::new(kind, Span::new(start, self.pos)));
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str, offset: usize) -> ParseError {
        ParseError::Lexical {
            message: message.to_string(),
            location: ErrorLocation::from_offset(self.input, offset),
        }
    }

    /// 空白とコメントをスキップ
    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) => self.skip_line_comment(),
                (Some('#'), _) if self.syntax.hash_comments => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.advance();
        self.advance();
        let mut depth = 1usize;

        while depth > 0 {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                }
                Some('/') if self.peek() == Some('*') && self.syntax.nested_block_comments => {
                    self.advance();
                    depth += 1;
                }
                Some(_) => {}
                None => return Err(self.error("unterminated block comment", start)),
            }
        }
        Ok(())
    }

    fn scan_token(&mut self, c: char) -> Result<TokenKind, ParseError> {
        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '=' => self.single(TokenKind::Equals),
            ':' if self.peek_next() == Some(':') => {
                self.advance();
                self.advance();
                TokenKind::DoubleColon
            }
            '\'' => TokenKind::StringLit(self.scan_string(self.syntax.backslash_escapes)?),
            '$' if self.syntax.dollar_quotes => match self.try_scan_dollar_quoted()? {
                Some(body) => TokenKind::StringLit(body),
                None => self.single(TokenKind::Symbol('$')),
            },
            c if self.syntax.is_identifier_quote(c) => self.scan_quoted_identifier(c)?,
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(),
            '.' => self.single(TokenKind::Dot),
            c if c.is_alphabetic() || c == '_' => self.scan_word()?,
            other => self.single(TokenKind::Symbol(other)),
        };
        Ok(kind)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// 識別子またはキーワードを読み取る
    ///
    /// PostgreSQLの `E'...'` は直後の文字列をエスケープ付きで読み取ります。
    fn scan_word(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        if self.syntax.escape_string_prefix
            && matches!(self.peek(), Some('e') | Some('E'))
            && self.peek_next() == Some('\'')
        {
            self.advance();
            return Ok(TokenKind::StringLit(self.scan_string(true)?));
        }

        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }
        Ok(TokenKind::Word(self.input[start..self.pos].to_string()))
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mut lookahead = self.input[self.pos..].chars().skip(1);
            let exponent_follows = match lookahead.next() {
                Some('+') | Some('-') => lookahead.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exponent_follows {
                self.advance();
                if self.peek().is_some_and(|c| c == '+' || c == '-') {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        TokenKind::Number(self.input[start..self.pos].to_string())
    }

    /// 単一引用符の文字列リテラルを読み取る
    fn scan_string(&mut self, backslash_escapes: bool) -> Result<String, ParseError> {
        let start = self.pos;
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        // エスケープされたシングルクォート('')
                        self.advance();
                        value.push('\'');
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') if backslash_escapes => match self.advance() {
                    Some(escaped) => value.push(unescape_backslash(escaped)),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(self.error("unterminated string literal", start))
    }

    /// クォートされた識別子を読み取る
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(TokenKind::QuotedIdent { value, quote });
                    }
                }
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated quoted identifier", start)),
            }
        }
    }

    /// `$tag$...$tag$` を読み取る
    ///
    /// `$tag$` の形をしていない場合は None を返し、位置を進めません。
    fn try_scan_dollar_quoted(&mut self) -> Result<Option<String>, ParseError> {
        let start = self.pos;
        let rest = &self.input[start + 1..];
        let Some(end) = rest.find('$') else {
            return Ok(None);
        };
        let inner = &rest[..end];
        if !inner.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            || inner.starts_with(|ch: char| ch.is_ascii_digit())
        {
            return Ok(None);
        }

        let tag = &self.input[start..start + end + 2];
        let body_start = start + tag.len();
        match self.input[body_start..].find(tag) {
            Some(body_len) => {
                let body = self.input[body_start..body_start + body_len].to_string();
                self.pos = body_start + body_len + tag.len();
                Ok(Some(body))
            }
            None => Err(self.error("unterminated dollar-quoted string", start)),
        }
    }
}

/// バックスラッシュエスケープを解除
fn unescape_backslash(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'b' => '\u{8}',
        'Z' => '\u{1a}',
        other => other,
    }
}
