// トークンカーソル
//
// トークンスライス上を前方に読み進める再帰下降パーサー用の補助構造体です。

use super::lexer::{Token, TokenKind};
use super::splitter::find_matching_paren;

/// トークンカーソル
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// 新しいカーソルを作成
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// 現在位置のトークン
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// 現在位置から `n` 個先のトークン
    pub fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    /// 直前に消費したトークン
    pub fn previous(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// 1トークン進める
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// 終端に達したか
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// 現在位置
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 現在位置から末尾までのトークン
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    /// 現在位置が指定キーワードか
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// 現在位置が指定種別か
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| t.is(kind))
    }

    /// 指定キーワードなら消費して true を返す
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// キーワード列がすべて一致する場合のみ消費する
    pub fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let matches = keywords
            .iter()
            .enumerate()
            .all(|(i, kw)| self.peek_at(i).is_some_and(|t| t.is_keyword(kw)));
        if matches {
            self.pos += keywords.len();
        }
        matches
    }

    /// 指定種別なら消費して true を返す
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// 現在位置が `(` なら対応する `)` までを消費し、括弧内のトークンを返す
    ///
    /// 括弧が閉じていない場合は末尾まで消費します。
    pub fn eat_paren_group(&mut self) -> Option<&'a [Token]> {
        if !self.check(&TokenKind::LParen) {
            return None;
        }
        let open = self.pos;
        match find_matching_paren(self.tokens, open) {
            Some(close) => {
                self.pos = close + 1;
                Some(&self.tokens[open + 1..close])
            }
            None => {
                self.pos = self.tokens.len();
                Some(&self.tokens[open + 1..])
            }
        }
    }

    /// `ident(.ident)*` 形式の修飾名を読み取り、各部分を返す
    pub fn eat_qualified_name(&mut self) -> Option<Vec<&'a str>> {
        let mut parts = vec![self.peek()?.ident()?];
        self.pos += 1;
        while self.check(&TokenKind::Dot) {
            match self.peek_at(1).and_then(Token::ident) {
                Some(part) => {
                    parts.push(part);
                    self.pos += 2;
                }
                None => break,
            }
        }
        Some(parts)
    }
}
