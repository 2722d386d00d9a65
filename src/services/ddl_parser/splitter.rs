// 定義リスト分割
//
// CREATE TABLE の括弧内を、深さ0のカンマでカラム定義・テーブル制約ごとに分割します。
// トークン列を対象とするため、文字列リテラルやクォート識別子内のカンマ・括弧は
// 区切りとして扱われません。両方言で共通のロジックです。

use super::dialect::DialectSyntax;
use super::lexer::{tokenize, Token, TokenKind};
use crate::core::error::ParseError;

/// トークン列を深さ0のカンマで分割
///
/// 空の定義（末尾カンマなど）は除外します。
pub fn split_definitions(tokens: &[Token]) -> Vec<&[Token]> {
    let mut definitions = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                if i > start {
                    definitions.push(&tokens[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if tokens.len() > start {
        definitions.push(&tokens[start..]);
    }

    definitions
}

/// 開き括弧に対応する閉じ括弧の位置を検索
///
/// `open` は `(` トークンのインデックスです。対応する `)` がなければ None を返します。
pub fn find_matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth: usize = 0;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// 定義本体のテキストを、トリム済みの定義文字列のリストに分割
pub fn split_definition_text(body: &str, syntax: &DialectSyntax) -> Result<Vec<String>, ParseError> {
    let tokens = tokenize(body, syntax)?;
    Ok(split_definitions(&tokens)
        .into_iter()
        .filter_map(|group| {
            let first = group.first()?;
            let last = group.last()?;
            Some(body[first.span.start..last.span.end].trim().to_string())
        })
        .collect())
}
