// 定義の分類と解析
//
// CREATE TABLE 本体の各定義を、主キー・ユニーク制約・インデックス・
// 非対応の制約・カラム定義のいずれかに分類し、TableDescriptor に反映します。
// 解析できない定義は破棄せず、警告として記録します。

use super::cursor::Cursor;
use super::dialect::{canonicalize_type_name, DialectSyntax};
use super::lexer::{Token, TokenKind};
use super::splitter::split_definitions;
use crate::adapters::type_mapping::is_known_sql_type;
use crate::core::schema::{Column, TableDescriptor};
use tracing::debug;

/// 1つの定義を解析してテーブル記述子に反映
pub(super) fn apply_definition(
    tokens: &[Token],
    source: &str,
    syntax: &DialectSyntax,
    table: &mut TableDescriptor,
) {
    let Some(text) = source_text(tokens, source) else {
        return;
    };
    let mut cursor = Cursor::new(tokens);

    if cursor.check_keyword("constraint") {
        cursor.advance();
        if !is_constraint_body_start(&cursor) {
            cursor.advance();
        }
        apply_table_constraint(&mut cursor, text, syntax, table);
        return;
    }

    if is_table_constraint_start(&cursor, syntax) {
        apply_table_constraint(&mut cursor, text, syntax, table);
        return;
    }

    match parse_column(tokens, source, syntax, table) {
        Some(column) => {
            debug!(column = %column.name, raw_type = %column.raw_type, "parsed column");
            table.columns.push(column);
        }
        None => table
            .warnings
            .push(format!("Skipped unparseable column definition: {}", text)),
    }
}

/// 定義の元テキスト
fn source_text<'s>(tokens: &[Token], source: &'s str) -> Option<&'s str> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(source[first.span.start..last.span.end].trim())
}

/// `CONSTRAINT name` の後に制約本体が始まっているか（名前省略の判定）
fn is_constraint_body_start(cursor: &Cursor) -> bool {
    ["primary", "unique", "foreign", "check", "exclude"]
        .iter()
        .any(|kw| cursor.check_keyword(kw))
}

/// テーブル単位の制約・インデックス定義かどうか
fn is_table_constraint_start(cursor: &Cursor, syntax: &DialectSyntax) -> bool {
    let next_is = |kw: &str| cursor.peek_at(1).is_some_and(|t| t.is_keyword(kw));
    let next_is_paren = cursor.peek_at(1).is_some_and(|t| t.is(&TokenKind::LParen));

    if cursor.check_keyword("primary") || cursor.check_keyword("foreign") {
        return next_is("key");
    }
    if cursor.check_keyword("unique") || cursor.check_keyword("check") {
        return true;
    }
    if cursor.check_keyword("like") {
        return true;
    }
    if cursor.check_keyword("exclude") {
        return next_is("using") || next_is_paren;
    }
    if syntax.table_level_indexes {
        return ["index", "key", "fulltext", "spatial"]
            .iter()
            .any(|kw| cursor.check_keyword(kw));
    }
    false
}

/// テーブル単位の制約を反映
fn apply_table_constraint(
    cursor: &mut Cursor,
    text: &str,
    syntax: &DialectSyntax,
    table: &mut TableDescriptor,
) {
    if cursor.eat_keywords(&["primary", "key"]) {
        match key_columns(cursor.remaining()) {
            Some(columns) => table.primary_keys.extend(columns),
            None => table
                .warnings
                .push(format!("Skipped primary key without a column list: {}", text)),
        }
        return;
    }

    if cursor.eat_keyword("unique") {
        match key_columns(cursor.remaining()) {
            Some(columns) => table.unique_keys.push(columns),
            None => table
                .warnings
                .push(format!("Skipped unique constraint without a column list: {}", text)),
        }
        return;
    }

    let is_index = syntax.table_level_indexes
        && ["index", "key", "fulltext", "spatial"]
            .iter()
            .any(|kw| cursor.check_keyword(kw));
    if is_index {
        match key_columns(cursor.remaining()) {
            Some(columns) => table.indexes.push(columns),
            None => table
                .warnings
                .push(format!("Skipped index without a column list: {}", text)),
        }
        return;
    }

    debug!(definition = %text, "skipping unsupported table constraint");
    table
        .warnings
        .push(format!("Skipped unsupported constraint definition: {}", text));
}

/// 最初の括弧内のカラム名リストを抽出
///
/// `name(10)` や `name DESC` のような修飾は先頭の識別子のみを採用します。
fn key_columns(tokens: &[Token]) -> Option<Vec<String>> {
    let open = tokens.iter().position(|t| t.is(&TokenKind::LParen))?;
    let mut cursor = Cursor::new(&tokens[open..]);
    let inner = cursor.eat_paren_group()?;

    let columns: Vec<String> = split_definitions(inner)
        .into_iter()
        .filter_map(|group| group.first().and_then(Token::ident))
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

/// カラム定義を解析
///
/// カラム名または型名を特定できない場合は None を返します。
fn parse_column(
    tokens: &[Token],
    source: &str,
    syntax: &DialectSyntax,
    table: &mut TableDescriptor,
) -> Option<Column> {
    let mut cursor = Cursor::new(tokens);
    let name = cursor.advance()?.ident()?.to_string();
    if name.is_empty() {
        return None;
    }

    let mut column = parse_column_type(&mut cursor, name, source, syntax)?;
    let mut state = ColumnTail::default();
    parse_column_tail(&mut cursor, &mut column, &mut state, source, syntax, table);

    if syntax.is_identity_type(&column.raw_type) {
        column.auto_increment = true;
    }
    if column.auto_increment {
        column.not_null = true;
    }
    if state.primary_key {
        table.primary_keys.push(column.name.clone());
    }
    if state.unique {
        table.unique_keys.push(vec![column.name.clone()]);
    }

    if !is_known_sql_type(syntax.dialect, &column.raw_type) {
        table.warnings.push(format!(
            "Unrecognized type '{}' on column '{}' is kept verbatim",
            column.raw_type.to_uppercase(),
            column.name
        ));
    }

    Some(column)
}

/// 型名・型パラメータ・配列サフィックスを解析
fn parse_column_type(
    cursor: &mut Cursor,
    name: String,
    source: &str,
    syntax: &DialectSyntax,
) -> Option<Column> {
    let first = cursor.peek()?.word()?;
    if syntax.is_constraint_keyword(first) {
        return None;
    }
    cursor.advance();

    let mut words = vec![first.to_string()];
    collect_type_words(cursor, syntax, &mut words);

    let mut column = Column::new(name, String::new());
    if let Some(params) = cursor.eat_paren_group() {
        apply_type_params(&mut column, params, source);
        collect_type_words(cursor, syntax, &mut words);
    }

    let mut raw_type = canonicalize_type_name(&words.join(" "));
    loop {
        if cursor.check(&TokenKind::LBracket) {
            cursor.advance();
            while cursor
                .peek()
                .is_some_and(|t| !t.is(&TokenKind::RBracket))
            {
                cursor.advance();
            }
            cursor.advance();
            raw_type.push_str("[]");
        } else if cursor.eat_keyword("array") {
            raw_type.push_str("[]");
        } else {
            break;
        }
    }

    column.raw_type = raw_type;
    Some(column)
}

/// 型名を構成する後続の語を収集
///
/// `double precision` や `timestamp with time zone` のような複数語の型名に対応します。
fn collect_type_words(cursor: &mut Cursor, syntax: &DialectSyntax, words: &mut Vec<String>) {
    while let Some(word) = cursor.peek().and_then(Token::word) {
        if syntax.is_type_stop_keyword(word) || word.eq_ignore_ascii_case("array") {
            break;
        }
        words.push(word.to_string());
        cursor.advance();
    }
}

/// 型パラメータを反映
///
/// すべて文字列リテラルの場合は ENUM / SET のメンバーとして扱います。
fn apply_type_params(column: &mut Column, params: &[Token], source: &str) {
    let groups = split_definitions(params);
    let all_strings = !groups.is_empty()
        && groups
            .iter()
            .all(|group| group.len() == 1 && group[0].string_value().is_some());

    if all_strings {
        column.enum_values = groups
            .iter()
            .filter_map(|group| group[0].string_value())
            .map(str::to_string)
            .collect();
        return;
    }

    let mut texts = groups
        .into_iter()
        .filter_map(|group| source_text(group, source))
        .map(str::to_string);
    column.length = texts.next();
    column.precision = texts.next();
}

/// カラム制約の解析状態
#[derive(Debug, Default)]
struct ColumnTail {
    primary_key: bool,
    unique: bool,
}

/// 型名以降のカラム制約を解析
fn parse_column_tail(
    cursor: &mut Cursor,
    column: &mut Column,
    state: &mut ColumnTail,
    source: &str,
    syntax: &DialectSyntax,
    table: &mut TableDescriptor,
) {
    while let Some(token) = cursor.peek() {
        if cursor.eat_keywords(&["not", "null"]) {
            column.not_null = true;
        } else if cursor.eat_keyword("null") {
            column.not_null = false;
        } else if cursor.eat_keyword("default") {
            parse_default(cursor, column, source, syntax);
        } else if cursor.eat_keywords(&["primary", "key"]) || cursor.eat_keyword("key") {
            state.primary_key = true;
        } else if cursor.eat_keyword("unique") {
            if !cursor.eat_keyword("key") {
                cursor.eat_keyword("index");
            }
            state.unique = true;
        } else if cursor.eat_keyword("auto_increment") || cursor.eat_keyword("autoincrement") {
            column.auto_increment = true;
        } else if cursor.eat_keyword("unsigned") {
            column.unsigned = true;
        } else if cursor.eat_keyword("signed") || cursor.eat_keyword("zerofill") {
            continue;
        } else if cursor.eat_keyword("comment") {
            if let Some(comment) = cursor.peek().and_then(Token::string_value) {
                column.comment = Some(comment.to_string());
                cursor.advance();
            }
        } else if cursor.eat_keyword("generated") {
            parse_generated(cursor, column, table);
        } else if cursor.eat_keyword("as") {
            cursor.eat_paren_group();
            table.warnings.push(format!(
                "Column '{}': generated column expression was dropped",
                column.name
            ));
        } else if cursor.eat_keyword("references") {
            cursor.eat_qualified_name();
            cursor.eat_paren_group();
            table.warnings.push(format!(
                "Column '{}': REFERENCES clause is not supported and was dropped",
                column.name
            ));
        } else if cursor.eat_keyword("match") {
            cursor.advance();
        } else if cursor.eat_keyword("on") {
            if is_on_update_value(cursor) {
                table.warnings.push(format!(
                    "Column '{}': ON UPDATE clause was dropped",
                    column.name
                ));
            }
            skip_referential_action(cursor);
        } else if cursor.eat_keyword("check") {
            cursor.eat_paren_group();
            table.warnings.push(format!(
                "Column '{}': CHECK constraint was dropped",
                column.name
            ));
        } else if cursor.eat_keyword("constraint") {
            let unnamed = cursor
                .peek()
                .and_then(Token::word)
                .is_some_and(|w| syntax.is_constraint_keyword(w));
            if !unnamed {
                cursor.advance();
            }
        } else if cursor.eat_keyword("collate") || cursor.eat_keyword("charset") {
            cursor.advance();
        } else if cursor.eat_keywords(&["character", "set"]) {
            cursor.advance();
        } else if cursor.check(&TokenKind::LParen) {
            cursor.eat_paren_group();
        } else {
            debug!(column = %column.name, token = ?token.kind, "ignoring column attribute token");
            cursor.advance();
        }
    }
}

/// `GENERATED { ALWAYS | BY DEFAULT } AS { IDENTITY [(...)] | (expr) [STORED] }`
fn parse_generated(cursor: &mut Cursor, column: &mut Column, table: &mut TableDescriptor) {
    if !cursor.eat_keyword("always") {
        cursor.eat_keywords(&["by", "default"]);
    }
    cursor.eat_keyword("as");

    if cursor.eat_keyword("identity") {
        column.auto_increment = true;
        cursor.eat_paren_group();
        return;
    }

    cursor.eat_paren_group();
    if !cursor.eat_keyword("stored") {
        cursor.eat_keyword("virtual");
    }
    table.warnings.push(format!(
        "Column '{}': generated column expression was dropped",
        column.name
    ));
}

/// `ON UPDATE <value>`（MySQL の自動更新値）か
///
/// 外部キーの参照アクション（CASCADE など）は対象外です。
fn is_on_update_value(cursor: &Cursor) -> bool {
    cursor.check_keyword("update")
        && !cursor.peek_at(1).is_some_and(|t| {
            ["cascade", "restrict", "set", "no"]
                .iter()
                .any(|kw| t.is_keyword(kw))
        })
}

/// `ON { UPDATE | DELETE } <action>` を読み飛ばす
fn skip_referential_action(cursor: &mut Cursor) {
    if !cursor.eat_keyword("update") {
        cursor.eat_keyword("delete");
    }
    if cursor.eat_keyword("set") || cursor.eat_keyword("no") {
        cursor.advance();
        return;
    }
    cursor.advance();
    cursor.eat_paren_group();
}

/// DEFAULT 式を解析
///
/// リテラル・関数呼び出し・括弧式の元テキストをそのまま保持します。
/// `::type` のキャストは除去し、`nextval(...)` は自動増分として扱います。
fn parse_default(cursor: &mut Cursor, column: &mut Column, source: &str, syntax: &DialectSyntax) {
    let Some(start) = cursor.peek().map(|t| t.span.start) else {
        return;
    };

    if matches!(
        cursor.peek().map(|t| &t.kind),
        Some(TokenKind::Symbol('-')) | Some(TokenKind::Symbol('+'))
    ) {
        cursor.advance();
    }

    let Some(token) = cursor.peek() else {
        return;
    };
    let mut is_sequence = false;

    match &token.kind {
        TokenKind::LParen => {
            cursor.eat_paren_group();
        }
        TokenKind::Word(word) => {
            cursor.advance();
            // b'0101' / X'FF' / N'text' / _utf8mb4'text'
            let prefixed_literal = cursor.peek().is_some_and(|next| {
                next.span.start == token.span.end && matches!(next.kind, TokenKind::StringLit(_))
            });
            if prefixed_literal {
                cursor.advance();
            } else {
                while cursor.check(&TokenKind::Dot)
                    && cursor.peek_at(1).is_some_and(|t| t.ident().is_some())
                {
                    cursor.advance();
                    cursor.advance();
                }
                cursor.eat_paren_group();
                is_sequence = word.eq_ignore_ascii_case("nextval");
            }
        }
        _ => {
            cursor.advance();
        }
    }

    let end = cursor.previous().map_or(start, |t| t.span.end);
    while cursor.eat(&TokenKind::DoubleColon) {
        skip_cast_type(cursor, syntax);
    }

    if is_sequence {
        column.auto_increment = true;
        column.default_value = None;
        return;
    }

    let raw = source[start..end].trim();
    if !raw.is_empty() {
        column.default_value = Some(raw.to_string());
    }
}

/// キャスト先の型名を読み飛ばす
fn skip_cast_type(cursor: &mut Cursor, syntax: &DialectSyntax) {
    let mut first = true;
    while let Some(word) = cursor.peek().and_then(Token::ident) {
        let stop = if first {
            syntax.is_constraint_keyword(word)
        } else {
            syntax.is_type_stop_keyword(word)
        };
        if stop {
            break;
        }
        cursor.advance();
        first = false;
    }
    cursor.eat_paren_group();
    while cursor.eat(&TokenKind::LBracket) {
        cursor.eat(&TokenKind::RBracket);
    }
}
