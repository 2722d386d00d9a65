// DDLパーサーサービス
//
// CREATE TABLE 文を解析し、方言に依存しない TableDescriptor を生成します。
// 字句解析 → 文の分割 → ヘッダー解析 → 定義リストの分割 → 定義ごとの分類、の順に処理します。
// 方言ごとの差異は DialectSyntax 記述子に集約し、解析ロジック自体は共通です。

mod cursor;
mod definition;
pub mod dialect;
pub mod lexer;
pub mod splitter;

pub use dialect::DialectSyntax;
pub use splitter::split_definition_text;

use crate::core::config::Dialect;
use crate::core::error::{ErrorLocation, ParseError};
use crate::core::schema::TableDescriptor;
use cursor::Cursor;
use definition::apply_definition;
use lexer::{tokenize, Token, TokenKind};
use splitter::{find_matching_paren, split_definitions};
use tracing::debug;

/// `CREATE` と `TABLE` の間に置ける修飾子
const TABLE_PREFIXES: &[&str] = &["temporary", "temp", "unlogged", "global", "local"];

/// DDLパーサー
///
/// 方言ごとに1つ作成し、同じインスタンスで何度でも解析できます。
/// 内部状態を持たないため、解析結果は呼び出しごとに独立しています。
#[derive(Debug, Clone, Copy)]
pub struct DdlParser {
    syntax: &'static DialectSyntax,
}

/// `COMMENT ON` 文の解析結果
#[derive(Debug)]
enum CommentTarget {
    Table { table: String },
    Column { table: String, column: String },
}

#[derive(Debug)]
struct PendingComment {
    target: CommentTarget,
    text: Option<String>,
}

impl DdlParser {
    /// 新しいDdlParserを作成
    pub fn new(dialect: Dialect) -> Self {
        Self {
            syntax: DialectSyntax::for_dialect(dialect),
        }
    }

    /// 解析対象の方言
    pub fn dialect(&self) -> Dialect {
        self.syntax.dialect
    }

    /// 入力中の最初の CREATE TABLE 文を解析
    ///
    /// # Arguments
    ///
    /// * `input` - DDLテキスト
    ///
    /// # Returns
    ///
    /// テーブル記述子。複数の CREATE TABLE 文がある場合は先頭のみを返し、警告を付与します。
    ///
    /// # Errors
    ///
    /// - CREATE TABLE 文が見つからない場合
    /// - テーブル名を抽出できない場合
    /// - カラム定義部の括弧が閉じていない場合
    /// - 文字列リテラル等が閉じていない場合
    pub fn parse(&self, input: &str) -> Result<TableDescriptor, ParseError> {
        let tables = self.parse_all(input)?;
        let count = tables.len();
        let mut first = tables
            .into_iter()
            .next()
            .ok_or_else(|| missing_create_table(input, 0))?;

        if count > 1 {
            first.warnings.push(format!(
                "Input contains {} CREATE TABLE statements; only '{}' was used",
                count, first.table_name
            ));
        }
        Ok(first)
    }

    /// 入力中のすべての CREATE TABLE 文を解析
    ///
    /// 記述子は入力順に返します。`COMMENT ON` 文はすべての CREATE TABLE を解析した後で
    /// 対応するテーブルに反映します。それ以外の文は無視します。
    pub fn parse_all(&self, input: &str) -> Result<Vec<TableDescriptor>, ParseError> {
        let tokens = tokenize(input, self.syntax).map_err(|error| {
            if self.create_table_precedes(input, error.location().offset) {
                error
            } else {
                missing_create_table(input, 0)
            }
        })?;
        let mut tables = Vec::new();
        let mut comments = Vec::new();

        for statement in tokens.split(|t| t.is(&TokenKind::Semicolon)) {
            let Some(first) = statement.first() else {
                continue;
            };

            if first.is_keyword("create") {
                if let Some(table) = self.parse_create_table(statement, input)? {
                    tables.push(table);
                }
            } else if first.is_keyword("comment") && self.syntax.comment_on_statements {
                match parse_comment_on(statement) {
                    Some(comment) => comments.push(comment),
                    None => debug!("ignoring malformed COMMENT statement"),
                }
            } else {
                debug!(keyword = ?first.kind, "ignoring non CREATE TABLE statement");
            }
        }

        if tables.is_empty() {
            let offset = tokens.first().map_or(0, |t| t.span.start);
            return Err(missing_create_table(input, offset));
        }

        for comment in comments {
            apply_comment(&mut tables, comment);
        }

        for table in &tables {
            debug!(
                table = %table.table_name,
                columns = table.columns.len(),
                warnings = table.warnings.len(),
                "parsed CREATE TABLE statement"
            );
        }
        Ok(tables)
    }

    /// 字句解析エラーの位置より前に CREATE TABLE 文が始まっているか
    ///
    /// CREATE TABLE を含まない入力の字句エラーは CREATE TABLE 欠落として報告します。
    fn create_table_precedes(&self, input: &str, offset: usize) -> bool {
        input
            .get(..offset)
            .and_then(|prefix| tokenize(prefix, self.syntax).ok())
            .is_some_and(|tokens| has_create_table(&tokens))
    }

    /// CREATE TABLE 文を解析
    ///
    /// `CREATE INDEX` など TABLE 以外の CREATE 文の場合は None を返します。
    fn parse_create_table(
        &self,
        statement: &[Token],
        input: &str,
    ) -> Result<Option<TableDescriptor>, ParseError> {
        let mut cursor = Cursor::new(statement);
        cursor.eat_keyword("create");
        while TABLE_PREFIXES.iter().any(|kw| cursor.eat_keyword(kw)) {}
        if !cursor.eat_keyword("table") {
            debug!("ignoring CREATE statement that does not create a table");
            return Ok(None);
        }
        cursor.eat_keywords(&["if", "not", "exists"]);

        let name_offset = cursor
            .peek()
            .map_or_else(|| statement_end(statement), |t| t.span.start);
        let table_name = match cursor.eat_qualified_name() {
            Some(parts) => parts.last().map(|s| s.to_string()).unwrap_or_default(),
            None => String::new(),
        };
        if table_name.is_empty() {
            return Err(ParseError::MissingTableName {
                message: "expected a table name after CREATE TABLE".to_string(),
                location: ErrorLocation::from_offset(input, name_offset),
            });
        }

        let open = cursor.position();
        if !cursor.check(&TokenKind::LParen) {
            let offset = cursor
                .peek()
                .map_or_else(|| statement_end(statement), |t| t.span.start);
            return Err(ParseError::UnbalancedBody {
                message: format!("expected '(' after table name '{}'", table_name),
                location: ErrorLocation::from_offset(input, offset),
            });
        }
        let Some(close) = find_matching_paren(statement, open) else {
            return Err(ParseError::UnbalancedBody {
                message: format!("unclosed '(' in definition of table '{}'", table_name),
                location: ErrorLocation::from_offset(input, statement[open].span.start),
            });
        };

        let mut table = TableDescriptor::new(self.syntax.dialect, table_name);
        for definition in split_definitions(&statement[open + 1..close]) {
            apply_definition(definition, input, self.syntax, &mut table);
        }
        resolve_key_names(&mut table);
        if table.columns.is_empty() {
            table
                .warnings
                .push(format!("Table '{}' has no columns", table.table_name));
        }

        if let Some(comment) = table_option_comment(&statement[close + 1..]) {
            table.table_comment = comment;
        }
        Ok(Some(table))
    }
}

/// 文末（最終トークンの終端）のオフセット
fn statement_end(statement: &[Token]) -> usize {
    statement.last().map_or(0, |t| t.span.end)
}

/// キー定義のカラム名を宣言済みカラムの表記に揃える
///
/// 大文字小文字のみが異なる場合は宣言側の表記を採用します。
fn resolve_key_names(table: &mut TableDescriptor) {
    let declared: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let resolve = |name: &mut String| {
        if declared.contains(name) {
            return;
        }
        if let Some(column) = declared.iter().find(|c| c.eq_ignore_ascii_case(name)) {
            *name = column.clone();
        }
    };
    table
        .primary_keys
        .iter_mut()
        .chain(table.unique_keys.iter_mut().flatten())
        .chain(table.indexes.iter_mut().flatten())
        .for_each(resolve);
}

/// `CREATE [TEMPORARY ...] TABLE` で始まる文が含まれるか
fn has_create_table(tokens: &[Token]) -> bool {
    tokens.iter().enumerate().any(|(i, token)| {
        token.is_keyword("create")
            && tokens[i + 1..]
                .iter()
                .find(|t| !TABLE_PREFIXES.iter().any(|kw| t.is_keyword(kw)))
                .is_some_and(|t| t.is_keyword("table"))
    })
}

/// CREATE TABLE 欠落エラーを生成
fn missing_create_table(input: &str, offset: usize) -> ParseError {
    ParseError::MissingCreateTable {
        message: "no CREATE TABLE clause with a parenthesized column list was found".to_string(),
        location: ErrorLocation::from_offset(input, offset),
    }
}

/// 閉じ括弧以降のテーブルオプションから `COMMENT [=] 'text'` を抽出
fn table_option_comment(options: &[Token]) -> Option<String> {
    let mut cursor = Cursor::new(options);
    let mut comment = None;
    while !cursor.is_at_end() {
        if cursor.eat_keyword("comment") {
            cursor.eat(&TokenKind::Equals);
            if let Some(text) = cursor.peek().and_then(Token::string_value) {
                comment = Some(text.to_string());
            }
        }
        cursor.advance();
    }
    comment
}

/// `COMMENT ON { TABLE | COLUMN } name IS { 'text' | NULL }` を解析
fn parse_comment_on(statement: &[Token]) -> Option<PendingComment> {
    let mut cursor = Cursor::new(statement);
    if !cursor.eat_keywords(&["comment", "on"]) {
        return None;
    }

    let is_table = if cursor.eat_keyword("table") {
        true
    } else if cursor.eat_keyword("column") {
        false
    } else {
        return None;
    };

    let parts = cursor.eat_qualified_name()?;
    if !cursor.eat_keyword("is") {
        return None;
    }
    let text = cursor
        .peek()
        .and_then(|t| match &t.kind {
            TokenKind::StringLit(s) => Some(Some(s.clone())),
            _ if t.is_keyword("null") => Some(None),
            _ => None,
        })?;

    let target = if is_table {
        CommentTarget::Table {
            table: parts.last()?.to_string(),
        }
    } else {
        let [.., table, column] = parts.as_slice() else {
            return None;
        };
        CommentTarget::Column {
            table: table.to_string(),
            column: column.to_string(),
        }
    };
    Some(PendingComment { target, text })
}

/// `COMMENT ON` の内容を該当テーブルに反映
///
/// `IS NULL` はコメントの削除として扱います。
fn apply_comment(tables: &mut [TableDescriptor], comment: PendingComment) {
    let table_name = match &comment.target {
        CommentTarget::Table { table } | CommentTarget::Column { table, .. } => table.clone(),
    };

    let Some(index) = tables
        .iter()
        .position(|t| t.table_name.eq_ignore_ascii_case(&table_name))
    else {
        if let Some(first) = tables.first_mut() {
            first.warnings.push(format!(
                "COMMENT ON for unknown table '{}' was ignored",
                table_name
            ));
        }
        return;
    };
    let table = &mut tables[index];

    match comment.target {
        CommentTarget::Table { .. } => {
            table.table_comment = comment.text.unwrap_or_default();
        }
        CommentTarget::Column { column, .. } => {
            let Some(name) = table
                .columns
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(&column))
                .map(|c| c.name.clone())
            else {
                table.warnings.push(format!(
                    "COMMENT ON for unknown column '{}.{}' was ignored",
                    table_name, column
                ));
                return;
            };
            match comment.text {
                Some(text) => {
                    table.column_comments.insert(name, text);
                }
                None => {
                    table.column_comments.remove(&name);
                }
            }
        }
    }
}
