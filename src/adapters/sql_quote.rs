// SQL識別子クォート・文字列リテラルユーティリティ
//
// 各データベース方言用の識別子クォート関数と、文字列リテラルのエスケープ・デコードを提供します。
// sql_generatorから使用される共有モジュールです。

use regex::Regex;
use std::sync::LazyLock;

/// クォート不要なPostgreSQL識別子のパターン
static PLAIN_POSTGRES_IDENTIFIER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_$]*$").ok());

/// PostgreSQLの予約語（クォートが必要なもの）
const POSTGRES_RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "both",
    "case", "cast", "check", "collate", "column", "constraint", "create", "current_catalog",
    "current_date", "current_role", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false",
    "fetch", "for", "foreign", "from", "grant", "group", "having", "in", "initially",
    "intersect", "into", "lateral", "leading", "limit", "localtime", "localtimestamp", "not",
    "null", "offset", "on", "only", "or", "order", "placing", "primary", "references",
    "returning", "select", "session_user", "some", "symmetric", "table", "then", "to",
    "trailing", "true", "union", "unique", "user", "using", "variadic", "when", "where",
    "window", "with",
];

/// PostgreSQL用識別子クォート（ダブルクォート）
///
/// 識別子内のダブルクォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use tabula::adapters::sql_quote::quote_identifier_postgres;
/// assert_eq!(quote_identifier_postgres("users"), r#""users""#);
/// assert_eq!(quote_identifier_postgres(r#"table"name"#), r#""table""name""#);
/// ```
pub fn quote_identifier_postgres(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// PostgreSQL用識別子クォート（必要な場合のみ）
///
/// 小文字英数字とアンダースコアのみで構成され、予約語でない識別子はそのまま返します。
///
/// # Examples
/// ```
/// use tabula::adapters::sql_quote::quote_identifier_postgres_if_needed;
/// assert_eq!(quote_identifier_postgres_if_needed("users"), "users");
/// assert_eq!(quote_identifier_postgres_if_needed("UserName"), r#""UserName""#);
/// assert_eq!(quote_identifier_postgres_if_needed("order"), r#""order""#);
/// ```
pub fn quote_identifier_postgres_if_needed(name: &str) -> String {
    let plain = PLAIN_POSTGRES_IDENTIFIER
        .as_ref()
        .is_some_and(|re| re.is_match(name));
    if plain && !POSTGRES_RESERVED.contains(&name) {
        name.to_string()
    } else {
        quote_identifier_postgres(name)
    }
}

/// MySQL用識別子クォート（バッククォート）
///
/// 識別子内のバッククォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use tabula::adapters::sql_quote::quote_identifier_mysql;
/// assert_eq!(quote_identifier_mysql("users"), "`users`");
/// assert_eq!(quote_identifier_mysql("table`name"), "`table``name`");
/// ```
pub fn quote_identifier_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// カラム名リストをクォートしてカンマ区切りで結合（PostgreSQL用）
pub fn quote_columns_postgres<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| quote_identifier_postgres_if_needed(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// カラム名リストをクォートしてカンマ区切りで結合（MySQL用）
pub fn quote_columns_mysql<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| quote_identifier_mysql(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// PostgreSQL用文字列リテラル（シングルクォートを二重化）
pub fn quote_literal_postgres(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// MySQL用文字列リテラル（バックスラッシュとシングルクォートをエスケープ）
pub fn quote_literal_mysql(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// 文字列リテラルの元テキストをデコード
///
/// `'...'`、`E'...'`、`N'...'`、`_charset'...'`、およびMySQLの `"..."` を受け付けます。
/// 単一の文字列リテラルでない場合は None を返します。
///
/// # Arguments
/// * `raw` - リテラルの元テキスト
/// * `backslash_escapes` - バックスラッシュエスケープを解釈するか（MySQL）
pub fn decode_string_literal(raw: &str, backslash_escapes: bool) -> Option<String> {
    let raw = raw.trim();
    let quote_pos = raw.find(['\'', '"'])?;
    let (prefix, quoted) = raw.split_at(quote_pos);

    let escapes = match prefix {
        "" | "N" | "n" => backslash_escapes,
        "E" | "e" => true,
        p if p.starts_with('_') && p[1..].chars().all(|c| c.is_ascii_alphanumeric()) => {
            backslash_escapes
        }
        _ => return None,
    };

    let mut chars = quoted.chars();
    let quote = chars.next()?;
    if quote == '"' && !backslash_escapes {
        return None;
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == quote {
            match chars.clone().next() {
                Some(next) if next == quote => {
                    chars.next();
                    value.push(quote);
                }
                // 終端のクォートの後に文字が残っていれば単一リテラルではない
                Some(_) => return None,
                None => return Some(value),
            }
        } else if c == '\\' && escapes {
            let escaped = chars.next()?;
            value.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                other => other,
            });
        } else {
            value.push(c);
        }
    }
    None
}
