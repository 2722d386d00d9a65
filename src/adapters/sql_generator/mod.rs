// SQL生成アダプター
//
// TableDescriptor から変換先方言の CREATE TABLE 文を生成するアダプター層。
// 方向ごとのジェネレーターは DdlGenerator トレイトを実装します。
// デフォルト値の分類など、両方向で共通の処理もここに置きます。

pub mod mysql;
pub mod postgres;

pub use mysql::PostgresToMysqlGenerator;
pub use postgres::MysqlToPostgresGenerator;

use crate::adapters::sql_quote::decode_string_literal;
use crate::core::config::{ConversionDirection, DdlOptions, Dialect};
use crate::core::schema::TableDescriptor;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// DDL生成結果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GeneratedDdl {
    /// 生成されたSQL
    pub sql: String,
    /// 生成時の警告
    pub warnings: Vec<String>,
}

/// DDLジェネレータートレイト
///
/// 変換方向ごとのジェネレーターが実装すべきインターフェース。
pub trait DdlGenerator {
    /// 変換方向
    fn direction(&self) -> ConversionDirection;

    /// CREATE TABLE文を生成
    ///
    /// # Arguments
    ///
    /// * `table` - 変換元のテーブル記述子
    /// * `options` - 生成オプション
    ///
    /// # Returns
    ///
    /// 生成されたSQLと警告
    fn generate(&self, table: &TableDescriptor, options: &DdlOptions) -> GeneratedDdl;
}

/// 変換方向に対応するジェネレーターを取得
pub fn generator_for(direction: ConversionDirection) -> Box<dyn DdlGenerator> {
    match direction {
        ConversionDirection::PgToMysql => Box::new(PostgresToMysqlGenerator),
        ConversionDirection::MysqlToPg => Box::new(MysqlToPostgresGenerator),
    }
}

/// 分類済みのデフォルト値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// `NULL`
    Null,
    /// `TRUE` / `FALSE`
    Bool(bool),
    /// 数値リテラル
    Number(String),
    /// 文字列リテラル（デコード済み）
    String(String),
    /// 現在時刻系（`CURRENT_TIMESTAMP`、`NOW()` など）。精度指定を保持
    CurrentTimestamp(Option<String>),
    /// `CURRENT_DATE`
    CurrentDate,
    /// 上記以外の関数呼び出し
    Function(String),
    /// その他の式（元テキストのまま）
    Expression(String),
}

static NUMBER_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").ok());

static CURRENT_TIMESTAMP_CALL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(current_timestamp|localtimestamp|now|transaction_timestamp|statement_timestamp|clock_timestamp|sysdate|utc_timestamp)\s*(\(\s*(\d*)\s*\))?$").ok()
});

static FUNCTION_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*\s*\(").ok());

impl DefaultValue {
    /// デフォルト値の元テキストを分類
    ///
    /// # Arguments
    /// * `raw` - パーサーが保持した元テキスト
    /// * `source` - 変換元の方言（文字列のエスケープ規則に使用）
    pub fn classify(raw: &str, source: Dialect) -> DefaultValue {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();

        if lower == "null" {
            return DefaultValue::Null;
        }
        if lower == "true" {
            return DefaultValue::Bool(true);
        }
        if lower == "false" {
            return DefaultValue::Bool(false);
        }
        if lower == "current_date" || lower == "curdate()" {
            return DefaultValue::CurrentDate;
        }
        if matches_pattern(&NUMBER_LITERAL, raw) {
            return DefaultValue::Number(raw.to_string());
        }
        if let Some(value) = decode_string_literal(raw, source == Dialect::MySQL) {
            return DefaultValue::String(value);
        }
        if let Some(caps) = CURRENT_TIMESTAMP_CALL
            .as_ref()
            .and_then(|re| re.captures(raw))
        {
            let precision = caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .filter(|p| !p.is_empty());
            return DefaultValue::CurrentTimestamp(precision);
        }
        if matches_pattern(&FUNCTION_CALL, raw) {
            return DefaultValue::Function(raw.to_string());
        }
        DefaultValue::Expression(raw.to_string())
    }

    /// 真偽値として解釈できる場合はその値
    ///
    /// `0` / `1`、`'0'` / `'1'`、`'t'` / `'f'`、`'true'` / `'false'` を受け付けます。
    pub fn as_bool(&self) -> Option<bool> {
        let text = match self {
            DefaultValue::Bool(b) => return Some(*b),
            DefaultValue::Number(n) => n.as_str(),
            DefaultValue::String(s) => s.as_str(),
            _ => return None,
        };
        match text.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
            "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// `CURRENT_TIMESTAMP[(n)]` 形式で出力
    pub fn current_timestamp_sql(precision: &Option<String>) -> String {
        match precision {
            Some(p) => format!("CURRENT_TIMESTAMP({})", p),
            None => "CURRENT_TIMESTAMP".to_string(),
        }
    }
}

fn matches_pattern(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// MySQLのゼロ日付（`0000-00-00`）かどうか
pub fn is_zero_date(value: &str) -> bool {
    value.starts_with("0000-00-00")
}

/// 生成SQLを組み立てる
///
/// カラム・制約行をインデントして CREATE TABLE 文にまとめます。
pub(crate) fn render_create_table(
    table_name: &str,
    definitions: &[String],
    table_suffix: &str,
) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", table_name);
    let body = definitions
        .iter()
        .map(|d| format!("    {}", d))
        .collect::<Vec<_>>()
        .join(",\n");
    sql.push_str(&body);
    sql.push_str("\n)");
    sql.push_str(table_suffix);
    sql.push(';');
    sql
}
