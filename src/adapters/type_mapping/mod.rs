// 型マッピングサービス
//
// DDL方言間（PostgreSQL ⇔ MySQL）と、SQL型 → 各言語の型の変換テーブルを提供します。
// テーブルはすべて読み取り専用の静的データで、初回参照時に一度だけ索引を構築します。
// 未知の型はエラーにせず None を返し、呼び出し側がフォールバックと警告を決定します。

mod family;
mod language;
mod mysql_to_postgres;
mod postgres_to_mysql;

pub use family::TypeFamily;
pub use language::{
    GoTypeMapper, JavaTypeMapper, LanguageType, LanguageTypeMapper, PythonTypeMapper,
    ResolvedType, TypeScriptTypeMapper,
};

use crate::core::config::{ConversionDirection, Dialect};
use crate::core::schema::Column;

/// 型パラメータの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPolicy {
    /// 元のパラメータをそのまま引き継ぐ
    Keep,
    /// 元のパラメータを引き継ぎ、なければ既定値を付与する
    KeepOr(&'static str),
    /// パラメータを出力しない（型名に固定パラメータを含む場合も含む）
    Drop,
}

/// 変換先の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    /// 変換先の型名（大文字）
    pub name: &'static str,
    /// 型パラメータの扱い
    pub params: ParamPolicy,
    /// 変換先で自動増分として扱うか（PostgreSQLのSERIAL系）
    pub auto_increment: bool,
}

impl MappedType {
    /// パラメータを引き継ぐ型
    pub const fn keep(name: &'static str) -> Self {
        Self {
            name,
            params: ParamPolicy::Keep,
            auto_increment: false,
        }
    }

    /// パラメータを引き継ぎ、未指定時は既定値を使う型
    pub const fn keep_or(name: &'static str, default_params: &'static str) -> Self {
        Self {
            name,
            params: ParamPolicy::KeepOr(default_params),
            auto_increment: false,
        }
    }

    /// パラメータを持たない型
    pub const fn fixed(name: &'static str) -> Self {
        Self {
            name,
            params: ParamPolicy::Drop,
            auto_increment: false,
        }
    }

    /// 自動増分を伴う型
    pub const fn identity(name: &'static str) -> Self {
        Self {
            name,
            params: ParamPolicy::Drop,
            auto_increment: true,
        }
    }

    /// カラムのパラメータを適用して型文字列を生成
    pub fn render(&self, column: &Column) -> String {
        match (self.params, column.type_params()) {
            (ParamPolicy::Keep, Some(params)) | (ParamPolicy::KeepOr(_), Some(params)) => {
                format!("{}{}", self.name, params)
            }
            (ParamPolicy::KeepOr(default_params), None) => {
                format!("{}({})", self.name, default_params)
            }
            _ => self.name.to_string(),
        }
    }

    /// 型名からパラメータ部分を除いた小文字の基本型名
    pub fn base_name(&self) -> String {
        self.name
            .split('(')
            .next()
            .unwrap_or(self.name)
            .trim()
            .to_ascii_lowercase()
    }
}

/// 配列サフィックス `[]` を取り除いた基本型名と配列の次元数
pub fn split_array_suffix(raw_type: &str) -> (&str, usize) {
    let mut base = raw_type.trim_end();
    let mut dimensions = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped.trim_end();
        dimensions += 1;
    }
    (base, dimensions)
}

/// 変換方向に応じたDDL型の検索
///
/// MySQL → PostgreSQL では UNSIGNED 指定に応じて `"int unsigned"` のようなキーを優先します。
pub fn lookup_ddl_type(direction: ConversionDirection, column: &Column) -> Option<MappedType> {
    let (base, _) = split_array_suffix(&column.raw_type);
    match direction {
        ConversionDirection::PgToMysql => postgres_to_mysql::lookup(base),
        ConversionDirection::MysqlToPg => {
            if column.unsigned {
                let unsigned_key = format!("{} unsigned", base);
                if let Some(mapped) = mysql_to_postgres::lookup(&unsigned_key) {
                    return Some(mapped);
                }
            }
            mysql_to_postgres::lookup(base)
        }
    }
}

/// 方言として既知の型かどうか
///
/// パーサーが未知の型に警告を付与するために使用します。
pub fn is_known_sql_type(dialect: Dialect, raw_type: &str) -> bool {
    let (base, _) = split_array_suffix(raw_type);
    match dialect {
        Dialect::PostgreSQL => postgres_to_mysql::lookup(base).is_some(),
        Dialect::MySQL => mysql_to_postgres::lookup(base).is_some(),
    }
}

/// 変換元方言の全型名キー（テスト・診断用）
pub fn known_type_names(direction: ConversionDirection) -> Vec<&'static str> {
    match direction {
        ConversionDirection::PgToMysql => postgres_to_mysql::keys(),
        ConversionDirection::MysqlToPg => mysql_to_postgres::keys(),
    }
}
