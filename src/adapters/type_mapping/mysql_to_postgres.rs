// MySQL → PostgreSQL 型マッピング
//
// `tinyint(1)` の真偽値判定と ENUM / SET の展開はジェネレーター側で扱います。

use super::MappedType;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 変換テーブル（キーは正規化済みの小文字型名、UNSIGNED は `"<型> unsigned"`）
static TABLE: &[(&str, MappedType)] = &[
    // 整数（表示幅は引き継がない）
    ("tinyint", MappedType::fixed("SMALLINT")),
    ("smallint", MappedType::fixed("SMALLINT")),
    ("mediumint", MappedType::fixed("INTEGER")),
    ("int", MappedType::fixed("INTEGER")),
    ("integer", MappedType::fixed("INTEGER")),
    ("bigint", MappedType::fixed("BIGINT")),
    ("tinyint unsigned", MappedType::fixed("SMALLINT")),
    ("smallint unsigned", MappedType::fixed("INTEGER")),
    ("mediumint unsigned", MappedType::fixed("INTEGER")),
    ("int unsigned", MappedType::fixed("BIGINT")),
    ("integer unsigned", MappedType::fixed("BIGINT")),
    ("bigint unsigned", MappedType::fixed("NUMERIC(20)")),
    ("serial", MappedType::identity("BIGSERIAL")),
    // 数値
    ("decimal", MappedType::keep("NUMERIC")),
    ("numeric", MappedType::keep("NUMERIC")),
    ("dec", MappedType::keep("NUMERIC")),
    ("fixed", MappedType::keep("NUMERIC")),
    ("float", MappedType::fixed("REAL")),
    ("double", MappedType::fixed("DOUBLE PRECISION")),
    ("double precision", MappedType::fixed("DOUBLE PRECISION")),
    ("real", MappedType::fixed("DOUBLE PRECISION")),
    ("bit", MappedType::keep("BIT")),
    // 真偽値
    ("bool", MappedType::fixed("BOOLEAN")),
    ("boolean", MappedType::fixed("BOOLEAN")),
    // 文字列
    ("char", MappedType::keep("CHAR")),
    ("varchar", MappedType::keep_or("VARCHAR", "255")),
    ("tinytext", MappedType::fixed("TEXT")),
    ("text", MappedType::fixed("TEXT")),
    ("mediumtext", MappedType::fixed("TEXT")),
    ("longtext", MappedType::fixed("TEXT")),
    ("enum", MappedType::fixed("VARCHAR")),
    ("set", MappedType::fixed("TEXT")),
    // バイナリ
    ("binary", MappedType::fixed("BYTEA")),
    ("varbinary", MappedType::fixed("BYTEA")),
    ("tinyblob", MappedType::fixed("BYTEA")),
    ("blob", MappedType::fixed("BYTEA")),
    ("mediumblob", MappedType::fixed("BYTEA")),
    ("longblob", MappedType::fixed("BYTEA")),
    // 日付・時刻
    ("date", MappedType::fixed("DATE")),
    ("time", MappedType::keep("TIME")),
    ("datetime", MappedType::keep("TIMESTAMP")),
    ("timestamp", MappedType::keep("TIMESTAMP")),
    ("year", MappedType::fixed("SMALLINT")),
    // JSON
    ("json", MappedType::fixed("JSONB")),
];

static INDEX: LazyLock<HashMap<&'static str, MappedType>> =
    LazyLock::new(|| TABLE.iter().copied().collect());

/// MySQLの型名からPostgreSQLの型を検索
pub(super) fn lookup(raw_type: &str) -> Option<MappedType> {
    INDEX.get(raw_type).copied()
}

/// 全キー（宣言順）
pub(super) fn keys() -> Vec<&'static str> {
    TABLE.iter().map(|(key, _)| *key).collect()
}
