// PostgreSQL → MySQL 型マッピング

use super::MappedType;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 変換テーブル（キーは正規化済みの小文字型名）
static TABLE: &[(&str, MappedType)] = &[
    // 整数
    ("smallint", MappedType::fixed("SMALLINT")),
    ("int2", MappedType::fixed("SMALLINT")),
    ("integer", MappedType::fixed("INT")),
    ("int", MappedType::fixed("INT")),
    ("int4", MappedType::fixed("INT")),
    ("bigint", MappedType::fixed("BIGINT")),
    ("int8", MappedType::fixed("BIGINT")),
    // SERIAL系
    ("smallserial", MappedType::identity("SMALLINT")),
    ("serial2", MappedType::identity("SMALLINT")),
    ("serial", MappedType::identity("INT")),
    ("serial4", MappedType::identity("INT")),
    ("bigserial", MappedType::identity("BIGINT")),
    ("serial8", MappedType::identity("BIGINT")),
    // 数値
    ("numeric", MappedType::keep("DECIMAL")),
    ("decimal", MappedType::keep("DECIMAL")),
    ("real", MappedType::fixed("FLOAT")),
    ("float4", MappedType::fixed("FLOAT")),
    ("double precision", MappedType::fixed("DOUBLE")),
    ("float8", MappedType::fixed("DOUBLE")),
    ("float", MappedType::fixed("DOUBLE")),
    ("money", MappedType::fixed("DECIMAL(19,2)")),
    // 真偽値
    ("boolean", MappedType::fixed("TINYINT(1)")),
    ("bool", MappedType::fixed("TINYINT(1)")),
    // 文字列
    ("varchar", MappedType::keep_or("VARCHAR", "255")),
    ("char", MappedType::keep("CHAR")),
    ("bpchar", MappedType::keep("CHAR")),
    ("text", MappedType::fixed("LONGTEXT")),
    ("citext", MappedType::fixed("LONGTEXT")),
    ("xml", MappedType::fixed("LONGTEXT")),
    ("tsvector", MappedType::fixed("LONGTEXT")),
    ("uuid", MappedType::fixed("CHAR(36)")),
    ("inet", MappedType::fixed("VARCHAR(45)")),
    ("cidr", MappedType::fixed("VARCHAR(45)")),
    ("macaddr", MappedType::fixed("VARCHAR(17)")),
    ("interval", MappedType::fixed("VARCHAR(64)")),
    // 日付・時刻
    ("date", MappedType::fixed("DATE")),
    ("time", MappedType::keep("TIME")),
    ("timetz", MappedType::keep("TIME")),
    ("timestamp", MappedType::keep("DATETIME")),
    ("timestamptz", MappedType::keep("TIMESTAMP")),
    // バイナリ
    ("bytea", MappedType::fixed("LONGBLOB")),
    ("bit", MappedType::keep("BIT")),
    ("varbit", MappedType::keep("BIT")),
    // JSON
    ("json", MappedType::fixed("JSON")),
    ("jsonb", MappedType::fixed("JSON")),
];

static INDEX: LazyLock<HashMap<&'static str, MappedType>> =
    LazyLock::new(|| TABLE.iter().copied().collect());

/// PostgreSQLの型名からMySQLの型を検索
pub(super) fn lookup(raw_type: &str) -> Option<MappedType> {
    INDEX.get(raw_type).copied()
}

/// 全キー（宣言順）
pub(super) fn keys() -> Vec<&'static str> {
    TABLE.iter().map(|(key, _)| *key).collect()
}
