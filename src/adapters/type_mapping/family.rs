// SQL型の分類
//
// 両方言の型名を言語非依存の型ファミリーに分類します。
// 言語ごとの型マッパーはこの分類を入力として型名を決定します。

use super::split_array_suffix;
use crate::core::schema::Column;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 型ファミリー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Float,
    Double,
    String,
    Uuid,
    Date,
    Time,
    DateTime,
    Json,
    Binary,
}

static FAMILIES: &[(&str, TypeFamily)] = &[
    ("bool", TypeFamily::Boolean),
    ("boolean", TypeFamily::Boolean),
    ("bit", TypeFamily::Boolean),
    ("tinyint", TypeFamily::TinyInt),
    ("smallint", TypeFamily::SmallInt),
    ("int2", TypeFamily::SmallInt),
    ("smallserial", TypeFamily::SmallInt),
    ("serial2", TypeFamily::SmallInt),
    ("year", TypeFamily::SmallInt),
    ("mediumint", TypeFamily::Integer),
    ("int", TypeFamily::Integer),
    ("integer", TypeFamily::Integer),
    ("int4", TypeFamily::Integer),
    ("serial", TypeFamily::Integer),
    ("serial4", TypeFamily::Integer),
    ("bigint", TypeFamily::BigInt),
    ("int8", TypeFamily::BigInt),
    ("bigserial", TypeFamily::BigInt),
    ("serial8", TypeFamily::BigInt),
    ("decimal", TypeFamily::Decimal),
    ("numeric", TypeFamily::Decimal),
    ("dec", TypeFamily::Decimal),
    ("fixed", TypeFamily::Decimal),
    ("money", TypeFamily::Decimal),
    ("float", TypeFamily::Float),
    ("real", TypeFamily::Float),
    ("float4", TypeFamily::Float),
    ("double", TypeFamily::Double),
    ("double precision", TypeFamily::Double),
    ("float8", TypeFamily::Double),
    ("char", TypeFamily::String),
    ("bpchar", TypeFamily::String),
    ("varchar", TypeFamily::String),
    ("tinytext", TypeFamily::String),
    ("text", TypeFamily::String),
    ("mediumtext", TypeFamily::String),
    ("longtext", TypeFamily::String),
    ("citext", TypeFamily::String),
    ("enum", TypeFamily::String),
    ("set", TypeFamily::String),
    ("inet", TypeFamily::String),
    ("cidr", TypeFamily::String),
    ("macaddr", TypeFamily::String),
    ("interval", TypeFamily::String),
    ("xml", TypeFamily::String),
    ("tsvector", TypeFamily::String),
    ("uuid", TypeFamily::Uuid),
    ("date", TypeFamily::Date),
    ("time", TypeFamily::Time),
    ("timetz", TypeFamily::Time),
    ("datetime", TypeFamily::DateTime),
    ("timestamp", TypeFamily::DateTime),
    ("timestamptz", TypeFamily::DateTime),
    ("json", TypeFamily::Json),
    ("jsonb", TypeFamily::Json),
    ("binary", TypeFamily::Binary),
    ("varbinary", TypeFamily::Binary),
    ("tinyblob", TypeFamily::Binary),
    ("blob", TypeFamily::Binary),
    ("mediumblob", TypeFamily::Binary),
    ("longblob", TypeFamily::Binary),
    ("bytea", TypeFamily::Binary),
    ("varbit", TypeFamily::Binary),
];

static INDEX: LazyLock<HashMap<&'static str, TypeFamily>> =
    LazyLock::new(|| FAMILIES.iter().copied().collect());

impl TypeFamily {
    /// 型名から分類を検索（配列サフィックスは無視）
    pub fn lookup(raw_type: &str) -> Option<TypeFamily> {
        let (base, _) = split_array_suffix(raw_type);
        INDEX.get(base).copied()
    }

    /// カラムの分類
    ///
    /// `TINYINT(1)` は真偽値として扱い、UNSIGNED の整数は1段階広い型に昇格します。
    pub fn of(column: &Column) -> Option<TypeFamily> {
        if column.is_tinyint_bool() {
            return Some(TypeFamily::Boolean);
        }
        if column.raw_type == "bit" && column.length.as_deref().is_some_and(|l| l != "1") {
            return Some(TypeFamily::Binary);
        }

        let family = Self::lookup(&column.raw_type)?;
        if !column.unsigned {
            return Some(family);
        }
        Some(match family {
            TypeFamily::TinyInt => TypeFamily::SmallInt,
            TypeFamily::SmallInt => TypeFamily::Integer,
            TypeFamily::Integer => TypeFamily::BigInt,
            other => other,
        })
    }

    /// 日付・時刻系かどうか
    pub fn is_temporal(&self) -> bool {
        matches!(self, TypeFamily::Date | TypeFamily::Time | TypeFamily::DateTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(raw_type: &str) -> Column {
        Column::new("c".to_string(), raw_type.to_string())
    }

    #[test]
    fn test_lookup() {
        assert_eq!(TypeFamily::lookup("bigserial"), Some(TypeFamily::BigInt));
        assert_eq!(TypeFamily::lookup("timestamptz"), Some(TypeFamily::DateTime));
        assert_eq!(TypeFamily::lookup("text[]"), Some(TypeFamily::String));
        assert_eq!(TypeFamily::lookup("mood"), None);
    }

    #[test]
    fn test_tinyint_one_is_boolean() {
        let flag = column("tinyint").with_params(Some("1"), None);
        assert_eq!(TypeFamily::of(&flag), Some(TypeFamily::Boolean));

        let small = column("tinyint").with_params(Some("4"), None);
        assert_eq!(TypeFamily::of(&small), Some(TypeFamily::TinyInt));
    }

    #[test]
    fn test_unsigned_promotion() {
        let mut id = column("int");
        id.unsigned = true;
        assert_eq!(TypeFamily::of(&id), Some(TypeFamily::BigInt));
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(TypeFamily::of(&column("bit")), Some(TypeFamily::Boolean));
        let mask = column("bit").with_params(Some("8"), None);
        assert_eq!(TypeFamily::of(&mask), Some(TypeFamily::Binary));
    }
}
