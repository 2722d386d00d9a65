// 言語別型マッパー
//
// 型ファミリーから Go / Java / TypeScript / Python の型名を決定します。
// 型が必要とするimport（パッケージ・モジュール）もあわせて返します。

use super::{split_array_suffix, TypeFamily};
use crate::core::schema::Column;

/// 言語側の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageType {
    /// 型名
    pub name: &'static str,
    /// 型が必要とするimport
    pub import: Option<&'static str>,
}

impl LanguageType {
    const fn plain(name: &'static str) -> Self {
        Self { name, import: None }
    }

    const fn imported(name: &'static str, import: &'static str) -> Self {
        Self {
            name,
            import: Some(import),
        }
    }
}

/// カラムに対して解決された言語側の型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// 型名（配列の場合は要素型を包んだ形）
    pub name: String,
    /// 必要なimport
    pub imports: Vec<&'static str>,
    /// 分類結果（Noneの場合はフォールバック型）
    pub family: Option<TypeFamily>,
}

impl ResolvedType {
    /// フォールバック型が使用されたか
    pub fn is_fallback(&self) -> bool {
        self.family.is_none()
    }
}

/// 言語別型マッピング
///
/// 各言語のジェネレーターが実装を切り替えるためのトレイト。
pub trait LanguageTypeMapper {
    /// 型ファミリーに対応する型
    fn map_family(&self, family: TypeFamily) -> LanguageType;

    /// 未知の型に使用するフォールバック型
    fn fallback(&self) -> LanguageType;

    /// 配列型の表記
    fn array_of(&self, element: &str) -> String;

    /// 配列型が必要とするimport
    fn array_import(&self) -> Option<&'static str> {
        None
    }

    /// カラムの型を解決
    fn resolve(&self, column: &Column) -> ResolvedType {
        let family = TypeFamily::of(column);
        let base = match family {
            Some(family) => self.map_family(family),
            None => self.fallback(),
        };

        let mut imports: Vec<&'static str> = base.import.into_iter().collect();
        let mut name = base.name.to_string();
        let (_, dimensions) = split_array_suffix(&column.raw_type);
        for _ in 0..dimensions {
            name = self.array_of(&name);
        }
        if dimensions > 0 {
            imports.extend(self.array_import());
        }

        ResolvedType {
            name,
            imports,
            family,
        }
    }
}

/// Go用型マッパー
pub struct GoTypeMapper;

impl LanguageTypeMapper for GoTypeMapper {
    fn map_family(&self, family: TypeFamily) -> LanguageType {
        match family {
            TypeFamily::Boolean => LanguageType::plain("bool"),
            TypeFamily::TinyInt => LanguageType::plain("int8"),
            TypeFamily::SmallInt => LanguageType::plain("int16"),
            TypeFamily::Integer => LanguageType::plain("int32"),
            TypeFamily::BigInt => LanguageType::plain("int64"),
            TypeFamily::Decimal | TypeFamily::Double => LanguageType::plain("float64"),
            TypeFamily::Float => LanguageType::plain("float32"),
            TypeFamily::String | TypeFamily::Uuid | TypeFamily::Json => {
                LanguageType::plain("string")
            }
            TypeFamily::Date | TypeFamily::Time | TypeFamily::DateTime => {
                LanguageType::imported("time.Time", "time")
            }
            TypeFamily::Binary => LanguageType::plain("[]byte"),
        }
    }

    fn fallback(&self) -> LanguageType {
        LanguageType::plain("string")
    }

    fn array_of(&self, element: &str) -> String {
        format!("[]{}", element)
    }
}

/// Java用型マッパー
///
/// nullを表現できるようにプリミティブではなくボックス型を使用します。
pub struct JavaTypeMapper;

impl LanguageTypeMapper for JavaTypeMapper {
    fn map_family(&self, family: TypeFamily) -> LanguageType {
        match family {
            TypeFamily::Boolean => LanguageType::plain("Boolean"),
            TypeFamily::TinyInt | TypeFamily::SmallInt | TypeFamily::Integer => {
                LanguageType::plain("Integer")
            }
            TypeFamily::BigInt => LanguageType::plain("Long"),
            TypeFamily::Decimal => LanguageType::imported("BigDecimal", "java.math.BigDecimal"),
            TypeFamily::Float => LanguageType::plain("Float"),
            TypeFamily::Double => LanguageType::plain("Double"),
            TypeFamily::String | TypeFamily::Json => LanguageType::plain("String"),
            TypeFamily::Uuid => LanguageType::imported("UUID", "java.util.UUID"),
            TypeFamily::Date => LanguageType::imported("LocalDate", "java.time.LocalDate"),
            TypeFamily::Time => LanguageType::imported("LocalTime", "java.time.LocalTime"),
            TypeFamily::DateTime => {
                LanguageType::imported("LocalDateTime", "java.time.LocalDateTime")
            }
            TypeFamily::Binary => LanguageType::plain("byte[]"),
        }
    }

    fn fallback(&self) -> LanguageType {
        LanguageType::plain("String")
    }

    fn array_of(&self, element: &str) -> String {
        format!("List<{}>", element)
    }

    fn array_import(&self) -> Option<&'static str> {
        Some("java.util.List")
    }
}

/// TypeScript用型マッパー
pub struct TypeScriptTypeMapper;

impl LanguageTypeMapper for TypeScriptTypeMapper {
    fn map_family(&self, family: TypeFamily) -> LanguageType {
        match family {
            TypeFamily::Boolean => LanguageType::plain("boolean"),
            TypeFamily::TinyInt
            | TypeFamily::SmallInt
            | TypeFamily::Integer
            | TypeFamily::BigInt
            | TypeFamily::Decimal
            | TypeFamily::Float
            | TypeFamily::Double => LanguageType::plain("number"),
            TypeFamily::String | TypeFamily::Uuid | TypeFamily::Time => {
                LanguageType::plain("string")
            }
            TypeFamily::Date | TypeFamily::DateTime => LanguageType::plain("Date"),
            TypeFamily::Json => LanguageType::plain("unknown"),
            TypeFamily::Binary => LanguageType::plain("Uint8Array"),
        }
    }

    fn fallback(&self) -> LanguageType {
        LanguageType::plain("string")
    }

    fn array_of(&self, element: &str) -> String {
        format!("{}[]", element)
    }
}

/// Python用型マッパー
///
/// importは `from <module> import <name>` 形式の文字列で返します。
pub struct PythonTypeMapper;

impl LanguageTypeMapper for PythonTypeMapper {
    fn map_family(&self, family: TypeFamily) -> LanguageType {
        match family {
            TypeFamily::Boolean => LanguageType::plain("bool"),
            TypeFamily::TinyInt | TypeFamily::SmallInt | TypeFamily::Integer | TypeFamily::BigInt => {
                LanguageType::plain("int")
            }
            TypeFamily::Decimal => LanguageType::imported("Decimal", "from decimal import Decimal"),
            TypeFamily::Float | TypeFamily::Double => LanguageType::plain("float"),
            TypeFamily::String => LanguageType::plain("str"),
            TypeFamily::Uuid => LanguageType::imported("UUID", "from uuid import UUID"),
            TypeFamily::Date => LanguageType::imported("date", "from datetime import date"),
            TypeFamily::Time => LanguageType::imported("time", "from datetime import time"),
            TypeFamily::DateTime => {
                LanguageType::imported("datetime", "from datetime import datetime")
            }
            TypeFamily::Json => LanguageType::plain("dict"),
            TypeFamily::Binary => LanguageType::plain("bytes"),
        }
    }

    fn fallback(&self) -> LanguageType {
        LanguageType::plain("str")
    }

    fn array_of(&self, element: &str) -> String {
        format!("list[{}]", element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(raw_type: &str) -> Column {
        Column::new("c".to_string(), raw_type.to_string())
    }

    #[test]
    fn test_go_types() {
        let flag = column("tinyint").with_params(Some("1"), None);
        assert_eq!(GoTypeMapper.resolve(&flag).name, "bool");
        assert_eq!(GoTypeMapper.resolve(&column("bigint")).name, "int64");

        let created = GoTypeMapper.resolve(&column("datetime"));
        assert_eq!(created.name, "time.Time");
        assert_eq!(created.imports, vec!["time"]);
    }

    #[test]
    fn test_java_imports_only_when_needed() {
        assert!(JavaTypeMapper.resolve(&column("varchar")).imports.is_empty());
        assert_eq!(
            JavaTypeMapper.resolve(&column("decimal")).imports,
            vec!["java.math.BigDecimal"]
        );
    }

    #[test]
    fn test_array_types() {
        assert_eq!(TypeScriptTypeMapper.resolve(&column("text[]")).name, "string[]");
        assert_eq!(GoTypeMapper.resolve(&column("integer[]")).name, "[]int32");
        assert_eq!(PythonTypeMapper.resolve(&column("text[][]")).name, "list[list[str]]");

        let tags = JavaTypeMapper.resolve(&column("uuid[]"));
        assert_eq!(tags.name, "List<UUID>");
        assert_eq!(tags.imports, vec!["java.util.UUID", "java.util.List"]);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let mood = column("mood");
        let resolved = PythonTypeMapper.resolve(&mood);
        assert_eq!(resolved.name, "str");
        assert!(resolved.is_fallback());
        assert_eq!(JavaTypeMapper.resolve(&mood).name, "String");
    }
}
