// TypeScript エンティティジェネレーター
//
// テーブル記述子から TypeScript のインターフェースを生成します。
// nullable なカラムはオプショナルプロパティ（`?`）として出力します。

use super::{entity_type_name, field_name, is_plain_identifier, resolve_all, string_literal};
use super::{EntityGenerator, GeneratedEntity};
use crate::adapters::type_mapping::TypeScriptTypeMapper;
use crate::core::config::{EntityOptions, TargetKind};
use crate::core::schema::TableDescriptor;

/// プロパティ名としてクォートする予約語
const TS_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
];

/// TypeScript インターフェースジェネレーター
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptGenerator;

impl EntityGenerator for TypeScriptGenerator {
    fn target(&self) -> TargetKind {
        TargetKind::TypeScriptInterface
    }

    fn generate(&self, table: &TableDescriptor, options: &EntityOptions) -> GeneratedEntity {
        let mut warnings = Vec::new();
        let (types, _) = resolve_all(&TypeScriptTypeMapper, table, &mut warnings);
        let interface_name = entity_type_name(table, "T");

        let mut code = String::new();
        if let Some(comment) = table.comment() {
            code.push_str(&format!("/** {} */\n", doc_text(comment)));
        }
        code.push_str(&format!("export interface {} {{\n", interface_name));

        for (column, resolved) in table.columns.iter().zip(&types) {
            if let Some(comment) = table.comment_for(column) {
                code.push_str(&format!("  /** {} */\n", doc_text(comment)));
            }
            let optional = if table.is_optional(column) { "?" } else { "" };
            code.push_str(&format!(
                "  {}{}: {};\n",
                property_name(&field_name(column, options)),
                optional,
                resolved.name
            ));
        }
        code.push_str("}\n");

        GeneratedEntity { code, warnings }
    }
}

/// プロパティ名（識別子として不正な名前と予約語はクォート）
fn property_name(name: &str) -> String {
    if is_plain_identifier(name) && !TS_RESERVED.contains(&name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn doc_text(comment: &str) -> String {
    comment.lines().collect::<Vec<_>>().join(" ").replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Dialect;
    use crate::core::schema::Column;

    #[test]
    fn test_interface_with_optional_fields() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "user_profiles".to_string());
        table
            .columns
            .push(Column::new("id".to_string(), "int".to_string()).not_null());
        table.columns.push(
            Column::new("display_name".to_string(), "varchar".to_string())
                .not_null()
                .with_comment("shown in UI"),
        );
        table
            .columns
            .push(Column::new("birthday".to_string(), "date".to_string()));
        table.primary_keys.push("id".to_string());

        let result = TypeScriptGenerator.generate(&table, &EntityOptions::default());
        let expected = "export interface UserProfiles {\n  id: number;\n  /** shown in UI */\n  displayName: string;\n  birthday?: Date;\n}\n";
        assert_eq!(result.code, expected);
    }

    #[test]
    fn test_snake_case_and_quoted_properties() {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "t".to_string());
        table
            .columns
            .push(Column::new("created_at".to_string(), "timestamptz".to_string()).not_null());
        table
            .columns
            .push(Column::new("default".to_string(), "text".to_string()).not_null());
        table
            .columns
            .push(Column::new("2fa".to_string(), "boolean".to_string()).not_null());

        let options = EntityOptions {
            use_camel_case: false,
            ..Default::default()
        };
        let result = TypeScriptGenerator.generate(&table, &options);
        assert!(result.code.contains("  created_at: Date;\n"));
        assert!(result.code.contains("  \"default\": string;\n"));
        assert!(result.code.contains("  \"2fa\": boolean;\n"));
    }
}
