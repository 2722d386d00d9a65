// MySQL → PostgreSQL DDLジェネレーター
//
// MySQL系の方言で解析したテーブル記述子から PostgreSQL の CREATE TABLE 文を生成します。
// AUTO_INCREMENT は SERIAL 系の型に、TINYINT(1) は BOOLEAN に、ENUM は VARCHAR + CHECK に変換します。
// カラムコメントは COMMENT ON 文として出力します。

use super::{render_create_table, DdlGenerator, DefaultValue, GeneratedDdl};
use crate::adapters::sql_quote::{
    quote_columns_postgres, quote_identifier_postgres, quote_identifier_postgres_if_needed,
    quote_literal_postgres,
};
use crate::adapters::type_mapping::{lookup_ddl_type, TypeFamily};
use crate::core::config::{ConversionDirection, DdlOptions, Dialect};
use crate::core::schema::{Column, TableDescriptor};
use tracing::debug;

/// MySQL → PostgreSQL ジェネレーター
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlToPostgresGenerator;

/// 変換後のカラム型
struct ColumnType {
    sql: String,
    serial: bool,
    boolean: bool,
}

impl DdlGenerator for MysqlToPostgresGenerator {
    fn direction(&self) -> ConversionDirection {
        ConversionDirection::MysqlToPg
    }

    fn generate(&self, table: &TableDescriptor, options: &DdlOptions) -> GeneratedDdl {
        let mut warnings = Vec::new();
        let primary_keys = table.distinct_primary_keys();

        // 主キーが自動増分カラム1つだけの場合はカラム定義に PRIMARY KEY を付与する
        let inline_primary_key = match primary_keys.as_slice() {
            [only] => table
                .get_column(only)
                .filter(|c| c.auto_increment)
                .map(|c| c.name.as_str()),
            _ => None,
        };

        let mut definitions: Vec<String> = table
            .columns
            .iter()
            .map(|column| {
                let inline_pk = inline_primary_key == Some(column.name.as_str());
                self.column_definition(column, inline_pk, &mut warnings)
            })
            .collect();

        let remaining_keys: Vec<&str> = primary_keys
            .iter()
            .copied()
            .filter(|pk| Some(*pk) != inline_primary_key)
            .collect();
        if !remaining_keys.is_empty() {
            definitions.push(format!(
                "PRIMARY KEY ({})",
                quote_columns_postgres(&remaining_keys)
            ));
        }

        for group in &table.unique_keys {
            if group.iter().map(String::as_str).eq(primary_keys.iter().copied()) {
                continue;
            }
            definitions.push(format!("UNIQUE ({})", quote_columns_postgres(group)));
        }

        let table_name = quote_identifier_postgres_if_needed(&table.table_name);
        let mut statements = vec![render_create_table(&table_name, &definitions, "")];

        if options.generate_comment_on {
            statements.extend(comment_statements(table));
        }

        debug!(table = %table.table_name, warnings = warnings.len(), "generated PostgreSQL DDL");
        GeneratedDdl {
            sql: statements.join("\n"),
            warnings,
        }
    }
}

impl MysqlToPostgresGenerator {
    /// カラム定義行を生成
    fn column_definition(
        &self,
        column: &Column,
        inline_pk: bool,
        warnings: &mut Vec<String>,
    ) -> String {
        let column_type = self.column_type(column, warnings);
        let mut parts = vec![
            quote_identifier_postgres_if_needed(&column.name),
            column_type.sql.clone(),
        ];

        if inline_pk {
            parts.push("PRIMARY KEY".to_string());
        } else if column.not_null && !column_type.serial {
            parts.push("NOT NULL".to_string());
        }

        if !column_type.serial {
            if let Some(default) = self.default_clause(column, &column_type, warnings) {
                parts.push(format!("DEFAULT {}", default));
            }
        }

        if column.raw_type == "enum" && !column.enum_values.is_empty() {
            let members = column
                .enum_values
                .iter()
                .map(|v| quote_literal_postgres(v))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!(
                "CHECK ({} IN ({}))",
                quote_identifier_postgres_if_needed(&column.name),
                members
            ));
        }

        parts.join(" ")
    }

    /// カラム型を決定
    fn column_type(&self, column: &Column, warnings: &mut Vec<String>) -> ColumnType {
        if column.is_tinyint_bool() {
            return ColumnType {
                sql: "BOOLEAN".to_string(),
                serial: false,
                boolean: true,
            };
        }

        let sql = match column.raw_type.as_str() {
            "enum" => {
                let width = column
                    .enum_values
                    .iter()
                    .map(|v| v.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(1);
                format!("VARCHAR({})", width)
            }
            "set" => {
                warnings.push(format!(
                    "Column '{}': SET type was converted to TEXT; allowed members are not enforced",
                    column.name
                ));
                "TEXT".to_string()
            }
            _ => match lookup_ddl_type(ConversionDirection::MysqlToPg, column) {
                Some(mapped) => mapped.render(column),
                None => {
                    warnings.push(format!(
                        "Unrecognized type '{}' on column '{}' was copied verbatim",
                        column.raw_type.to_uppercase(),
                        column.name
                    ));
                    format!(
                        "{}{}",
                        column.raw_type.to_uppercase(),
                        column.type_params().unwrap_or_default()
                    )
                }
            },
        };

        if !column.auto_increment {
            let boolean = sql == "BOOLEAN";
            return ColumnType {
                sql,
                serial: false,
                boolean,
            };
        }

        let serial = match sql.as_str() {
            "BIGINT" | "NUMERIC(20)" | "BIGSERIAL" => Some("BIGSERIAL"),
            "SMALLINT" => Some("SMALLSERIAL"),
            "INTEGER" => Some("SERIAL"),
            _ => None,
        };
        match serial {
            Some(serial) => ColumnType {
                sql: serial.to_string(),
                serial: true,
                boolean: false,
            },
            None => {
                warnings.push(format!(
                    "Column '{}': AUTO_INCREMENT on type {} has no SERIAL equivalent and was dropped",
                    column.name, sql
                ));
                ColumnType {
                    sql,
                    serial: false,
                    boolean: false,
                }
            }
        }
    }

    /// DEFAULT 句の値を生成
    fn default_clause(
        &self,
        column: &Column,
        column_type: &ColumnType,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        let raw = column.default_value.as_deref()?;
        let value = DefaultValue::classify(raw, Dialect::MySQL);

        if column_type.boolean {
            if let Some(b) = value.as_bool() {
                return Some(if b { "TRUE" } else { "FALSE" }.to_string());
            }
        }

        let rendered = match value {
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Bool(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
            DefaultValue::Number(n) => n,
            DefaultValue::String(s) => {
                let temporal = TypeFamily::of(column).is_some_and(|f| f.is_temporal());
                if temporal && super::is_zero_date(&s) {
                    warnings.push(format!(
                        "Column '{}': zero-date default '{}' is not valid in PostgreSQL and was dropped",
                        column.name, s
                    ));
                    return None;
                }
                quote_literal_postgres(&s)
            }
            DefaultValue::CurrentTimestamp(precision) => {
                DefaultValue::current_timestamp_sql(&precision)
            }
            DefaultValue::CurrentDate => "CURRENT_DATE".to_string(),
            DefaultValue::Function(f) => f,
            DefaultValue::Expression(e) => e,
        };
        Some(rendered)
    }
}

/// COMMENT ON 文を生成
fn comment_statements(table: &TableDescriptor) -> Vec<String> {
    let table_name = quote_identifier_postgres(&table.table_name);
    let mut statements = Vec::new();

    if let Some(comment) = table.comment() {
        statements.push(format!(
            "COMMENT ON TABLE {} IS {};",
            table_name,
            quote_literal_postgres(comment)
        ));
    }

    for column in &table.columns {
        if let Some(comment) = table.comment_for(column) {
            statements.push(format!(
                "COMMENT ON COLUMN {}.{} IS {};",
                table_name,
                quote_identifier_postgres(&column.name),
                quote_literal_postgres(comment)
            ));
        }
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> TableDescriptor {
        let mut table = TableDescriptor::new(Dialect::MySQL, "users".to_string());
        table
            .columns
            .push(Column::new("id".to_string(), "bigint".to_string()).auto_increment());
        table.columns.push(
            Column::new("name".to_string(), "varchar".to_string())
                .with_params(Some("100"), None)
                .not_null()
                .with_comment("用户名"),
        );
        table.columns.push(
            Column::new("active".to_string(), "tinyint".to_string())
                .with_params(Some("1"), None)
                .with_default("1"),
        );
        table.primary_keys.push("id".to_string());
        table.table_comment = "用户表".to_string();
        table
    }

    #[test]
    fn test_generate_users_table() {
        let result = MysqlToPostgresGenerator.generate(&users_table(), &DdlOptions::default());

        let expected = "CREATE TABLE users (\n    id BIGSERIAL PRIMARY KEY,\n    name VARCHAR(100) NOT NULL,\n    active BOOLEAN DEFAULT TRUE\n);\nCOMMENT ON TABLE \"users\" IS '用户表';\nCOMMENT ON COLUMN \"users\".\"name\" IS '用户名';";
        assert_eq!(result.sql, expected);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_comment_on_disabled() {
        let options = DdlOptions {
            generate_comment_on: false,
            ..Default::default()
        };
        let result = MysqlToPostgresGenerator.generate(&users_table(), &options);
        assert!(!result.sql.contains("COMMENT ON"));
    }

    #[test]
    fn test_composite_primary_key_is_not_inlined() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "user_roles".to_string());
        table.columns.push(Column::new("user_id".to_string(), "int".to_string()).not_null());
        table.columns.push(Column::new("role_id".to_string(), "int".to_string()).not_null());
        table.primary_keys = vec!["user_id".to_string(), "role_id".to_string()];

        let result = MysqlToPostgresGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("user_id INTEGER NOT NULL,"));
        assert!(result.sql.contains("PRIMARY KEY (user_id, role_id)"));
    }

    #[test]
    fn test_enum_becomes_varchar_with_check() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "t".to_string());
        let mut status = Column::new("status".to_string(), "enum".to_string())
            .not_null()
            .with_default("'draft'");
        status.enum_values = vec!["draft".to_string(), "published".to_string()];
        table.columns.push(status);

        let result = MysqlToPostgresGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains(
            "status VARCHAR(9) NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'published'))"
        ));
    }

    #[test]
    fn test_zero_date_default_dropped() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "t".to_string());
        table.columns.push(
            Column::new("created".to_string(), "datetime".to_string())
                .not_null()
                .with_default("'0000-00-00 00:00:00'"),
        );

        let result = MysqlToPostgresGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("created TIMESTAMP NOT NULL\n"));
        assert!(result.warnings.iter().any(|w| w.contains("zero-date")));
    }

    #[test]
    fn test_unsigned_and_string_escaping() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "t".to_string());
        let mut counter = Column::new("hits".to_string(), "int".to_string()).with_default("0");
        counter.unsigned = true;
        table.columns.push(counter);
        table.columns.push(
            Column::new("note".to_string(), "varchar".to_string())
                .with_params(Some("20"), None)
                .with_default(r"'it\'s'"),
        );

        let result = MysqlToPostgresGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("hits BIGINT DEFAULT 0"));
        assert!(result.sql.contains("note VARCHAR(20) DEFAULT 'it''s'"));
    }
}
