// PostgreSQL → MySQL DDLジェネレーター
//
// PostgreSQL で解析したテーブル記述子から MySQL の CREATE TABLE 文を生成します。
// SERIAL 系の型は整数型 + AUTO_INCREMENT に、BOOLEAN は TINYINT(1) に変換し、
// コメントはカラム定義およびテーブルオプションにインラインで出力します。

use super::{render_create_table, DdlGenerator, DefaultValue, GeneratedDdl};
use crate::adapters::sql_quote::{quote_columns_mysql, quote_identifier_mysql, quote_literal_mysql};
use crate::adapters::type_mapping::{lookup_ddl_type, split_array_suffix, TypeFamily};
use crate::core::config::{ConversionDirection, DdlOptions, Dialect};
use crate::core::schema::{Column, TableDescriptor};
use tracing::debug;

/// PostgreSQL → MySQL ジェネレーター
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresToMysqlGenerator;

/// 変換後のカラム型
struct ColumnType {
    sql: String,
    auto_increment: bool,
    boolean: bool,
}

impl DdlGenerator for PostgresToMysqlGenerator {
    fn direction(&self) -> ConversionDirection {
        ConversionDirection::PgToMysql
    }

    fn generate(&self, table: &TableDescriptor, options: &DdlOptions) -> GeneratedDdl {
        let mut warnings = Vec::new();
        let mut primary_keys: Vec<String> = table
            .distinct_primary_keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut extra_keys: Vec<String> = Vec::new();

        let mut definitions = Vec::new();
        for column in &table.columns {
            let column_type = self.column_type(column, &mut warnings);

            if column_type.auto_increment && !primary_keys.contains(&column.name) {
                // AUTO_INCREMENT カラムはキーでなければならない
                if table.primary_keys.is_empty() && primary_keys.is_empty() {
                    warnings.push(format!(
                        "Column '{}': AUTO_INCREMENT requires a key; added PRIMARY KEY ({})",
                        column.name, column.name
                    ));
                    primary_keys.push(column.name.clone());
                } else if !table.unique_keys.iter().any(|g| g.first() == Some(&column.name)) {
                    warnings.push(format!(
                        "Column '{}': AUTO_INCREMENT requires a key; added KEY ({})",
                        column.name, column.name
                    ));
                    extra_keys.push(column.name.clone());
                }
            }

            definitions.push(self.column_definition(table, column, &column_type, &mut warnings));
        }

        if !primary_keys.is_empty() {
            definitions.push(format!("PRIMARY KEY ({})", quote_columns_mysql(&primary_keys)));
        }
        for group in &table.unique_keys {
            if *group == primary_keys {
                continue;
            }
            definitions.push(format!("UNIQUE KEY ({})", quote_columns_mysql(group)));
        }
        for column in &extra_keys {
            definitions.push(format!("KEY ({})", quote_identifier_mysql(column)));
        }

        let mut suffix = String::new();
        if options.add_table_options {
            suffix.push_str(" ENGINE=InnoDB DEFAULT CHARSET=utf8mb4");
        }
        if let Some(comment) = table.comment() {
            suffix.push_str(&format!(" COMMENT={}", quote_literal_mysql(comment)));
        }

        let sql = render_create_table(&quote_identifier_mysql(&table.table_name), &definitions, &suffix);
        debug!(table = %table.table_name, warnings = warnings.len(), "generated MySQL DDL");
        GeneratedDdl { sql, warnings }
    }
}

impl PostgresToMysqlGenerator {
    /// カラム定義行を生成
    fn column_definition(
        &self,
        table: &TableDescriptor,
        column: &Column,
        column_type: &ColumnType,
        warnings: &mut Vec<String>,
    ) -> String {
        let mut parts = vec![quote_identifier_mysql(&column.name), column_type.sql.clone()];

        if column.not_null || column_type.auto_increment {
            parts.push("NOT NULL".to_string());
        }
        if column_type.auto_increment {
            parts.push("AUTO_INCREMENT".to_string());
        } else if let Some(default) = self.default_clause(column, column_type, warnings) {
            parts.push(format!("DEFAULT {}", default));
        }
        if let Some(comment) = table.comment_for(column) {
            parts.push(format!("COMMENT {}", quote_literal_mysql(comment)));
        }

        parts.join(" ")
    }

    /// カラム型を決定
    fn column_type(&self, column: &Column, warnings: &mut Vec<String>) -> ColumnType {
        let (base, dimensions) = split_array_suffix(&column.raw_type);
        if dimensions > 0 {
            warnings.push(format!(
                "Column '{}': array type {} was converted to JSON",
                column.name,
                column.raw_type.to_uppercase()
            ));
            return ColumnType {
                sql: "JSON".to_string(),
                auto_increment: false,
                boolean: false,
            };
        }

        match lookup_ddl_type(ConversionDirection::PgToMysql, column) {
            Some(mapped) => {
                let sql = mapped.render(column);
                ColumnType {
                    boolean: sql == "TINYINT(1)",
                    auto_increment: mapped.auto_increment || column.auto_increment,
                    sql,
                }
            }
            None => {
                warnings.push(format!(
                    "Unrecognized type '{}' on column '{}' was copied verbatim",
                    base.to_uppercase(),
                    column.name
                ));
                ColumnType {
                    sql: format!(
                        "{}{}",
                        base.to_uppercase(),
                        column.type_params().unwrap_or_default()
                    ),
                    auto_increment: column.auto_increment,
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
        let value = DefaultValue::classify(raw, Dialect::PostgreSQL);

        if column_type.boolean {
            if let Some(b) = value.as_bool() {
                return Some(if b { "1" } else { "0" }.to_string());
            }
        }

        let rendered = match value {
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Bool(b) => if b { "1" } else { "0" }.to_string(),
            DefaultValue::Number(n) => n,
            DefaultValue::String(s) => quote_literal_mysql(&s),
            DefaultValue::CurrentTimestamp(precision) => {
                DefaultValue::current_timestamp_sql(&precision)
            }
            DefaultValue::CurrentDate => {
                let is_date = TypeFamily::of(column) == Some(TypeFamily::Date);
                if is_date {
                    "(CURRENT_DATE)".to_string()
                } else {
                    "CURRENT_TIMESTAMP".to_string()
                }
            }
            DefaultValue::Function(f) => {
                warnings.push(format!(
                    "Column '{}': default expression {} is not portable to MySQL and was dropped",
                    column.name, f
                ));
                return None;
            }
            DefaultValue::Expression(e) => e,
        };
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> TableDescriptor {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "users".to_string());
        table
            .columns
            .push(Column::new("id".to_string(), "bigserial".to_string()).auto_increment());
        table.columns.push(
            Column::new("name".to_string(), "varchar".to_string())
                .with_params(Some("100"), None)
                .not_null(),
        );
        table.columns.push(
            Column::new("active".to_string(), "boolean".to_string()).with_default("TRUE"),
        );
        table.columns.push(
            Column::new("created_at".to_string(), "timestamptz".to_string())
                .not_null()
                .with_default("now()"),
        );
        table.primary_keys.push("id".to_string());
        table.table_comment = "user's table".to_string();
        table
            .column_comments
            .insert("name".to_string(), "display name".to_string());
        table
    }

    #[test]
    fn test_generate_users_table() {
        let result = PostgresToMysqlGenerator.generate(&users_table(), &DdlOptions::default());

        let expected = "CREATE TABLE `users` (\n    `id` BIGINT NOT NULL AUTO_INCREMENT,\n    `name` VARCHAR(100) NOT NULL COMMENT 'display name',\n    `active` TINYINT(1) DEFAULT 1,\n    `created_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n    PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='user\\'s table';";
        assert_eq!(result.sql, expected);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_table_options_disabled() {
        let options = DdlOptions {
            add_table_options: false,
            ..Default::default()
        };
        let result = PostgresToMysqlGenerator.generate(&users_table(), &options);
        assert!(!result.sql.contains("ENGINE=InnoDB"));
        assert!(result.sql.ends_with(") COMMENT='user\\'s table';"));
    }

    #[test]
    fn test_serial_without_primary_key_gets_one() {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "events".to_string());
        table
            .columns
            .push(Column::new("seq".to_string(), "serial".to_string()).auto_increment());

        let result = PostgresToMysqlGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("`seq` INT NOT NULL AUTO_INCREMENT"));
        assert!(result.sql.contains("PRIMARY KEY (`seq`)"));
        assert!(result.warnings.iter().any(|w| w.contains("requires a key")));
    }

    #[test]
    fn test_non_portable_function_default_dropped() {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "t".to_string());
        table.columns.push(
            Column::new("uid".to_string(), "uuid".to_string())
                .not_null()
                .with_default("gen_random_uuid()"),
        );

        let result = PostgresToMysqlGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("`uid` CHAR(36) NOT NULL\n"));
        assert!(result.warnings.iter().any(|w| w.contains("gen_random_uuid()")));
    }

    #[test]
    fn test_array_and_unknown_types() {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "t".to_string());
        table
            .columns
            .push(Column::new("tags".to_string(), "text[]".to_string()));
        table
            .columns
            .push(Column::new("x".to_string(), "mood".to_string()));

        let result = PostgresToMysqlGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("`tags` JSON"));
        assert!(result.sql.contains("`x` MOOD"));
        assert!(result.warnings.iter().any(|w| w.contains("MOOD")));
    }

    #[test]
    fn test_unique_groups_emitted() {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "t".to_string());
        table
            .columns
            .push(Column::new("email".to_string(), "text".to_string()).not_null());
        table.unique_keys.push(vec!["email".to_string()]);

        let result = PostgresToMysqlGenerator.generate(&table, &DdlOptions::default());
        assert!(result.sql.contains("UNIQUE KEY (`email`)"));
    }
}
