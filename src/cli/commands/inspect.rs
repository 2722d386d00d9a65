// inspectコマンドハンドラー
//
// 入力DDLを解析し、テーブル記述子をテキストの概要またはJSONで表示します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{render_output, CommandOutput};
use crate::core::config::Dialect;
use crate::core::schema::{Column, TableDescriptor};
use crate::services::translator;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// inspectコマンドの入力パラメータ
#[derive(Debug, Clone, Default)]
pub struct InspectCommand {
    /// 入力の方言（Noneの場合は設定ファイルの source_dialect）
    pub dialect: Option<String>,
    /// 入力ファイル（Noneの場合は標準入力）
    pub file: Option<PathBuf>,
}

/// inspectコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// 解析されたテーブル
    pub tables: Vec<TableDescriptor>,
}

impl CommandOutput for InspectOutput {
    fn to_text(&self) -> String {
        let mut output = String::new();
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            write_table_summary(&mut output, table);
        }
        output.trim_end().to_string()
    }
}

fn write_table_summary(output: &mut String, table: &TableDescriptor) {
    let _ = writeln!(
        output,
        "{} {} ({})",
        "Table:".bold(),
        table.table_name.bold(),
        table.dialect
    );
    if let Some(comment) = table.comment() {
        let _ = writeln!(output, "  Comment: {}", comment);
    }

    let _ = writeln!(output, "  Columns:");
    for column in &table.columns {
        let _ = writeln!(output, "    {}", column_summary(table, column));
    }

    if !table.primary_keys.is_empty() {
        let _ = writeln!(output, "  Primary key: {}", table.distinct_primary_keys().join(", "));
    }
    for group in &table.unique_keys {
        let _ = writeln!(output, "  Unique: {}", group.join(", "));
    }
    for group in &table.indexes {
        let _ = writeln!(output, "  Index: {}", group.join(", "));
    }
    for warning in &table.warnings {
        let _ = writeln!(output, "  {} {}", "⚠".yellow(), warning.yellow());
    }
}

fn column_summary(table: &TableDescriptor, column: &Column) -> String {
    let mut parts = vec![
        column.name.clone(),
        format!("{}{}", column.raw_type, column.type_params().unwrap_or_default()),
    ];
    if column.unsigned {
        parts.push("unsigned".to_string());
    }
    if column.not_null {
        parts.push("not null".to_string());
    }
    if column.auto_increment {
        parts.push("auto increment".to_string());
    }
    if let Some(default) = &column.default_value {
        parts.push(format!("default {}", default));
    }
    if !column.enum_values.is_empty() {
        parts.push(format!("values [{}]", column.enum_values.join(", ")));
    }
    if let Some(comment) = table.comment_for(column) {
        parts.push(format!("-- {}", comment));
    }
    parts.join(" ")
}

/// inspectコマンドハンドラー
#[derive(Debug, Default)]
pub struct InspectCommandHandler {}

impl InspectCommandHandler {
    /// 新しいInspectCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// inspectコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - inspectコマンドのパラメータ
    /// * `context` - コマンド共通コンテキスト
    ///
    /// # Returns
    ///
    /// 標準出力に表示する文字列
    pub fn execute(&self, command: &InspectCommand, context: &CommandContext) -> Result<String> {
        let dialect = context.dialect(command.dialect.as_deref())?;
        let input = context.read_input(command.file.as_deref())?;
        let output = self.inspect(&input, dialect)?;
        render_output(&output, &context.format)
    }

    /// 入力DDLを解析
    pub fn inspect(&self, input: &str, dialect: Dialect) -> Result<InspectOutput> {
        let tables = translator::parse_all(input, dialect)
            .with_context(|| format!("Failed to parse {} DDL", dialect))?;
        Ok(InspectOutput { tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_summary() {
        colored::control::set_override(false);
        let output = InspectCommandHandler::new()
            .inspect(
                "CREATE TABLE `t` (`id` INT UNSIGNED NOT NULL AUTO_INCREMENT, `s` ENUM('a','b') DEFAULT 'a', PRIMARY KEY (`id`))",
                Dialect::MySQL,
            )
            .unwrap();

        let text = output.to_text();
        assert!(text.starts_with("Table: t (mysql)\n  Columns:\n"));
        assert!(text.contains("    id int unsigned not null auto increment\n"));
        assert!(text.contains("    s enum default 'a' values [a, b]\n"));
        assert!(text.ends_with("  Primary key: id"));
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let output = InspectCommandHandler::new()
            .inspect("CREATE TABLE t (id INTEGER NOT NULL)", Dialect::PostgreSQL)
            .unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["tables"][0]["tableName"], "t");
        assert_eq!(json["tables"][0]["columns"][0]["rawType"], "integer");
        assert_eq!(json["tables"][0]["columns"][0]["notNull"], true);
    }
}
