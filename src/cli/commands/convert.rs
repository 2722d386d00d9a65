// convertコマンドハンドラー
//
// 入力DDLの全 CREATE TABLE 文を変換先方言のDDLに変換します。
// 生成されたSQLは標準出力、警告は標準エラー出力（JSON出力時は出力に含める）に分けます。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{format_warnings, render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::{ConversionDirection, DdlOptions, Dialect};
use crate::services::translator;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// convertコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ConvertCommand {
    /// 変換元の方言（Noneの場合は設定ファイルの source_dialect）
    pub from: Option<String>,
    /// 変換先の方言（Noneの場合は変換元でない方）
    pub to: Option<String>,
    /// 入力ファイル（Noneの場合は標準入力）
    pub file: Option<PathBuf>,
    /// テーブルオプション付与の上書き
    pub table_options: Option<bool>,
    /// COMMENT ON 出力の上書き
    pub comment_on: Option<bool>,
}

/// 変換されたテーブル
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedTable {
    /// テーブル名
    pub table: String,
    /// 生成されたSQL
    pub sql: String,
    /// 解析時と生成時の警告
    pub warnings: Vec<String>,
}

/// convertコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct ConvertOutput {
    /// 変換方向
    pub direction: ConversionDirection,
    /// 変換結果
    pub tables: Vec<ConvertedTable>,
}

impl CommandOutput for ConvertOutput {
    fn to_text(&self) -> String {
        self.tables
            .iter()
            .map(|t| t.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// convertコマンドハンドラー
#[derive(Debug, Default)]
pub struct ConvertCommandHandler {}

impl ConvertCommandHandler {
    /// 新しいConvertCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// convertコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - convertコマンドのパラメータ
    /// * `context` - コマンド共通コンテキスト
    ///
    /// # Returns
    ///
    /// 標準出力に表示する文字列
    pub fn execute(&self, command: &ConvertCommand, context: &CommandContext) -> Result<String> {
        let direction = self.resolve_direction(command, context)?;
        let input = context.read_input(command.file.as_deref())?;
        let output = self.convert(&input, direction, &self.ddl_options(command, context))?;

        if context.format == OutputFormat::Text {
            for table in &output.tables {
                if !table.warnings.is_empty() {
                    eprintln!("{}", format_warnings(&table.table, &table.warnings));
                }
            }
        }

        render_output(&output, &context.format)
    }

    /// 入力DDLを変換
    pub fn convert(
        &self,
        input: &str,
        direction: ConversionDirection,
        options: &DdlOptions,
    ) -> Result<ConvertOutput> {
        let tables = translator::parse_all(input, direction.source())
            .with_context(|| format!("Failed to parse {} DDL", direction.source()))?;
        debug!(count = tables.len(), %direction, "converting tables");

        let tables = tables
            .iter()
            .map(|table| {
                let generated = translator::generate_ddl(table, direction, options);
                let mut warnings = table.warnings.clone();
                warnings.extend(generated.warnings);
                ConvertedTable {
                    table: table.table_name.clone(),
                    sql: generated.sql,
                    warnings,
                }
            })
            .collect();

        Ok(ConvertOutput { direction, tables })
    }

    /// 変換方向を決定
    fn resolve_direction(
        &self,
        command: &ConvertCommand,
        context: &CommandContext,
    ) -> Result<ConversionDirection> {
        let source = context.dialect(command.from.as_deref())?;
        let target = match command.to.as_deref() {
            Some(name) => name.parse()?,
            None => match source {
                Dialect::MySQL => Dialect::PostgreSQL,
                Dialect::PostgreSQL => Dialect::MySQL,
            },
        };
        Ok(ConversionDirection::from_dialects(source, target)?)
    }

    /// 設定ファイルとフラグからDDL生成オプションを決定
    fn ddl_options(&self, command: &ConvertCommand, context: &CommandContext) -> DdlOptions {
        let mut options = context.config.ddl.clone();
        if let Some(value) = command.table_options {
            options.add_table_options = value;
        }
        if let Some(value) = command.comment_on {
            options.generate_comment_on = value;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_multiple_tables() {
        let handler = ConvertCommandHandler::new();
        let input = "CREATE TABLE a (id SERIAL PRIMARY KEY);\nCREATE TABLE b (flag BOOLEAN DEFAULT FALSE);";
        let output = handler
            .convert(input, ConversionDirection::PgToMysql, &DdlOptions::default())
            .unwrap();

        assert_eq!(output.tables.len(), 2);
        assert_eq!(output.tables[0].table, "a");
        assert!(output.tables[1].sql.contains("`flag` TINYINT(1) DEFAULT 0"));
        assert!(output.to_text().contains(";\n\nCREATE TABLE `b`"));
    }

    #[test]
    fn test_convert_reports_parse_error() {
        let handler = ConvertCommandHandler::new();
        let error = handler
            .convert("SELECT 1;", ConversionDirection::MysqlToPg, &DdlOptions::default())
            .unwrap_err();
        assert!(format!("{:#}", error).contains("CREATE TABLE"));
    }
}
