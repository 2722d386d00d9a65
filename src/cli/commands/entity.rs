// entityコマンドハンドラー
//
// 入力DDLの全 CREATE TABLE 文から、指定ターゲットのエンティティのソースコードを生成します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{format_warnings, render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::{Dialect, EntityOptions, TargetKind};
use crate::services::translator;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// entityコマンドの入力パラメータ
#[derive(Debug, Clone, Default)]
pub struct EntityCommand {
    /// 入力の方言（Noneの場合は設定ファイルの source_dialect）
    pub dialect: Option<String>,
    /// ターゲット種別（Noneの場合は設定ファイルの target）
    pub target: Option<String>,
    /// 入力ファイル（Noneの場合は標準入力）
    pub file: Option<PathBuf>,
    /// オプションの上書き
    pub overrides: EntityOverrides,
}

/// エンティティ生成オプションの上書き値
#[derive(Debug, Clone, Default)]
pub struct EntityOverrides {
    pub package_name: Option<String>,
    pub include_package: Option<bool>,
    pub include_json_tag: Option<bool>,
    pub include_table_name: Option<bool>,
    pub include_getter_setter: Option<bool>,
    pub use_camel_case: Option<bool>,
    pub nullable_pointers: Option<bool>,
}

impl EntityOverrides {
    /// 設定ファイルのオプションに上書き値を適用
    ///
    /// パッケージ名の指定は package / import 行の出力も有効にします。
    pub fn apply(&self, base: &EntityOptions) -> EntityOptions {
        let mut options = base.clone();
        if let Some(name) = &self.package_name {
            options.package_name = Some(name.clone());
            options.include_package = true;
        }
        if let Some(value) = self.include_package {
            options.include_package = value;
        }
        if let Some(value) = self.include_json_tag {
            options.include_json_tag = value;
        }
        if let Some(value) = self.include_table_name {
            options.include_table_name = value;
        }
        if let Some(value) = self.include_getter_setter {
            options.include_getter_setter = value;
        }
        if let Some(value) = self.use_camel_case {
            options.use_camel_case = value;
        }
        if let Some(value) = self.nullable_pointers {
            options.nullable_pointers = value;
        }
        options
    }
}

/// 生成されたエンティティ
#[derive(Debug, Clone, Serialize)]
pub struct EntitySource {
    /// テーブル名
    pub table: String,
    /// 生成されたソースコード
    pub code: String,
    /// 解析時と生成時の警告
    pub warnings: Vec<String>,
}

/// entityコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct EntityOutput {
    /// ターゲット種別
    pub target: TargetKind,
    /// 生成結果
    pub entities: Vec<EntitySource>,
}

impl CommandOutput for EntityOutput {
    fn to_text(&self) -> String {
        self.entities
            .iter()
            .map(|e| e.code.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// entityコマンドハンドラー
#[derive(Debug, Default)]
pub struct EntityCommandHandler {}

impl EntityCommandHandler {
    /// 新しいEntityCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// entityコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - entityコマンドのパラメータ
    /// * `context` - コマンド共通コンテキスト
    ///
    /// # Returns
    ///
    /// 標準出力に表示する文字列
    pub fn execute(&self, command: &EntityCommand, context: &CommandContext) -> Result<String> {
        let dialect = context.dialect(command.dialect.as_deref())?;
        let target = match command.target.as_deref() {
            Some(name) => name.parse()?,
            None => context.config.target,
        };
        let options = command.overrides.apply(&context.config.entity);
        let input = context.read_input(command.file.as_deref())?;

        let output = self.generate(&input, dialect, target, &options)?;

        if context.format == OutputFormat::Text {
            for entity in &output.entities {
                if !entity.warnings.is_empty() {
                    eprintln!("{}", format_warnings(&entity.table, &entity.warnings));
                }
            }
        }

        render_output(&output, &context.format)
    }

    /// 入力DDLからエンティティを生成
    pub fn generate(
        &self,
        input: &str,
        dialect: Dialect,
        target: TargetKind,
        options: &EntityOptions,
    ) -> Result<EntityOutput> {
        let tables = translator::parse_all(input, dialect)
            .with_context(|| format!("Failed to parse {} DDL", dialect))?;

        let entities = tables
            .iter()
            .map(|table| {
                let generated = translator::generate_entity(table, target, options);
                let mut warnings = table.warnings.clone();
                warnings.extend(generated.warnings);
                EntitySource {
                    table: table.table_name.clone(),
                    code: generated.code,
                    warnings,
                }
            })
            .collect();

        Ok(EntityOutput { target, entities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let overrides = EntityOverrides {
            package_name: Some("models".to_string()),
            include_json_tag: Some(false),
            ..Default::default()
        };
        let options = overrides.apply(&EntityOptions::default());

        assert!(options.include_package);
        assert_eq!(options.package_name.as_deref(), Some("models"));
        assert!(!options.include_json_tag);
        assert!(options.use_camel_case);
    }

    #[test]
    fn test_generate_for_every_table() {
        let handler = EntityCommandHandler::new();
        let input = "CREATE TABLE users (id INT NOT NULL); CREATE TABLE posts (id INT NOT NULL);";
        let output = handler
            .generate(input, Dialect::MySQL, TargetKind::TypeScriptInterface, &EntityOptions::default())
            .unwrap();

        assert_eq!(output.entities.len(), 2);
        assert_eq!(
            output.to_text(),
            "export interface Users {\n  id: number;\n}\n\nexport interface Posts {\n  id: number;\n}"
        );
    }
}
