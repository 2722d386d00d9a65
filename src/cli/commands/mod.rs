// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod convert;
pub mod entity;
pub mod init;
pub mod inspect;

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

/// コマンド出力
///
/// テキスト出力とJSON出力を切り替えるためのトレイト。
/// JSON出力は Serialize の実装をそのまま使用します。
pub trait CommandOutput: Serialize {
    /// テキスト形式の出力
    fn to_text(&self) -> String;
}

/// 出力フォーマットに応じて出力を文字列化
pub fn render_output<T: CommandOutput>(output: &T, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(output.to_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(output).with_context(|| "Failed to serialize output")
        }
    }
}

/// 警告をテキスト出力用に整形
///
/// 生成物とは別に標準エラー出力へ表示するための文字列を返します。
pub fn format_warnings(table_name: &str, warnings: &[String]) -> String {
    warnings
        .iter()
        .map(|warning| {
            format!(
                "{} {} {}",
                "⚠".yellow(),
                format!("[{}]", table_name).bold(),
                warning.yellow()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
