// コマンド共通コンテキスト
//
// 設定ファイル読み込み、入力の読み込み、方言の解決の重複をCLI層で集約する。

use crate::cli::OutputFormat;
use crate::core::config::{Config, Dialect};
use crate::services::config_loader::ConfigLoader;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
}

impl CommandContext {
    /// プロジェクトルートから設定を読み込んでコンテキストを作成
    ///
    /// 既定の設定ファイルが存在しない場合はデフォルト設定を使用します。
    pub fn load(project_path: PathBuf, format: OutputFormat) -> Result<Self> {
        Self::load_with_config(project_path, None, format)
    }

    /// カスタム設定ファイルパスを指定してコンテキストを作成
    ///
    /// `--config` で明示されたファイルが存在しない場合はエラーです。
    pub fn load_with_config(
        project_path: PathBuf,
        custom_config_path: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self> {
        let required = custom_config_path.is_some();
        let config_path = Self::resolve_config_path(&project_path, custom_config_path);

        let config = ConfigLoader::load_or_default(&config_path, required)
            .with_context(|| "Failed to load configuration")?;
        debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            project_path,
            config_path,
            config,
            format,
        })
    }

    /// 設定ファイルの絶対パスを決定
    pub fn resolve_config_path(project_path: &Path, custom_config_path: Option<PathBuf>) -> PathBuf {
        match custom_config_path {
            Some(path) if path.is_absolute() => path,
            Some(path) => project_path.join(path),
            None => project_path.join(Config::DEFAULT_CONFIG_PATH),
        }
    }

    /// 方言を解決（指定がなければ設定ファイルの source_dialect）
    pub fn dialect(&self, dialect: Option<&str>) -> Result<Dialect> {
        match dialect {
            Some(name) => Ok(name.parse()?),
            None => Ok(self.config.source_dialect),
        }
    }

    /// 入力DDLを読み込む
    ///
    /// ファイルが指定されていない、または `-` の場合は標準入力から読み込みます。
    /// 相対パスはプロジェクトルートを基準に解決します。
    pub fn read_input(&self, file: Option<&Path>) -> Result<String> {
        match file {
            Some(path) if path != Path::new("-") => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.project_path.join(path)
                };
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read input file: {:?}", path))
            }
            _ => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .with_context(|| "Failed to read DDL from stdin")?;
                Ok(input)
            }
        }
    }
}
