// 設定ファイル読み書きサービス
//
// core::config の純粋性を保つため、ファイルI/OとYAMLへの直列化はこのサービスに集約する。

use crate::core::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 設定ファイル読み込みサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// YAMLファイルから設定を読み込む
    ///
    /// 読み込んだ設定は `Config::validate` で検証します。
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = content
            .parse()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// 設定ファイルが存在すれば読み込み、なければデフォルト設定を返す
    ///
    /// # Arguments
    ///
    /// * `path` - 設定ファイルのパス
    /// * `required` - true の場合、ファイルが存在しなければエラー（`--config` 明示指定時）
    pub fn load_or_default(path: &Path, required: bool) -> Result<Config> {
        if path.exists() {
            return Self::from_file(path);
        }
        if required {
            return Err(anyhow::anyhow!("Config file not found: {:?}", path));
        }
        Ok(Config::default())
    }
}

/// 設定ファイル書き出しサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigSerializer;

impl ConfigSerializer {
    /// ConfigをYAML文字列に変換
    pub fn to_yaml(config: &Config) -> Result<String> {
        serde_saphyr::to_string(config).with_context(|| "Failed to serialize config file")
    }
}
