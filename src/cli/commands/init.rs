// initコマンドハンドラー
//
// デフォルト設定ファイル（.tabula.yaml）を生成します。
// 既存の設定ファイルは --force 指定時のみ上書きします。

use crate::core::config::Config;
use crate::services::config_loader::ConfigSerializer;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// initコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct InitCommand {
    /// 生成する設定ファイルのパス
    pub config_path: PathBuf,
    /// 強制的に初期化（既存の設定を上書き）
    pub force: bool,
}

/// initコマンドハンドラー
#[derive(Debug, Default)]
pub struct InitCommandHandler {}

impl InitCommandHandler {
    /// 新しいInitCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// initコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - initコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は完了メッセージ
    pub fn execute(&self, command: &InitCommand) -> Result<String> {
        if self.is_already_initialized(&command.config_path) && !command.force {
            return Err(anyhow!(
                "Config file already exists: {:?}. Use --force option to overwrite it.",
                command.config_path
            ));
        }

        self.generate_config_file(&command.config_path)?;

        Ok(format!("Created config file: {}", command.config_path.display()))
    }

    /// 設定ファイルが既に存在するかチェック
    pub fn is_already_initialized(&self, config_path: &Path) -> bool {
        config_path.exists()
    }

    /// デフォルト設定ファイルを生成
    pub fn generate_config_file(&self, config_path: &Path) -> Result<()> {
        let yaml = ConfigSerializer::to_yaml(&Config::default())?;

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(config_path, yaml)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config_loader::ConfigLoader;
    use tempfile::TempDir;

    #[test]
    fn test_new_handler() {
        let handler = InitCommandHandler::new();
        assert!(format!("{:?}", handler).contains("InitCommandHandler"));
    }

    #[test]
    fn test_creates_loadable_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(Config::DEFAULT_CONFIG_PATH);
        let command = InitCommand {
            config_path: config_path.clone(),
            force: false,
        };

        let message = InitCommandHandler::new().execute(&command).unwrap();
        assert!(message.contains(".tabula.yaml"));
        assert_eq!(ConfigLoader::from_file(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(Config::DEFAULT_CONFIG_PATH);
        fs::write(&config_path, "source_dialect: postgresql\n").unwrap();

        let handler = InitCommandHandler::new();
        let command = InitCommand {
            config_path: config_path.clone(),
            force: false,
        };
        let error = handler.execute(&command).unwrap_err();
        assert!(error.to_string().contains("--force"));

        let forced = InitCommand {
            config_path: config_path.clone(),
            force: true,
        };
        handler.execute(&forced).unwrap();
        assert_eq!(ConfigLoader::from_file(&config_path).unwrap(), Config::default());
    }
}
