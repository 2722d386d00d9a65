/// CLI エントリーポイントとコマンドハンドラーのテスト
///
/// CLIの構造が正しく定義され、各サブコマンドがファイル入力から
/// 期待通りの出力を生成することを確認します。
use clap::Parser;

#[cfg(test)]
mod cli_tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tabula::cli::command_context::CommandContext;
    use tabula::cli::commands::convert::{ConvertCommand, ConvertCommandHandler};
    use tabula::cli::commands::entity::{EntityCommand, EntityCommandHandler, EntityOverrides};
    use tabula::cli::commands::init::{InitCommand, InitCommandHandler};
    use tabula::cli::commands::inspect::{InspectCommand, InspectCommandHandler};
    use tabula::cli::{flag_override, Cli, Commands, OutputFormat};
    use tabula::core::config::Config;
    use tempfile::TempDir;

    const USERS: &str = "CREATE TABLE `users` (`id` BIGINT NOT NULL AUTO_INCREMENT, `name` VARCHAR(100) NOT NULL COMMENT '用户名', `active` TINYINT(1) DEFAULT 1, PRIMARY KEY (`id`)) ENGINE=InnoDB COMMENT='用户表';";

    fn project_with_schema() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("schema.sql"), USERS).unwrap();
        temp_dir
    }

    /// ヘルプとバージョンの表示
    #[test]
    fn test_cli_can_parse() {
        assert!(Cli::try_parse_from(["tabula", "--help"]).is_err());
        assert!(Cli::try_parse_from(["tabula", "--version"]).is_err());
        assert!(Cli::try_parse_from(["tabula"]).is_err());
    }

    /// convertサブコマンドの引数
    #[test]
    fn test_convert_command_parses() {
        let cli = Cli::try_parse_from([
            "tabula",
            "--format",
            "json",
            "convert",
            "--from",
            "postgresql",
            "--to",
            "mysql",
            "--no-table-options",
            "schema.sql",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Convert { from, to, file, ddl } => {
                assert_eq!(from.as_deref(), Some("postgresql"));
                assert_eq!(to.as_deref(), Some("mysql"));
                assert_eq!(file, Some(PathBuf::from("schema.sql")));
                assert_eq!(flag_override(ddl.table_options, ddl.no_table_options), Some(false));
                assert_eq!(flag_override(ddl.comment_on, ddl.no_comment_on), None);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    /// entityサブコマンドの引数
    #[test]
    fn test_entity_command_parses() {
        let cli = Cli::try_parse_from([
            "tabula",
            "entity",
            "-d",
            "mysql",
            "-t",
            "go-gorm",
            "--package",
            "model",
            "--nullable-pointers",
            "--no-camel-case",
        ])
        .unwrap();

        match cli.command {
            Commands::Entity {
                dialect,
                target,
                file,
                entity,
            } => {
                assert_eq!(dialect.as_deref(), Some("mysql"));
                assert_eq!(target.as_deref(), Some("go-gorm"));
                assert_eq!(file, None);
                assert_eq!(entity.package.as_deref(), Some("model"));
                assert_eq!(flag_override(entity.nullable_pointers, entity.no_nullable_pointers), Some(true));
                assert_eq!(flag_override(entity.camel_case, entity.no_camel_case), Some(false));
            }
            _ => panic!("Expected Entity command"),
        }
    }

    /// グローバルオプションはサブコマンドの後でも指定できる
    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["tabula", "inspect", "--verbose", "--config", "custom.yaml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }

    /// convertコマンドをファイル入力で実行
    #[test]
    fn test_convert_handler_with_file_input() {
        let project = project_with_schema();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Text).unwrap();
        let command = ConvertCommand {
            from: Some("mysql".to_string()),
            to: None,
            file: Some(PathBuf::from("schema.sql")),
            table_options: None,
            comment_on: Some(false),
        };

        let output = ConvertCommandHandler::new().execute(&command, &context).unwrap();
        assert!(output.starts_with("CREATE TABLE users ("));
        assert!(output.contains("id BIGSERIAL PRIMARY KEY"));
        assert!(!output.contains("COMMENT ON"));
    }

    /// JSON出力には警告と変換方向が含まれる
    #[test]
    fn test_convert_handler_json_output() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("schema.sql"), "CREATE TABLE t (x MOOD NOT NULL);").unwrap();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Json).unwrap();
        let command = ConvertCommand {
            from: Some("postgresql".to_string()),
            to: Some("mysql".to_string()),
            file: Some(PathBuf::from("schema.sql")),
            table_options: None,
            comment_on: None,
        };

        let output = ConvertCommandHandler::new().execute(&command, &context).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["direction"], "pg2mysql");
        assert_eq!(json["tables"][0]["table"], "t");
        assert!(json["tables"][0]["warnings"][0].as_str().unwrap().contains("MOOD"));
    }

    /// 同じ方言への変換はエラー
    #[test]
    fn test_convert_handler_rejects_same_dialect() {
        let project = project_with_schema();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Text).unwrap();
        let command = ConvertCommand {
            from: Some("mysql".to_string()),
            to: Some("mysql".to_string()),
            file: Some(PathBuf::from("schema.sql")),
            table_options: None,
            comment_on: None,
        };

        assert!(ConvertCommandHandler::new().execute(&command, &context).is_err());
    }

    /// entityコマンドは設定ファイルのターゲットを既定値として使う
    #[test]
    fn test_entity_handler_uses_config_target() {
        let project = project_with_schema();
        fs::write(
            project.path().join(Config::DEFAULT_CONFIG_PATH),
            "source_dialect: mysql\ntarget: typescript-interface\n",
        )
        .unwrap();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Text).unwrap();
        let command = EntityCommand {
            file: Some(PathBuf::from("schema.sql")),
            ..Default::default()
        };

        let output = EntityCommandHandler::new().execute(&command, &context).unwrap();
        assert!(output.starts_with("/** 用户表 */\nexport interface Users {"));
        assert!(output.contains("  active?: boolean;"));
    }

    /// entityコマンドのオプション上書き
    #[test]
    fn test_entity_handler_with_overrides() {
        let project = project_with_schema();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Text).unwrap();
        let command = EntityCommand {
            dialect: Some("mysql".to_string()),
            target: Some("go-struct".to_string()),
            file: Some(PathBuf::from("schema.sql")),
            overrides: EntityOverrides {
                package_name: Some("model".to_string()),
                include_json_tag: Some(false),
                ..Default::default()
            },
        };

        let output = EntityCommandHandler::new().execute(&command, &context).unwrap();
        assert!(output.starts_with("package model\n"));
        assert!(output.contains("\tID int64\n"));
        assert!(!output.contains("json:"));
    }

    /// inspectコマンドのJSON出力
    #[test]
    fn test_inspect_handler_json() {
        let project = project_with_schema();
        let context = CommandContext::load(project.path().to_path_buf(), OutputFormat::Json).unwrap();
        let command = InspectCommand {
            dialect: Some("mysql".to_string()),
            file: Some(PathBuf::from("schema.sql")),
        };

        let output = InspectCommandHandler::new().execute(&command, &context).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let table = &json["tables"][0];
        assert_eq!(table["tableName"], "users");
        assert_eq!(table["primaryKeys"][0], "id");
        assert_eq!(table["columns"][0]["autoIncrement"], true);
        assert_eq!(table["columns"][1]["comment"], "用户名");
    }

    /// initコマンドで生成した設定がコンテキストに読み込まれる
    #[test]
    fn test_init_then_load_context() {
        let project = TempDir::new().unwrap();
        let config_path =
            CommandContext::resolve_config_path(project.path(), Some(PathBuf::from("conf/tabula.yaml")));
        let command = InitCommand {
            config_path: config_path.clone(),
            force: false,
        };
        InitCommandHandler::new().execute(&command).unwrap();

        let context = CommandContext::load_with_config(
            project.path().to_path_buf(),
            Some(PathBuf::from("conf/tabula.yaml")),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(context.config, Config::default());
        assert_eq!(context.config_path, config_path);
    }
}
