/// 設定ファイルのテスト
///
/// YAML設定の読み込み・既定値・検証を確認します。

#[cfg(test)]
mod config_tests {
    use std::fs;
    use tabula::core::config::Config;
    use tabula::services::config_loader::{ConfigLoader, ConfigSerializer};
    use tabula::{Dialect, TargetKind};
    use tempfile::TempDir;

    /// 部分的な設定は既定値で補完される
    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
version: "1.0"
source_dialect: postgresql
target: java-jpa
entity:
  package_name: com.acme.model
  use_camel_case: false
"#;
        let config: Config = yaml.parse().unwrap();

        assert_eq!(config.source_dialect, Dialect::PostgreSQL);
        assert_eq!(config.target, TargetKind::JavaJpa);
        assert_eq!(config.entity.package_name.as_deref(), Some("com.acme.model"));
        assert!(!config.entity.use_camel_case);
        assert!(config.entity.include_json_tag);
        assert!(config.ddl.add_table_options);
        assert!(config.ddl.generate_comment_on);
    }

    /// 空の設定ファイルはすべて既定値になる
    #[test]
    fn test_empty_mapping_is_default() {
        let config: Config = "{}".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    /// 不正なターゲット種別はエラーになる
    #[test]
    fn test_unknown_target_is_rejected() {
        let result: Result<Config, _> = "target: cobol-record\n".parse();
        assert!(result.is_err());
    }

    /// ファイルからの読み込みと検証
    #[test]
    fn test_load_from_file_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".tabula.yaml");

        fs::write(&path, "ddl:\n  add_table_options: false\n").unwrap();
        let config = ConfigLoader::from_file(&path).unwrap();
        assert!(!config.ddl.add_table_options);

        fs::write(&path, "entity:\n  package_name: \"  \"\n").unwrap();
        let error = ConfigLoader::from_file(&path).unwrap_err();
        assert!(error.to_string().contains("package_name"));
    }

    /// 設定ファイルがない場合の扱い
    #[test]
    fn test_load_or_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yaml");

        assert_eq!(ConfigLoader::load_or_default(&path, false).unwrap(), Config::default());
        assert!(ConfigLoader::load_or_default(&path, true).is_err());
    }

    /// 書き出した設定を読み戻せること
    #[test]
    fn test_serialized_config_is_loadable() {
        let mut config = Config::default();
        config.source_dialect = Dialect::PostgreSQL;
        config.target = TargetKind::PythonSqlAlchemy;
        config.entity.nullable_pointers = true;

        let yaml = ConfigSerializer::to_yaml(&config).unwrap();
        assert!(yaml.contains("python-sqlalchemy"));

        let loaded: Config = yaml.parse().unwrap();
        assert_eq!(loaded, config);
    }
}
