// 設定とオプション
//
// SQL方言、変換方向、エンティティ生成ターゲットの種別と、
// 各ジェネレーターに渡すオプション、設定ファイル（YAML形式）のモデルを定義します。
// ファイルI/Oは services::config_loader に集約し、このモジュールは純粋に保ちます。

use crate::core::error::OptionError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// データベース方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "mysql")]
    MySQL,
    #[serde(rename = "postgresql", alias = "postgres")]
    PostgreSQL,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::PostgreSQL => write!(f, "postgresql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySQL),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSQL),
            _ => Err(OptionError::new("dialect", s, &["mysql", "postgresql"])),
        }
    }
}

/// DDL変換方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionDirection {
    /// PostgreSQL → MySQL
    #[serde(rename = "pg2mysql")]
    PgToMysql,
    /// MySQL → PostgreSQL
    #[serde(rename = "mysql2pg")]
    MysqlToPg,
}

impl ConversionDirection {
    /// 変換元と変換先の方言から変換方向を決定
    pub fn from_dialects(source: Dialect, target: Dialect) -> Result<Self, OptionError> {
        match (source, target) {
            (Dialect::PostgreSQL, Dialect::MySQL) => Ok(ConversionDirection::PgToMysql),
            (Dialect::MySQL, Dialect::PostgreSQL) => Ok(ConversionDirection::MysqlToPg),
            _ => Err(OptionError::new(
                "conversion",
                &format!("{} -> {}", source, target),
                &["postgresql -> mysql", "mysql -> postgresql"],
            )),
        }
    }

    /// 変換元の方言
    pub fn source(&self) -> Dialect {
        match self {
            ConversionDirection::PgToMysql => Dialect::PostgreSQL,
            ConversionDirection::MysqlToPg => Dialect::MySQL,
        }
    }

    /// 変換先の方言
    pub fn target(&self) -> Dialect {
        match self {
            ConversionDirection::PgToMysql => Dialect::MySQL,
            ConversionDirection::MysqlToPg => Dialect::PostgreSQL,
        }
    }
}

impl fmt::Display for ConversionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionDirection::PgToMysql => write!(f, "pg2mysql"),
            ConversionDirection::MysqlToPg => write!(f, "mysql2pg"),
        }
    }
}

impl FromStr for ConversionDirection {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pg2mysql" => Ok(ConversionDirection::PgToMysql),
            "mysql2pg" => Ok(ConversionDirection::MysqlToPg),
            _ => Err(OptionError::new("direction", s, &["pg2mysql", "mysql2pg"])),
        }
    }
}

/// エンティティ生成ターゲット（言語 × イディオム）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Go + GORMタグ
    #[serde(rename = "go-gorm")]
    GoGorm,
    /// Go プレーン構造体
    #[serde(rename = "go-struct")]
    GoStruct,
    /// Java + JPAアノテーション
    #[serde(rename = "java-jpa")]
    JavaJpa,
    /// Java POJO
    #[serde(rename = "java-pojo")]
    JavaPojo,
    /// TypeScript インターフェース
    #[serde(rename = "typescript-interface")]
    TypeScriptInterface,
    /// Python dataclass
    #[serde(rename = "python-dataclass")]
    PythonDataclass,
    /// Python SQLAlchemy 宣言的マッピング
    #[serde(rename = "python-sqlalchemy")]
    PythonSqlAlchemy,
}

impl TargetKind {
    /// 全ターゲット種別
    pub const ALL: [TargetKind; 7] = [
        TargetKind::GoGorm,
        TargetKind::GoStruct,
        TargetKind::JavaJpa,
        TargetKind::JavaPojo,
        TargetKind::TypeScriptInterface,
        TargetKind::PythonDataclass,
        TargetKind::PythonSqlAlchemy,
    ];

    /// ターゲット名
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::GoGorm => "go-gorm",
            TargetKind::GoStruct => "go-struct",
            TargetKind::JavaJpa => "java-jpa",
            TargetKind::JavaPojo => "java-pojo",
            TargetKind::TypeScriptInterface => "typescript-interface",
            TargetKind::PythonDataclass => "python-dataclass",
            TargetKind::PythonSqlAlchemy => "python-sqlalchemy",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TargetKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let expected: Vec<&str> = TargetKind::ALL.iter().map(|k| k.as_str()).collect();
                OptionError::new("target kind", s, &expected)
            })
    }
}

/// DDL生成オプション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlOptions {
    /// MySQL出力に `ENGINE=InnoDB DEFAULT CHARSET=utf8mb4` を付与する
    pub add_table_options: bool,
    /// PostgreSQL出力でコメントを `COMMENT ON` 文として出力する
    pub generate_comment_on: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            add_table_options: true,
            generate_comment_on: true,
        }
    }
}

/// エンティティ生成オプション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityOptions {
    /// package / import 行を出力する
    pub include_package: bool,
    /// パッケージ名（Noneの場合は言語ごとの既定値）
    pub package_name: Option<String>,
    /// JSONタグ（Go）を出力する
    pub include_json_tag: bool,
    /// テーブル名の指定（GORMのTableName、JPAの@Table など）を出力する
    pub include_table_name: bool,
    /// getter/setter（Java）を出力する
    pub include_getter_setter: bool,
    /// フィールド名をcamelCaseにする
    pub use_camel_case: bool,
    /// Goでnullableカラムをポインタ型にする
    pub nullable_pointers: bool,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            include_package: false,
            package_name: None,
            include_json_tag: true,
            include_table_name: true,
            include_getter_setter: true,
            use_camel_case: true,
            nullable_pointers: false,
        }
    }
}

/// プロジェクト設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    #[serde(default = "default_version")]
    pub version: String,

    /// 入力DDLの既定の方言
    #[serde(default = "default_source_dialect")]
    pub source_dialect: Dialect,

    /// DDL変換オプション
    #[serde(default)]
    pub ddl: DdlOptions,

    /// 既定のエンティティ生成ターゲット
    #[serde(default = "default_target")]
    pub target: TargetKind,

    /// エンティティ生成オプション
    #[serde(default)]
    pub entity: EntityOptions,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_source_dialect() -> Dialect {
    Dialect::MySQL
}

fn default_target() -> TargetKind {
    TargetKind::GoStruct
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            source_dialect: default_source_dialect(),
            ddl: DdlOptions::default(),
            target: default_target(),
            entity: EntityOptions::default(),
        }
    }
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(anyhow!("Config file version is not specified"));
        }

        if let Some(package) = &self.entity.package_name {
            if package.trim().is_empty() {
                return Err(anyhow!(
                    "entity.package_name must not be empty; remove it to use the language default"
                ));
            }
        }

        Ok(())
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::PostgreSQL.to_string(), "postgresql");
        assert_eq!(Dialect::MySQL.to_string(), "mysql");
    }

    #[test]
    fn test_dialect_from_str_aliases() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSQL);
        assert_eq!("PG".parse::<Dialect>().unwrap(), Dialect::PostgreSQL);
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySQL);
        assert!("sqlite".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_direction_from_dialects() {
        assert_eq!(
            ConversionDirection::from_dialects(Dialect::MySQL, Dialect::PostgreSQL).unwrap(),
            ConversionDirection::MysqlToPg
        );
        assert_eq!(
            ConversionDirection::from_dialects(Dialect::PostgreSQL, Dialect::MySQL).unwrap(),
            ConversionDirection::PgToMysql
        );
        assert!(ConversionDirection::from_dialects(Dialect::MySQL, Dialect::MySQL).is_err());
    }

    #[test]
    fn test_direction_source_and_target() {
        let direction: ConversionDirection = "pg2mysql".parse().unwrap();
        assert_eq!(direction.source(), Dialect::PostgreSQL);
        assert_eq!(direction.target(), Dialect::MySQL);
        assert_eq!(direction.to_string(), "pg2mysql");
    }

    #[test]
    fn test_target_kind_round_trip_names() {
        for kind in TargetKind::ALL {
            assert_eq!(kind.as_str().parse::<TargetKind>().unwrap(), kind);
        }
        let error = "rust-struct".parse::<TargetKind>().unwrap_err();
        assert!(error.to_string().contains("go-struct"));
    }

    #[test]
    fn test_config_defaults_from_partial_yaml() {
        let yaml = r#"
source_dialect: postgresql
ddl:
  add_table_options: false
target: java-jpa
entity:
  use_camel_case: false
"#;
        let config: Config = yaml.parse().unwrap();

        assert_eq!(config.version, "1.0");
        assert_eq!(config.source_dialect, Dialect::PostgreSQL);
        assert!(!config.ddl.add_table_options);
        assert!(config.ddl.generate_comment_on);
        assert_eq!(config.target, TargetKind::JavaJpa);
        assert!(!config.entity.use_camel_case);
        assert!(config.entity.include_json_tag);
    }

    #[test]
    fn test_config_validate_rejects_blank_package() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.entity.package_name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }
}
