// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// Tabula - DDL translation CLI
///
/// Converts CREATE TABLE statements between MySQL and PostgreSQL
/// and generates entity source code from them.
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "DDL translation and entity generation CLI tool")]
#[command(long_about = "Tabula - DDL translation CLI

Reads CREATE TABLE statements and:
  • Converts them between MySQL and PostgreSQL
  • Generates Go, Java, TypeScript and Python entities
  • Prints the parsed table structure for inspection

Input is read from FILE, or from stdin when FILE is omitted or '-'.")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Create a config file (optional):  tabula init
  2. Convert MySQL DDL to PostgreSQL:  tabula convert --from mysql --to postgresql schema.sql
  3. Generate a Go struct:             tabula entity --dialect mysql --target go-struct schema.sql

For detailed help on each command, use: tabula <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    ///
    /// Writes .tabula.yaml (or the file given with --config) with every
    /// option set to its default value.
    ///
    /// EXAMPLES:
    ///   # Create .tabula.yaml in the current directory
    ///   tabula init
    ///
    ///   # Overwrite an existing config file
    ///   tabula init --force
    Init {
        /// Overwrite the config file if it already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Convert CREATE TABLE statements to another dialect
    ///
    /// Every CREATE TABLE statement in the input is converted.
    /// Warnings are printed to stderr (or included in the JSON output).
    ///
    /// EXAMPLES:
    ///   # MySQL to PostgreSQL
    ///   tabula convert --from mysql --to postgresql schema.sql
    ///
    ///   # PostgreSQL to MySQL from stdin, without table options
    ///   pg_dump -s mydb | tabula convert --from postgresql --to mysql --no-table-options
    Convert {
        /// Source dialect (mysql, postgresql); defaults to source_dialect in the config
        #[arg(long, value_name = "DIALECT")]
        from: Option<String>,

        /// Target dialect (mysql, postgresql); defaults to the other dialect
        #[arg(long, value_name = "DIALECT")]
        to: Option<String>,

        /// Input file (stdin when omitted or '-')
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        ddl: DdlFlags,
    },

    /// Generate entity source code from CREATE TABLE statements
    ///
    /// EXAMPLES:
    ///   # Go struct with JSON tags
    ///   tabula entity --dialect mysql --target go-struct schema.sql
    ///
    ///   # JPA entity with package declaration
    ///   tabula entity --dialect postgresql --target java-jpa --package com.acme.model schema.sql
    Entity {
        /// Input dialect (mysql, postgresql); defaults to source_dialect in the config
        #[arg(short, long, value_name = "DIALECT")]
        dialect: Option<String>,

        /// Target kind (go-gorm, go-struct, java-jpa, java-pojo, typescript-interface, python-dataclass, python-sqlalchemy)
        #[arg(short, long, value_name = "KIND")]
        target: Option<String>,

        /// Input file (stdin when omitted or '-')
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        entity: EntityFlags,
    },

    /// Show the parsed structure of CREATE TABLE statements
    ///
    /// EXAMPLES:
    ///   # Text summary
    ///   tabula inspect --dialect mysql schema.sql
    ///
    ///   # Table descriptors as JSON
    ///   tabula inspect --dialect postgresql --format json schema.sql
    Inspect {
        /// Input dialect (mysql, postgresql); defaults to source_dialect in the config
        #[arg(short, long, value_name = "DIALECT")]
        dialect: Option<String>,

        /// Input file (stdin when omitted or '-')
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

/// DDL生成オプションのフラグ
#[derive(Args, Debug, Clone, Default)]
pub struct DdlFlags {
    /// Append ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 to MySQL output
    #[arg(long, overrides_with = "no_table_options")]
    pub table_options: bool,

    /// Do not append table options to MySQL output
    #[arg(long)]
    pub no_table_options: bool,

    /// Emit COMMENT ON statements for PostgreSQL output
    #[arg(long, overrides_with = "no_comment_on")]
    pub comment_on: bool,

    /// Drop comments from PostgreSQL output
    #[arg(long)]
    pub no_comment_on: bool,
}

/// エンティティ生成オプションのフラグ
#[derive(Args, Debug, Clone, Default)]
pub struct EntityFlags {
    /// Emit a package declaration and imports using this package name
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Emit package and import lines with the default package name
    #[arg(long, overrides_with = "no_package_lines")]
    pub package_lines: bool,

    /// Do not emit package and import lines
    #[arg(long)]
    pub no_package_lines: bool,

    /// Emit JSON tags (Go)
    #[arg(long, overrides_with = "no_json_tag")]
    pub json_tag: bool,

    /// Do not emit JSON tags (Go)
    #[arg(long)]
    pub no_json_tag: bool,

    /// Emit table name declarations
    #[arg(long, overrides_with = "no_table_name")]
    pub table_name: bool,

    /// Do not emit table name declarations
    #[arg(long)]
    pub no_table_name: bool,

    /// Emit getters and setters (Java)
    #[arg(long, overrides_with = "no_getter_setter")]
    pub getter_setter: bool,

    /// Do not emit getters and setters (Java)
    #[arg(long)]
    pub no_getter_setter: bool,

    /// Use camelCase field names
    #[arg(long, overrides_with = "no_camel_case")]
    pub camel_case: bool,

    /// Keep column names as field names
    #[arg(long)]
    pub no_camel_case: bool,

    /// Use pointer types for nullable columns (Go)
    #[arg(long, overrides_with = "no_nullable_pointers")]
    pub nullable_pointers: bool,

    /// Use value types for nullable columns (Go)
    #[arg(long)]
    pub no_nullable_pointers: bool,
}

/// `--xxx` / `--no-xxx` の組から上書き値を決定
pub fn flag_override(enabled: bool, disabled: bool) -> Option<bool> {
    match (enabled, disabled) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_arguments() {
        let cli = Cli::parse_from([
            "tabula",
            "convert",
            "--from",
            "mysql",
            "--to",
            "postgresql",
            "--no-comment-on",
            "schema.sql",
        ]);
        match cli.command {
            Commands::Convert { from, to, file, ddl } => {
                assert_eq!(from.as_deref(), Some("mysql"));
                assert_eq!(to.as_deref(), Some("postgresql"));
                assert_eq!(file, Some(PathBuf::from("schema.sql")));
                assert_eq!(flag_override(ddl.comment_on, ddl.no_comment_on), Some(false));
                assert_eq!(flag_override(ddl.table_options, ddl.no_table_options), None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["tabula", "inspect", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
