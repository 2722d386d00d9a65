use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use std::env;
use std::io;
use std::process;
use tabula::cli::command_context::CommandContext;
use tabula::cli::commands::convert::{ConvertCommand, ConvertCommandHandler};
use tabula::cli::commands::entity::{EntityCommand, EntityCommandHandler, EntityOverrides};
use tabula::cli::commands::init::{InitCommand, InitCommandHandler};
use tabula::cli::commands::inspect::{InspectCommand, InspectCommandHandler};
use tabula::cli::{flag_override, Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run_command(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングを初期化（出力は標準エラー）
///
/// RUST_LOG が設定されていればそれを優先し、なければ --verbose に応じて debug / warn を使用します。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::Init { force } => {
            let config_path = CommandContext::resolve_config_path(&project_path, cli.config);
            let handler = InitCommandHandler::new();
            let command = InitCommand { config_path, force };
            handler.execute(&command)
        }

        Commands::Convert { from, to, file, ddl } => {
            let context = CommandContext::load_with_config(project_path, cli.config, cli.format)?;
            let handler = ConvertCommandHandler::new();
            let command = ConvertCommand {
                from,
                to,
                file,
                table_options: flag_override(ddl.table_options, ddl.no_table_options),
                comment_on: flag_override(ddl.comment_on, ddl.no_comment_on),
            };
            handler.execute(&command, &context)
        }

        Commands::Entity {
            dialect,
            target,
            file,
            entity,
        } => {
            let context = CommandContext::load_with_config(project_path, cli.config, cli.format)?;
            let handler = EntityCommandHandler::new();
            let command = EntityCommand {
                dialect,
                target,
                file,
                overrides: EntityOverrides {
                    package_name: entity.package,
                    include_package: flag_override(entity.package_lines, entity.no_package_lines),
                    include_json_tag: flag_override(entity.json_tag, entity.no_json_tag),
                    include_table_name: flag_override(entity.table_name, entity.no_table_name),
                    include_getter_setter: flag_override(
                        entity.getter_setter,
                        entity.no_getter_setter,
                    ),
                    use_camel_case: flag_override(entity.camel_case, entity.no_camel_case),
                    nullable_pointers: flag_override(
                        entity.nullable_pointers,
                        entity.no_nullable_pointers,
                    ),
                },
            };
            handler.execute(&command, &context)
        }

        Commands::Inspect { dialect, file } => {
            let context = CommandContext::load_with_config(project_path, cli.config, cli.format)?;
            let handler = InspectCommandHandler::new();
            let command = InspectCommand { dialect, file };
            handler.execute(&command, &context)
        }
    }
}
