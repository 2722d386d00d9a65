// Tabulaライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインロジック（テーブル記述子、設定、エラー、命名規則）
// - adapters: 出力側の変換（識別子クォート、型マッピング、DDL生成、エンティティ生成）
// - services: 入力側の処理とオーケストレーション（DDL解析、設定ファイル、変換API）

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;

pub use crate::core::config::{ConversionDirection, DdlOptions, Dialect, EntityOptions, TargetKind};
pub use crate::core::error::ParseError;
pub use crate::core::schema::{Column, TableDescriptor};
pub use crate::services::translator::{generate_ddl, generate_entity, parse, parse_all};
