// Services Layer
// DDLの解析、設定ファイルの読み書き、変換処理のオーケストレーション

pub mod config_loader;
pub mod ddl_parser;
pub mod translator;
