// Core Domain
// テーブル記述子、設定、エラー、命名規則の純粋なドメインロジック

pub mod config;
pub mod error;
pub mod naming;
pub mod schema;
