// Adapters
// テーブル記述子を各方言のDDLや各言語のソースコードに変換する出力側の層

pub mod entity_generator;
pub mod sql_generator;
pub mod sql_quote;
pub mod type_mapping;
