// エンティティ生成アダプター
//
// TableDescriptor から各言語のエンティティ（構造体・クラス・インターフェース）の
// ソースコードを生成します。言語 × イディオムごとのジェネレーターは
// EntityGenerator トレイトを実装し、TargetKind で切り替えます。

pub mod go;
pub mod java;
pub mod python;
pub mod typescript;

pub use go::GoGenerator;
pub use java::JavaGenerator;
pub use python::PythonGenerator;
pub use typescript::TypeScriptGenerator;

use crate::adapters::type_mapping::{split_array_suffix, LanguageTypeMapper, ResolvedType};
use crate::core::config::{EntityOptions, TargetKind};
use crate::core::schema::{Column, TableDescriptor};
use crate::core::naming::to_pascal_case;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// エンティティ生成結果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GeneratedEntity {
    /// 生成されたソースコード
    pub code: String,
    /// 生成時の警告
    pub warnings: Vec<String>,
}

/// エンティティジェネレータートレイト
pub trait EntityGenerator {
    /// 生成ターゲット
    fn target(&self) -> TargetKind;

    /// エンティティのソースコードを生成
    ///
    /// # Arguments
    ///
    /// * `table` - 変換元のテーブル記述子
    /// * `options` - 生成オプション
    ///
    /// # Returns
    ///
    /// 生成されたソースコードと警告
    fn generate(&self, table: &TableDescriptor, options: &EntityOptions) -> GeneratedEntity;
}

/// ターゲット種別に対応するジェネレーターを取得
pub fn generator_for(kind: TargetKind) -> Box<dyn EntityGenerator> {
    match kind {
        TargetKind::GoGorm => Box::new(GoGenerator::gorm()),
        TargetKind::GoStruct => Box::new(GoGenerator::plain()),
        TargetKind::JavaJpa => Box::new(JavaGenerator::jpa()),
        TargetKind::JavaPojo => Box::new(JavaGenerator::pojo()),
        TargetKind::TypeScriptInterface => Box::new(TypeScriptGenerator),
        TargetKind::PythonDataclass => Box::new(PythonGenerator::dataclass()),
        TargetKind::PythonSqlAlchemy => Box::new(PythonGenerator::sqlalchemy()),
    }
}

/// テーブル名から型名（PascalCase）を決定
///
/// 変換結果が空、または数字で始まる場合は `fallback_prefix` を前置します。
pub(crate) fn entity_type_name(table: &TableDescriptor, fallback_prefix: &str) -> String {
    let name = to_pascal_case(&table.table_name);
    if name.is_empty() {
        fallback_prefix.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", fallback_prefix, name)
    } else {
        name
    }
}

/// カラムの型を解決し、フォールバック時は警告を追加
pub(crate) fn resolve_type<M: LanguageTypeMapper>(
    mapper: &M,
    column: &Column,
    warnings: &mut Vec<String>,
) -> ResolvedType {
    let resolved = mapper.resolve(column);
    if resolved.is_fallback() {
        let (base, _) = split_array_suffix(&column.raw_type);
        debug!(column = %column.name, raw_type = %column.raw_type, "falling back to default type");
        warnings.push(format!(
            "Unrecognized type '{}' on column '{}'; using {}",
            base.to_uppercase(),
            column.name,
            mapper.fallback().name
        ));
    }
    resolved
}

/// 全カラムの型を解決し、必要なimportを収集
pub(crate) fn resolve_all<M: LanguageTypeMapper>(
    mapper: &M,
    table: &TableDescriptor,
    warnings: &mut Vec<String>,
) -> (Vec<ResolvedType>, BTreeSet<&'static str>) {
    let mut imports = BTreeSet::new();
    let types = table
        .columns
        .iter()
        .map(|column| {
            let resolved = resolve_type(mapper, column, warnings);
            imports.extend(resolved.imports.iter().copied());
            resolved
        })
        .collect();
    (types, imports)
}

/// ダブルクォートの文字列リテラル（Java / Python / TypeScript / Go 共通）
pub(crate) fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "\\\"")))
}

/// 識別子として使える文字以外を `_` に置換
pub(crate) fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// 一般的な識別子（英字または `_` で始まり、英数字と `_` のみ）か
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// 生成オプションに従ってフィールド名を決定（Go以外の言語向け）
pub(crate) fn field_name(column: &Column, options: &EntityOptions) -> String {
    if options.use_camel_case {
        let camel = crate::core::naming::to_camel_case(&column.name);
        if camel.is_empty() {
            column.name.clone()
        } else {
            camel
        }
    } else {
        column.name.clone()
    }
}
