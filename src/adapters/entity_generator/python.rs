// Python エンティティジェネレーター
//
// テーブル記述子から Python のクラスを生成します。
// dataclass イディオムと、SQLAlchemy 2.0 の宣言的マッピング（Mapped / mapped_column）に対応します。
// フィールド名はカラム名の snake_case を維持します。

use super::{entity_type_name, resolve_all, sanitize_identifier, string_literal};
use super::{EntityGenerator, GeneratedEntity};
use crate::adapters::sql_generator::DefaultValue;
use crate::adapters::type_mapping::{split_array_suffix, PythonTypeMapper, ResolvedType, TypeFamily};
use crate::core::config::{EntityOptions, TargetKind};
use crate::core::schema::{Column, TableDescriptor};
use std::collections::BTreeSet;

/// Pythonの予約語
const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Python ジェネレーター
#[derive(Debug, Clone, Copy)]
pub struct PythonGenerator {
    sqlalchemy: bool,
}

impl PythonGenerator {
    /// dataclass
    pub fn dataclass() -> Self {
        Self { sqlalchemy: false }
    }

    /// SQLAlchemy 宣言的マッピング
    pub fn sqlalchemy() -> Self {
        Self { sqlalchemy: true }
    }
}

impl EntityGenerator for PythonGenerator {
    fn target(&self) -> TargetKind {
        if self.sqlalchemy {
            TargetKind::PythonSqlAlchemy
        } else {
            TargetKind::PythonDataclass
        }
    }

    fn generate(&self, table: &TableDescriptor, options: &EntityOptions) -> GeneratedEntity {
        let mut warnings = Vec::new();
        let (types, type_imports) = resolve_all(&PythonTypeMapper, table, &mut warnings);
        let code = if self.sqlalchemy {
            self.sqlalchemy_class(table, &types, type_imports, options)
        } else {
            self.dataclass_class(table, &types, type_imports, options)
        };
        GeneratedEntity { code, warnings }
    }
}

impl PythonGenerator {
    fn dataclass_class(
        &self,
        table: &TableDescriptor,
        types: &[ResolvedType],
        mut imports: BTreeSet<&'static str>,
        options: &EntityOptions,
    ) -> String {
        // 省略可能なフィールドの後に必須フィールドが続く場合はキーワード専用にする
        let mut seen_optional = false;
        let mut kw_only = false;
        for column in &table.columns {
            if table.is_optional(column) {
                seen_optional = true;
            } else if seen_optional {
                kw_only = true;
            }
        }
        if table.columns.iter().any(|c| table.is_optional(c)) {
            imports.insert("from typing import Optional");
        }
        imports.insert("from dataclasses import dataclass");

        let mut code = String::new();
        if options.include_package {
            code.push_str(&import_block(&imports));
            code.push_str("\n\n");
        }

        code.push_str(if kw_only {
            "@dataclass(kw_only=True)\n"
        } else {
            "@dataclass\n"
        });
        code.push_str(&format!("class {}:\n", entity_type_name(table, "T")));
        code.push_str(&class_docstring(table));

        if table.columns.is_empty() {
            code.push_str("    pass\n");
        }
        for (column, resolved) in table.columns.iter().zip(types) {
            let name = python_field_name(column);
            let line = if table.is_optional(column) {
                format!("    {}: Optional[{}] = None", name, resolved.name)
            } else {
                format!("    {}: {}", name, resolved.name)
            };
            code.push_str(&with_comment(line, table.comment_for(column)));
        }

        code
    }

    fn sqlalchemy_class(
        &self,
        table: &TableDescriptor,
        types: &[ResolvedType],
        mut imports: BTreeSet<&'static str>,
        options: &EntityOptions,
    ) -> String {
        let mut sqlalchemy_types = BTreeSet::new();
        let mut needs_text = false;
        let mut lines = Vec::new();

        for (column, resolved) in table.columns.iter().zip(types) {
            let name = python_field_name(column);
            let optional = table.is_optional(column);
            let annotation = if optional {
                format!("Mapped[Optional[{}]]", resolved.name)
            } else {
                format!("Mapped[{}]", resolved.name)
            };

            let mut arguments = Vec::new();
            if name != column.name {
                arguments.push(string_literal(&column.name));
            }
            arguments.push(sqlalchemy_type(column, resolved, &mut sqlalchemy_types));
            if table.is_primary_key(&column.name) {
                arguments.push("primary_key=True".to_string());
            }
            if column.auto_increment {
                arguments.push("autoincrement=True".to_string());
            }
            if table
                .unique_keys
                .iter()
                .any(|group| group.len() == 1 && group[0] == column.name)
            {
                arguments.push("unique=True".to_string());
            }
            if let Some(default) = &column.default_value {
                let (argument, uses_text) = server_default(default, table);
                needs_text |= uses_text;
                arguments.push(argument);
            }
            if let Some(comment) = table.comment_for(column) {
                arguments.push(format!("comment={}", string_literal(comment)));
            }

            lines.push(format!(
                "    {}: {} = mapped_column({})\n",
                name,
                annotation,
                arguments.join(", ")
            ));
        }

        if table.columns.iter().any(|c| table.is_optional(c)) {
            imports.insert("from typing import Optional");
        }
        imports.insert("from sqlalchemy.orm import DeclarativeBase, Mapped, mapped_column");

        let mut sqlalchemy_names: Vec<&str> = sqlalchemy_types.into_iter().collect();
        if needs_text {
            sqlalchemy_names.push("text");
        }
        let sqlalchemy_import = format!("from sqlalchemy import {}", sqlalchemy_names.join(", "));

        let mut code = String::new();
        if options.include_package {
            let mut block = import_block(&imports);
            if !sqlalchemy_names.is_empty() {
                block = insert_import(&block, &sqlalchemy_import);
            }
            code.push_str(&block);
            code.push_str("\n\nclass Base(DeclarativeBase):\n    pass\n\n\n");
        }

        code.push_str(&format!("class {}(Base):\n", entity_type_name(table, "T")));
        code.push_str(&class_docstring(table));
        code.push_str(&format!("    __tablename__ = {}\n", string_literal(&table.table_name)));
        if !lines.is_empty() {
            code.push('\n');
        }
        for line in lines {
            code.push_str(&line);
        }

        code
    }
}

/// SQLAlchemyのカラム型式を決定し、使用する型名を収集
fn sqlalchemy_type(
    column: &Column,
    resolved: &ResolvedType,
    used: &mut BTreeSet<&'static str>,
) -> String {
    let (_, dimensions) = split_array_suffix(&column.raw_type);
    let numeric = |text: &Option<String>| {
        text.as_deref()
            .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
    };

    let (name, arguments): (&'static str, Option<String>) = match resolved.family {
        Some(TypeFamily::Boolean) => ("Boolean", None),
        Some(TypeFamily::TinyInt | TypeFamily::SmallInt) => ("SmallInteger", None),
        Some(TypeFamily::Integer) => ("Integer", None),
        Some(TypeFamily::BigInt) => ("BigInteger", None),
        Some(TypeFamily::Decimal) => match (numeric(&column.length), numeric(&column.precision)) {
            (Some(p), Some(s)) => ("Numeric", Some(format!("{}, {}", p, s))),
            (Some(p), None) => ("Numeric", Some(p)),
            _ => ("Numeric", None),
        },
        Some(TypeFamily::Float) => ("Float", None),
        Some(TypeFamily::Double) => ("Double", None),
        Some(TypeFamily::String) => match numeric(&column.length) {
            Some(length) => ("String", Some(length)),
            None if column.raw_type.contains("text") => ("Text", None),
            None => ("String", None),
        },
        Some(TypeFamily::Uuid) => ("Uuid", None),
        Some(TypeFamily::Date) => ("Date", None),
        Some(TypeFamily::Time) => ("Time", None),
        Some(TypeFamily::DateTime) => (
            "DateTime",
            (column.raw_type == "timestamptz").then(|| "timezone=True".to_string()),
        ),
        Some(TypeFamily::Json) => ("JSON", None),
        Some(TypeFamily::Binary) => ("LargeBinary", None),
        None => ("String", None),
    };
    used.insert(name);

    let mut expression = match arguments {
        Some(arguments) => format!("{}({})", name, arguments),
        None => name.to_string(),
    };
    for _ in 0..dimensions {
        used.insert("ARRAY");
        expression = format!("ARRAY({})", expression);
    }
    expression
}

/// `server_default=` 引数を生成（`text()` を使用したかどうかも返す）
fn server_default(raw: &str, table: &TableDescriptor) -> (String, bool) {
    match DefaultValue::classify(raw, table.dialect) {
        DefaultValue::String(value) => (format!("server_default={}", string_literal(&value)), false),
        DefaultValue::Number(number) => (format!("server_default={}", string_literal(&number)), false),
        _ => (format!("server_default=text({})", string_literal(raw)), true),
    }
}

/// Pythonのフィールド名（予約語は末尾に `_` を付与）
fn python_field_name(column: &Column) -> String {
    let mut name = sanitize_identifier(&column.name);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if PYTHON_RESERVED.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

/// 標準ライブラリ → サードパーティの順にimport文を並べる
fn import_block(imports: &BTreeSet<&'static str>) -> String {
    let (third_party, standard): (Vec<&str>, Vec<&str>) = imports
        .iter()
        .copied()
        .partition(|line| line.starts_with("from sqlalchemy"));

    let mut groups = Vec::new();
    if !standard.is_empty() {
        groups.push(standard.join("\n"));
    }
    if !third_party.is_empty() {
        groups.push(third_party.join("\n"));
    }
    let mut block = groups.join("\n\n");
    block.push('\n');
    block
}

/// サードパーティのimportグループ先頭に1行追加
fn insert_import(block: &str, line: &str) -> String {
    match block.find("from sqlalchemy") {
        Some(pos) => format!("{}{}\n{}", &block[..pos], line, &block[pos..]),
        None => format!("{}\n{}\n", block.trim_end(), line),
    }
}

fn class_docstring(table: &TableDescriptor) -> String {
    match table.comment() {
        Some(comment) => format!(
            "    \"\"\"{}\"\"\"\n\n",
            comment.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
        ),
        None => String::new(),
    }
}

fn with_comment(line: String, comment: Option<&str>) -> String {
    match comment {
        Some(comment) => format!(
            "{}  # {}\n",
            line,
            comment.lines().collect::<Vec<_>>().join(" ")
        ),
        None => format!("{}\n", line),
    }
}
