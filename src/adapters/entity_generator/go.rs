// Go エンティティジェネレーター
//
// テーブル記述子から Go の構造体を生成します。
// GORM イディオムでは gorm タグと TableName メソッドを出力します。

use super::{entity_type_name, resolve_all, EntityGenerator, GeneratedEntity};
use crate::adapters::type_mapping::{GoTypeMapper, ResolvedType};
use crate::core::config::{EntityOptions, TargetKind};
use crate::core::naming::{capitalize, split_words};
use crate::core::schema::{Column, TableDescriptor};

/// 既定のパッケージ名
const DEFAULT_PACKAGE: &str = "model";

/// 大文字で表記する頭字語
const INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id",
    "ip", "json", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp", "tls",
    "ttl", "udp", "ui", "uid", "uri", "url", "utf8", "uuid", "vm", "xml",
];

/// Go ジェネレーター
#[derive(Debug, Clone, Copy)]
pub struct GoGenerator {
    gorm: bool,
}

impl GoGenerator {
    /// GORMタグ付き構造体
    pub fn gorm() -> Self {
        Self { gorm: true }
    }

    /// プレーン構造体
    pub fn plain() -> Self {
        Self { gorm: false }
    }
}

/// Goのエクスポートされたフィールド名
///
/// 単語ごとに先頭を大文字にし、頭字語はすべて大文字にします。
///
/// # Examples
/// ```
/// use tabula::adapters::entity_generator::go::exported_name;
/// assert_eq!(exported_name("user_id"), "UserID");
/// assert_eq!(exported_name("avatar_url"), "AvatarURL");
/// assert_eq!(exported_name("created_at"), "CreatedAt");
/// ```
pub fn exported_name(identifier: &str) -> String {
    let name: String = split_words(identifier)
        .iter()
        .map(|word| {
            if INITIALISMS.contains(&word.as_str()) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect();

    if name.starts_with(|c: char| c.is_alphabetic()) {
        name
    } else {
        format!("X{}", name)
    }
}

impl EntityGenerator for GoGenerator {
    fn target(&self) -> TargetKind {
        if self.gorm {
            TargetKind::GoGorm
        } else {
            TargetKind::GoStruct
        }
    }

    fn generate(&self, table: &TableDescriptor, options: &EntityOptions) -> GeneratedEntity {
        let mut warnings = Vec::new();
        let (types, imports) = resolve_all(&GoTypeMapper, table, &mut warnings);
        let type_name = entity_type_name(table, "T");
        let mut code = String::new();

        if options.include_package {
            let package = options.package_name.as_deref().unwrap_or(DEFAULT_PACKAGE);
            code.push_str(&format!("package {}\n\n", package));
            match imports.len() {
                0 => {}
                1 => {
                    for import in &imports {
                        code.push_str(&format!("import \"{}\"\n\n", import));
                    }
                }
                _ => {
                    code.push_str("import (\n");
                    for import in &imports {
                        code.push_str(&format!("\t\"{}\"\n", import));
                    }
                    code.push_str(")\n\n");
                }
            }
        }

        if let Some(comment) = table.comment() {
            code.push_str(&format!("// {} {}\n", type_name, single_line(comment)));
        }
        code.push_str(&format!("type {} struct {{\n", type_name));
        for (column, resolved) in table.columns.iter().zip(&types) {
            if let Some(comment) = table.comment_for(column) {
                code.push_str(&format!("\t// {}\n", single_line(comment)));
            }
            code.push_str(&format!(
                "\t{} {}{}\n",
                self.field_name(column, options),
                self.field_type(table, column, resolved, options),
                self.tags(table, column, options)
            ));
        }
        code.push_str("}\n");

        if options.include_table_name {
            code.push_str(&format!(
                "\n// TableName returns the table name of {}.\nfunc ({}) TableName() string {{\n\treturn \"{}\"\n}}\n",
                type_name,
                type_name,
                table.table_name.replace('"', "\\\"")
            ));
        }

        GeneratedEntity { code, warnings }
    }
}

impl GoGenerator {
    fn field_name(&self, column: &Column, options: &EntityOptions) -> String {
        if options.use_camel_case {
            exported_name(&column.name)
        } else {
            let name = capitalize(&super::sanitize_identifier(&column.name));
            if name.starts_with(|c: char| c.is_alphabetic()) {
                name
            } else {
                format!("X{}", name)
            }
        }
    }

    fn field_type(
        &self,
        table: &TableDescriptor,
        column: &Column,
        resolved: &ResolvedType,
        options: &EntityOptions,
    ) -> String {
        let pointer = options.nullable_pointers
            && table.is_optional(column)
            && !resolved.name.starts_with("[]");
        if pointer {
            format!("*{}", resolved.name)
        } else {
            resolved.name.clone()
        }
    }

    /// 構造体タグを生成（タグがない場合は空文字列）
    fn tags(&self, table: &TableDescriptor, column: &Column, options: &EntityOptions) -> String {
        let mut tags = Vec::new();
        if self.gorm {
            tags.push(format!("gorm:\"{}\"", self.gorm_tag(table, column)));
        }
        if options.include_json_tag {
            tags.push(format!("json:\"{}\"", tag_value(&column.name)));
        }

        if tags.is_empty() {
            String::new()
        } else {
            format!(" `{}`", tags.join(" "))
        }
    }

    fn gorm_tag(&self, table: &TableDescriptor, column: &Column) -> String {
        let mut parts = vec![format!("column:{}", tag_value(&column.name))];

        if table.is_primary_key(&column.name) {
            parts.push("primaryKey".to_string());
        }
        if column.auto_increment {
            parts.push("autoIncrement".to_string());
        }
        if let Some(params) = column.type_params() {
            parts.push(format!("type:{}{}", column.raw_type, params));
        }
        if column.not_null && !table.is_primary_key(&column.name) {
            parts.push("not null".to_string());
        }
        if table.unique_keys.iter().any(|group| group.len() == 1 && group[0] == column.name) {
            parts.push("unique".to_string());
        }
        if let Some(default) = &column.default_value {
            parts.push(format!("default:{}", tag_value(default)));
        }
        if let Some(comment) = table.comment_for(column) {
            parts.push(format!("comment:{}", tag_value(comment)));
        }

        parts.join(";")
    }
}

/// タグ値に使えない文字（`"` `;` バッククォート、改行）を置換
fn tag_value(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '"' | '`' => '\'',
            ';' => ',',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
