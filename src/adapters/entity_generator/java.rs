// Java エンティティジェネレーター
//
// テーブル記述子から Java のクラスを生成します。
// JPA イディオムでは jakarta.persistence のアノテーションを付与し、
// POJO イディオムではフィールドとアクセサのみを出力します。

use super::{entity_type_name, field_name, resolve_all, sanitize_identifier, string_literal};
use super::{EntityGenerator, GeneratedEntity};
use crate::adapters::type_mapping::{JavaTypeMapper, ResolvedType, TypeFamily};
use crate::core::config::{EntityOptions, TargetKind};
use crate::core::naming::capitalize;
use crate::core::schema::{Column, TableDescriptor};
use std::collections::BTreeSet;

/// 既定のパッケージ名
const DEFAULT_PACKAGE: &str = "com.example.entity";

/// Javaの予約語
const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "var", "record", "yield",
];

/// Java ジェネレーター
#[derive(Debug, Clone, Copy)]
pub struct JavaGenerator {
    jpa: bool,
}

impl JavaGenerator {
    /// JPAアノテーション付きエンティティ
    pub fn jpa() -> Self {
        Self { jpa: true }
    }

    /// POJO
    pub fn pojo() -> Self {
        Self { jpa: false }
    }
}

/// 生成対象のフィールド
struct Field<'a> {
    column: &'a Column,
    name: String,
    java_type: String,
}

impl EntityGenerator for JavaGenerator {
    fn target(&self) -> TargetKind {
        if self.jpa {
            TargetKind::JavaJpa
        } else {
            TargetKind::JavaPojo
        }
    }

    fn generate(&self, table: &TableDescriptor, options: &EntityOptions) -> GeneratedEntity {
        let mut warnings = Vec::new();
        let (types, type_imports) = resolve_all(&JavaTypeMapper, table, &mut warnings);
        let class_name = entity_type_name(table, "T");

        let fields: Vec<Field> = table
            .columns
            .iter()
            .zip(&types)
            .map(|(column, resolved)| Field {
                column,
                name: java_field_name(column, options),
                java_type: resolved.name.clone(),
            })
            .collect();

        let primary_keys = table.distinct_primary_keys();
        if self.jpa && primary_keys.len() > 1 {
            warnings.push(format!(
                "Table '{}' has a composite primary key; add an @IdClass or @EmbeddedId to {}",
                table.table_name, class_name
            ));
        }

        let mut code = String::new();
        if options.include_package {
            let package = options.package_name.as_deref().unwrap_or(DEFAULT_PACKAGE);
            code.push_str(&format!("package {};\n\n", package));

            let imports = self.imports(table, &fields, type_imports, options);
            for import in &imports {
                code.push_str(&format!("import {};\n", import));
            }
            if !imports.is_empty() {
                code.push('\n');
            }
        }

        if let Some(comment) = table.comment() {
            code.push_str(&format!("/**\n * {}\n */\n", javadoc_text(comment)));
        }
        if self.jpa {
            code.push_str("@Entity\n");
            if options.include_table_name {
                code.push_str(&format!("@Table(name = {})\n", string_literal(&table.table_name)));
            }
        }
        code.push_str(&format!("public class {} {{\n", class_name));

        if !self.jpa && options.include_table_name {
            code.push_str(&format!(
                "\n    public static final String TABLE_NAME = {};\n",
                string_literal(&table.table_name)
            ));
        }

        for (field, resolved) in fields.iter().zip(&types) {
            code.push('\n');
            if let Some(comment) = table.comment_for(field.column) {
                code.push_str(&format!("    /** {} */\n", javadoc_text(comment)));
            }
            if self.jpa {
                for annotation in self.annotations(table, field, resolved) {
                    code.push_str(&format!("    {}\n", annotation));
                }
            }
            code.push_str(&format!("    private {} {};\n", field.java_type, field.name));
        }

        if options.include_getter_setter {
            for field in &fields {
                let accessor = capitalize(&field.name);
                code.push_str(&format!(
                    "\n    public {} get{}() {{\n        return {};\n    }}\n",
                    field.java_type, accessor, field.name
                ));
                code.push_str(&format!(
                    "\n    public void set{}({} {}) {{\n        this.{} = {};\n    }}\n",
                    accessor, field.java_type, field.name, field.name, field.name
                ));
            }
        }

        code.push_str("}\n");
        GeneratedEntity { code, warnings }
    }
}

impl JavaGenerator {
    /// 使用されているアノテーションと型のimport
    fn imports(
        &self,
        table: &TableDescriptor,
        fields: &[Field],
        type_imports: BTreeSet<&'static str>,
        options: &EntityOptions,
    ) -> Vec<String> {
        let mut imports: BTreeSet<String> =
            type_imports.into_iter().map(str::to_string).collect();

        if self.jpa {
            imports.insert("jakarta.persistence.Column".to_string());
            imports.insert("jakarta.persistence.Entity".to_string());
            if options.include_table_name {
                imports.insert("jakarta.persistence.Table".to_string());
            }
            for field in fields {
                if table.is_primary_key(&field.column.name) {
                    imports.insert("jakarta.persistence.Id".to_string());
                }
                if field.column.auto_increment {
                    imports.insert("jakarta.persistence.GeneratedValue".to_string());
                    imports.insert("jakarta.persistence.GenerationType".to_string());
                }
            }
        }

        imports.into_iter().collect()
    }

    /// フィールドに付与するJPAアノテーション
    fn annotations(&self, table: &TableDescriptor, field: &Field, resolved: &ResolvedType) -> Vec<String> {
        let column = field.column;
        let mut annotations = Vec::new();

        if table.is_primary_key(&column.name) {
            annotations.push("@Id".to_string());
        }
        if column.auto_increment {
            annotations.push("@GeneratedValue(strategy = GenerationType.IDENTITY)".to_string());
        }

        let mut attributes = vec![format!("name = {}", string_literal(&column.name))];
        if !table.is_optional(column) {
            attributes.push("nullable = false".to_string());
        }
        if table
            .unique_keys
            .iter()
            .any(|group| group.len() == 1 && group[0] == column.name)
        {
            attributes.push("unique = true".to_string());
        }
        match resolved.family {
            Some(TypeFamily::String) if resolved.name == "String" => {
                if let Some(length) = column.length.as_deref().filter(|l| is_number(l)) {
                    attributes.push(format!("length = {}", length));
                }
            }
            Some(TypeFamily::Decimal) => {
                if let Some(precision) = column.length.as_deref().filter(|l| is_number(l)) {
                    attributes.push(format!("precision = {}", precision));
                }
                if let Some(scale) = column.precision.as_deref().filter(|s| is_number(s)) {
                    attributes.push(format!("scale = {}", scale));
                }
            }
            _ => {}
        }
        annotations.push(format!("@Column({})", attributes.join(", ")));

        annotations
    }
}

/// Javaのフィールド名（予約語は末尾に `_` を付与）
fn java_field_name(column: &Column, options: &EntityOptions) -> String {
    let mut name = sanitize_identifier(&field_name(column, options));
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if JAVA_RESERVED.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Javadoc用にコメントを整形（`*/` を無効化）
fn javadoc_text(comment: &str) -> String {
    comment.lines().collect::<Vec<_>>().join(" ").replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Dialect;

    fn orders_table() -> TableDescriptor {
        let mut table = TableDescriptor::new(Dialect::PostgreSQL, "orders".to_string());
        table
            .columns
            .push(Column::new("id".to_string(), "bigserial".to_string()).auto_increment());
        table.columns.push(
            Column::new("total".to_string(), "numeric".to_string())
                .with_params(Some("10"), Some("2"))
                .not_null(),
        );
        table.columns.push(
            Column::new("customer_name".to_string(), "varchar".to_string())
                .with_params(Some("50"), None),
        );
        table
            .columns
            .push(Column::new("created_at".to_string(), "timestamp".to_string()));
        table.primary_keys.push("id".to_string());
        table.table_comment = "Orders".to_string();
        table
    }

    #[test]
    fn test_jpa_entity() {
        let options = EntityOptions {
            include_package: true,
            include_getter_setter: false,
            ..Default::default()
        };
        let result = JavaGenerator::jpa().generate(&orders_table(), &options);
        let code = &result.code;

        assert!(code.starts_with("package com.example.entity;\n\n"));
        assert!(code.contains("import jakarta.persistence.GeneratedValue;\n"));
        assert!(code.contains("import java.math.BigDecimal;\n"));
        assert!(code.contains("import java.time.LocalDateTime;\n"));
        assert!(code.contains("/**\n * Orders\n */\n@Entity\n@Table(name = \"orders\")\npublic class Orders {"));
        assert!(code.contains(
            "    @Id\n    @GeneratedValue(strategy = GenerationType.IDENTITY)\n    @Column(name = \"id\", nullable = false)\n    private Long id;"
        ));
        assert!(code.contains(
            "@Column(name = \"total\", nullable = false, precision = 10, scale = 2)\n    private BigDecimal total;"
        ));
        assert!(code.contains(
            "@Column(name = \"customer_name\", length = 50)\n    private String customerName;"
        ));
        assert!(!code.contains("getId"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_pojo_with_accessors() {
        let result = JavaGenerator::pojo().generate(&orders_table(), &EntityOptions::default());
        let code = &result.code;

        assert!(!code.contains("@Entity"));
        assert!(!code.contains("import "));
        assert!(code.contains("public static final String TABLE_NAME = \"orders\";"));
        assert!(code.contains("    public String getCustomerName() {\n        return customerName;\n    }"));
        assert!(code.contains(
            "    public void setCustomerName(String customerName) {\n        this.customerName = customerName;\n    }"
        ));
    }

    #[test]
    fn test_reserved_field_names() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "t".to_string());
        table
            .columns
            .push(Column::new("class".to_string(), "varchar".to_string()));
        let options = EntityOptions {
            include_getter_setter: false,
            ..Default::default()
        };

        let result = JavaGenerator::pojo().generate(&table, &options);
        assert!(result.code.contains("private String class_;"));
    }

    #[test]
    fn test_composite_key_warning() {
        let mut table = TableDescriptor::new(Dialect::MySQL, "user_roles".to_string());
        table
            .columns
            .push(Column::new("user_id".to_string(), "bigint".to_string()).not_null());
        table
            .columns
            .push(Column::new("role_id".to_string(), "bigint".to_string()).not_null());
        table.primary_keys = vec!["user_id".to_string(), "role_id".to_string()];

        let result = JavaGenerator::jpa().generate(&table, &EntityOptions::default());
        assert!(result.warnings.iter().any(|w| w.contains("composite primary key")));
        assert_eq!(result.code.matches("@Id").count(), 2);
    }
}
