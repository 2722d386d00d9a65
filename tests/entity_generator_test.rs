/// エンティティ生成のテスト
///
/// 解析結果から各言語のソースコードを生成し、主要な出力を確認します。

#[cfg(test)]
mod entity_generator_tests {
    use tabula::{generate_entity, parse, Dialect, EntityOptions, TargetKind};

    const USERS: &str = "CREATE TABLE `users` (`id` BIGINT NOT NULL AUTO_INCREMENT, `name` VARCHAR(100) NOT NULL COMMENT '用户名', `active` TINYINT(1) DEFAULT 1, PRIMARY KEY (`id`)) ENGINE=InnoDB COMMENT='用户表';";

    /// Go構造体（JSONタグ付き、package行なし）
    #[test]
    fn test_go_struct_with_json_tags() {
        let table = parse(USERS, Dialect::MySQL).unwrap();
        let options = EntityOptions {
            include_package: false,
            include_json_tag: true,
            ..Default::default()
        };
        let result = generate_entity(&table, TargetKind::GoStruct, &options);

        assert!(result.code.contains("type Users struct {\n"));
        assert!(result.code.contains("\tID int64 `json:\"id\"`\n"));
        assert!(result.code.contains("\tName string `json:\"name\"`\n"));
        assert!(result.code.contains("\tActive bool `json:\"active\"`\n"));
        assert!(!result.code.contains("package "));
        assert!(!result.code.contains("import "));
        assert!(result.warnings.is_empty());
    }

    /// package 行の出力
    #[test]
    fn test_go_package_and_imports() {
        let table = parse(
            "CREATE TABLE events (id BIGSERIAL PRIMARY KEY, happened_at TIMESTAMPTZ NOT NULL)",
            Dialect::PostgreSQL,
        )
        .unwrap();
        let options = EntityOptions {
            include_package: true,
            package_name: Some("store".to_string()),
            ..Default::default()
        };
        let result = generate_entity(&table, TargetKind::GoGorm, &options);

        assert!(result.code.starts_with("package store\n"));
        assert!(result.code.contains("import \"time\""));
        assert!(result.code.contains("HappenedAt time.Time"));
    }

    /// 未知の型は全ターゲットでフォールバックし、警告に型名が含まれる
    #[test]
    fn test_unknown_type_falls_back_for_every_target() {
        let table = parse("CREATE TABLE t (x MOOD NOT NULL, id INT)", Dialect::PostgreSQL).unwrap();

        for target in TargetKind::ALL {
            let result = generate_entity(&table, target, &EntityOptions::default());

            assert!(
                result.warnings.iter().any(|w| w.contains("MOOD")),
                "{} should warn about MOOD",
                target
            );
            assert!(
                result.code.contains('x') || result.code.contains('X'),
                "{} should emit the column",
                target
            );
        }
    }

    /// TypeScriptのオプショナル指定は NULL 許容かつ主キーでない場合のみ
    #[test]
    fn test_typescript_optionality_rule() {
        let table = parse(
            "CREATE TABLE t (id INT, label TEXT, total NUMERIC(10,2) NOT NULL, PRIMARY KEY (id))",
            Dialect::PostgreSQL,
        )
        .unwrap();
        let result = generate_entity(&table, TargetKind::TypeScriptInterface, &EntityOptions::default());

        assert!(result.code.contains(": number;\n"));
        assert!(result.code.contains("  label?: string;\n"));
        assert!(result.code.contains("  total: number;\n"));
    }

    /// JPAエンティティのアノテーション
    #[test]
    fn test_java_jpa_annotations() {
        let table = parse(USERS, Dialect::MySQL).unwrap();
        let result = generate_entity(&table, TargetKind::JavaJpa, &EntityOptions::default());

        assert!(result.code.contains("@Entity\n"));
        assert!(result.code.contains("@Table(name = \"users\")"));
        assert!(result.code.contains("@Id\n"));
        assert!(result.code.contains("@GeneratedValue(strategy = GenerationType.IDENTITY)"));
        assert!(result.code.contains("public class Users {"));
        assert!(result.code.contains("private Long id;"));
        assert!(result.code.contains("public String getName() {"));
    }

    /// getter/setter を出力しない Java POJO
    #[test]
    fn test_java_pojo_without_accessors() {
        let table = parse(USERS, Dialect::MySQL).unwrap();
        let options = EntityOptions {
            include_getter_setter: false,
            ..Default::default()
        };
        let result = generate_entity(&table, TargetKind::JavaPojo, &options);

        assert!(!result.code.contains("@Entity"));
        assert!(!result.code.contains("getName"));
        assert!(result.code.contains("private Boolean active;"));
    }

    /// Python dataclass と SQLAlchemy
    #[test]
    fn test_python_targets() {
        let table = parse(USERS, Dialect::MySQL).unwrap();

        let dataclass = generate_entity(&table, TargetKind::PythonDataclass, &EntityOptions::default());
        assert!(dataclass.code.contains("class Users:"));
        assert!(dataclass.code.contains("    id: int"));
        assert!(dataclass.code.contains("    active: Optional[bool] = None"));

        let mapped = generate_entity(&table, TargetKind::PythonSqlAlchemy, &EntityOptions::default());
        assert!(mapped.code.contains("class Users(Base):"));
        assert!(mapped.code.contains("__tablename__ = \"users\""));
        assert!(mapped.code.contains("primary_key=True"));
    }

    /// camelCase を無効にするとカラム名をそのまま使う
    #[test]
    fn test_snake_case_field_names() {
        let table = parse(
            "CREATE TABLE t (created_at TIMESTAMP NOT NULL)",
            Dialect::PostgreSQL,
        )
        .unwrap();
        let options = EntityOptions {
            use_camel_case: false,
            ..Default::default()
        };

        let ts = generate_entity(&table, TargetKind::TypeScriptInterface, &options);
        assert!(ts.code.contains("  created_at: Date;\n"));

        let camel = generate_entity(&table, TargetKind::TypeScriptInterface, &EntityOptions::default());
        assert!(camel.code.contains("  createdAt: Date;\n"));
    }

    /// 大文字小文字の異なる主キー指定のカラムも必須フィールドになる
    #[test]
    fn test_primary_key_with_different_case_is_required() {
        let table = parse(
            "CREATE TABLE t (Id INT, PRIMARY KEY (id))",
            Dialect::MySQL,
        )
        .unwrap();
        let result = generate_entity(&table, TargetKind::TypeScriptInterface, &EntityOptions::default());

        assert!(result.code.contains(": number;\n"));
        assert!(!result.code.contains("?:"));
    }
}
