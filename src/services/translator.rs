// 変換サービス
//
// DDLの解析、方言間のDDL変換、エンティティ生成をまとめた公開API。
// 呼び出しごとに独立しており、状態を保持しません。

use crate::adapters::entity_generator::{self, GeneratedEntity};
use crate::adapters::sql_generator::{self, GeneratedDdl};
use crate::core::config::{ConversionDirection, DdlOptions, Dialect, EntityOptions, TargetKind};
use crate::core::error::ParseError;
use crate::core::schema::TableDescriptor;
use crate::services::ddl_parser::DdlParser;
use tracing::debug;

/// DDLを解析して最初のテーブルの記述子を返す
///
/// # Arguments
///
/// * `ddl` - CREATE TABLE 文を含むテキスト
/// * `dialect` - 入力の方言
///
/// # Errors
///
/// CREATE TABLE 文が見つからない、括弧の対応が取れない、テーブル名がない場合
pub fn parse(ddl: &str, dialect: Dialect) -> Result<TableDescriptor, ParseError> {
    DdlParser::new(dialect).parse(ddl)
}

/// DDLを解析して全テーブルの記述子を入力順に返す
pub fn parse_all(ddl: &str, dialect: Dialect) -> Result<Vec<TableDescriptor>, ParseError> {
    DdlParser::new(dialect).parse_all(ddl)
}

/// テーブル記述子から変換先方言のDDLを生成
///
/// 記述子の方言が変換元と一致しない場合も生成は行い、警告を追加します。
pub fn generate_ddl(
    table: &TableDescriptor,
    direction: ConversionDirection,
    options: &DdlOptions,
) -> GeneratedDdl {
    let mut result = sql_generator::generator_for(direction).generate(table, options);
    if table.dialect != direction.source() {
        debug!(table = %table.table_name, %direction, "descriptor dialect does not match direction");
        result.warnings.insert(
            0,
            format!(
                "Table '{}' was parsed as {} but converted with {}",
                table.table_name, table.dialect, direction
            ),
        );
    }
    result
}

/// テーブル記述子からエンティティのソースコードを生成
pub fn generate_entity(
    table: &TableDescriptor,
    target: TargetKind,
    options: &EntityOptions,
) -> GeneratedEntity {
    entity_generator::generator_for(target).generate(table, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_MYSQL: &str = "CREATE TABLE `users` (`id` BIGINT NOT NULL AUTO_INCREMENT, `name` VARCHAR(100) NOT NULL COMMENT '用户名', `active` TINYINT(1) DEFAULT 1, PRIMARY KEY (`id`)) ENGINE=InnoDB COMMENT='用户表';";

    #[test]
    fn test_parse_then_generate_ddl() {
        let table = parse(USERS_MYSQL, Dialect::MySQL).unwrap();
        let result = generate_ddl(&table, ConversionDirection::MysqlToPg, &DdlOptions::default());

        assert!(result.sql.contains("id BIGSERIAL PRIMARY KEY"));
        assert_eq!(result.sql.matches("PRIMARY KEY").count(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_direction_mismatch_is_warned() {
        let table = parse(USERS_MYSQL, Dialect::MySQL).unwrap();
        let result = generate_ddl(&table, ConversionDirection::PgToMysql, &DdlOptions::default());
        assert!(result.warnings[0].contains("parsed as mysql"));
    }

    #[test]
    fn test_generate_entity_dispatch() {
        let table = parse(USERS_MYSQL, Dialect::MySQL).unwrap();
        let result = generate_entity(&table, TargetKind::TypeScriptInterface, &EntityOptions::default());
        assert!(result.code.starts_with("/** 用户表 */\nexport interface Users {"));
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        let error = parse("not a create table statement", Dialect::PostgreSQL).unwrap_err();
        assert!(error.is_missing_create_table());
        assert!(error.to_string().contains("CREATE TABLE"));
    }
}
