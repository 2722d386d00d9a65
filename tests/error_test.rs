/// エラー型のテスト
///
/// 解析エラーのメッセージと位置情報、オプション指定エラーを確認します。

#[cfg(test)]
mod error_tests {
    use tabula::{parse, parse_all, ConversionDirection, Dialect, TargetKind};

    /// CREATE TABLE 文でない入力は解析エラーになる
    #[test]
    fn test_malformed_input_is_rejected() {
        for dialect in [Dialect::MySQL, Dialect::PostgreSQL] {
            let error = parse("not a create table statement", dialect).unwrap_err();

            assert!(error.is_missing_create_table());
            assert!(error.to_string().contains("valid CREATE TABLE statement"));
            assert!(parse_all("not a create table statement", dialect).is_err());
        }
    }

    /// エラーメッセージには行と列が含まれる
    #[test]
    fn test_error_message_includes_location() {
        let error = parse("CREATE TABLE t\n  (id INT, name TEXT", Dialect::PostgreSQL).unwrap_err();

        assert!(error.is_unbalanced_body());
        assert_eq!(error.location().line, 2);
        assert_eq!(error.location().column, 3);
        assert!(error.to_string().contains("line: 2"));
    }

    /// テーブル名のない CREATE TABLE
    #[test]
    fn test_missing_table_name() {
        let error = parse("CREATE TABLE IF NOT EXISTS (id INT)", Dialect::MySQL).unwrap_err();
        assert!(error.is_missing_table_name());
    }

    /// 未知のオプション値は受け付ける値を列挙する
    #[test]
    fn test_option_error_lists_expected_values() {
        let error = "oracle".parse::<Dialect>().unwrap_err();
        assert!(error.to_string().contains("'oracle'"));
        assert!(error.to_string().contains("mysql"));

        let error = "pg2oracle".parse::<ConversionDirection>().unwrap_err();
        assert!(error.to_string().contains("mysql2pg"));

        let error = "rust-struct".parse::<TargetKind>().unwrap_err();
        assert!(error.to_string().contains("typescript-interface"));
    }

    /// 同じ方言同士の変換は指定できない
    #[test]
    fn test_same_dialect_direction_is_rejected() {
        assert!(ConversionDirection::from_dialects(Dialect::MySQL, Dialect::MySQL).is_err());
        assert_eq!(
            ConversionDirection::from_dialects(Dialect::MySQL, Dialect::PostgreSQL).unwrap(),
            ConversionDirection::MysqlToPg
        );
    }

    /// CREATE TABLE を含まない入力は字句エラーではなく CREATE TABLE 欠落として扱う
    #[test]
    fn test_non_ddl_text_with_quote_reports_missing_create_table() {
        let error = parse("don't know what this is", Dialect::MySQL).unwrap_err();
        assert!(error.is_missing_create_table());
        assert!(error.to_string().contains("valid CREATE TABLE statement"));

        let error = parse("it's not a create table statement", Dialect::PostgreSQL).unwrap_err();
        assert!(error.is_missing_create_table());
    }

    /// CREATE TABLE 文の中の閉じられていない文字列は字句エラーのまま
    #[test]
    fn test_unterminated_string_inside_create_table_is_lexical() {
        let error = parse("CREATE TABLE t (a TEXT DEFAULT 'oops)", Dialect::PostgreSQL).unwrap_err();
        assert!(error.is_lexical());
        assert_eq!(error.location().column, 32);
    }
}
