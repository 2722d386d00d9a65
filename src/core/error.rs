// エラー型定義
//
// ライブラリ全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、ParseError（DDL解析の致命的エラー）と
// OptionError（方言名・ターゲット名などの不正な指定）を定義します。
// 警告（非致命的な通知）はエラー型ではなく、TableDescriptor や生成結果の
// `warnings` に文字列として蓄積されます。

use thiserror::Error;

/// エラー発生位置
///
/// 入力テキスト内の位置を表現します。
/// `line` と `column` は1始まり、`offset` は0始まりのバイトオフセットです。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorLocation {
    /// 行番号
    pub line: usize,
    /// 列番号（文字単位）
    pub column: usize,
    /// バイトオフセット
    pub offset: usize,
}

impl ErrorLocation {
    /// 新しいエラー位置を作成
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// ソーステキストとバイトオフセットから位置を算出
    ///
    /// オフセットが文字境界上にない場合は直前の文字境界に丸めます。
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let column = source[line_start..offset].chars().count() + 1;
        Self {
            line,
            column,
            offset,
        }
    }

    /// 位置情報をフォーマット
    pub fn format(&self) -> String {
        format!(" (line: {}, column: {})", self.line, self.column)
    }
}

/// DDL解析エラー
///
/// 入力全体の処理を中断する構造的な失敗を表現します。
/// 部分的なTableDescriptorは返されません。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// CREATE TABLE文が見つからない
    #[error("Input must be a valid CREATE TABLE statement: {message}{}", format_location(.location))]
    MissingCreateTable {
        /// エラーメッセージ
        message: String,
        /// エラー発生位置
        location: ErrorLocation,
    },

    /// カラム定義部の括弧が閉じていない、または存在しない
    #[error("Input must be a valid CREATE TABLE statement with a balanced column definition body: {message}{}", format_location(.location))]
    UnbalancedBody {
        /// エラーメッセージ
        message: String,
        /// エラー発生位置
        location: ErrorLocation,
    },

    /// テーブル名を抽出できない
    #[error("Unable to extract the table name from the CREATE TABLE header: {message}{}", format_location(.location))]
    MissingTableName {
        /// エラーメッセージ
        message: String,
        /// エラー発生位置
        location: ErrorLocation,
    },

    /// 字句解析エラー（閉じられていない文字列リテラルなど）
    #[error("Lexical error: {message}{}", format_location(.location))]
    Lexical {
        /// エラーメッセージ
        message: String,
        /// エラー発生位置
        location: ErrorLocation,
    },
}

impl ParseError {
    /// CREATE TABLE欠落エラーかどうか
    pub fn is_missing_create_table(&self) -> bool {
        matches!(self, ParseError::MissingCreateTable { .. })
    }

    /// 括弧不整合エラーかどうか
    pub fn is_unbalanced_body(&self) -> bool {
        matches!(self, ParseError::UnbalancedBody { .. })
    }

    /// テーブル名欠落エラーかどうか
    pub fn is_missing_table_name(&self) -> bool {
        matches!(self, ParseError::MissingTableName { .. })
    }

    /// 字句解析エラーかどうか
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical { .. })
    }

    /// エラー発生位置を取得
    pub fn location(&self) -> &ErrorLocation {
        match self {
            ParseError::MissingCreateTable { location, .. }
            | ParseError::UnbalancedBody { location, .. }
            | ParseError::MissingTableName { location, .. }
            | ParseError::Lexical { location, .. } => location,
        }
    }
}

/// 位置情報をフォーマットするヘルパー関数
fn format_location(location: &ErrorLocation) -> String {
    location.format()
}

/// オプション指定エラー
///
/// 文字列から方言・変換方向・ターゲット種別へ変換できない場合のエラーです。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported {kind}: '{value}'. Please specify one of: {expected}.")]
pub struct OptionError {
    /// 指定の種類（"dialect" など）
    pub kind: &'static str,
    /// 指定された値
    pub value: String,
    /// 受け付ける値の一覧
    pub expected: String,
}

impl OptionError {
    /// 新しいオプション指定エラーを作成
    pub fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}
