// 方言ごとの構文記述子
//
// MySQL系とPostgreSQLで異なる字句・構文規則（識別子のクォート文字、コメント記法、
// 文字列のエスケープ、型名の終端キーワード、自動増分型）を小さな静的データとして表現します。
// パーサー本体は方言に依存せず、この記述子を参照して動作を切り替えます。

use crate::core::config::Dialect;

/// 方言構文記述子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectSyntax {
    /// 対象の方言
    pub dialect: Dialect,
    /// 識別子のクォート文字
    pub identifier_quotes: &'static [char],
    /// `#` 行コメントを受け付けるか
    pub hash_comments: bool,
    /// ブロックコメントのネストを許可するか
    pub nested_block_comments: bool,
    /// 文字列リテラル内のバックスラッシュエスケープ
    pub backslash_escapes: bool,
    /// `E'...'` エスケープ文字列
    pub escape_string_prefix: bool,
    /// `$tag$...$tag$` ドル引用符
    pub dollar_quotes: bool,
    /// カラム定義内の `COMMENT 'text'`
    pub inline_comments: bool,
    /// `COMMENT ON TABLE/COLUMN ... IS '...'` 文
    pub comment_on_statements: bool,
    /// テーブル単位の `INDEX` / `KEY` 定義
    pub table_level_indexes: bool,
    /// 型名の収集を終了するキーワード（小文字）
    pub type_stop_keywords: &'static [&'static str],
    /// 自動増分を意味する型名（小文字）
    pub identity_types: &'static [&'static str],
}

/// 両方言で共通の型名終端キーワード
const COMMON_STOP_KEYWORDS: &[&str] = &[
    "not",
    "null",
    "default",
    "primary",
    "unique",
    "references",
    "check",
    "constraint",
    "collate",
    "generated",
];

/// MySQL系の構文
pub const MYSQL: DialectSyntax = DialectSyntax {
    dialect: Dialect::MySQL,
    identifier_quotes: &['`', '"'],
    hash_comments: true,
    nested_block_comments: false,
    backslash_escapes: true,
    escape_string_prefix: false,
    dollar_quotes: false,
    inline_comments: true,
    comment_on_statements: false,
    table_level_indexes: true,
    type_stop_keywords: &[
        "unsigned",
        "signed",
        "zerofill",
        "binary",
        "auto_increment",
        "comment",
        "character",
        "charset",
        "on",
        "key",
        "as",
        "invisible",
        "visible",
        "storage",
        "column_format",
        "srid",
    ],
    identity_types: &["serial"],
};

/// PostgreSQLの構文
pub const POSTGRES: DialectSyntax = DialectSyntax {
    dialect: Dialect::PostgreSQL,
    identifier_quotes: &['"'],
    hash_comments: false,
    nested_block_comments: true,
    backslash_escapes: false,
    escape_string_prefix: true,
    dollar_quotes: true,
    inline_comments: false,
    comment_on_statements: true,
    table_level_indexes: false,
    type_stop_keywords: &["storage", "compression"],
    identity_types: &[
        "serial",
        "serial4",
        "bigserial",
        "serial8",
        "smallserial",
        "serial2",
    ],
};

impl DialectSyntax {
    /// 方言に対応する構文記述子を取得
    pub fn for_dialect(dialect: Dialect) -> &'static DialectSyntax {
        match dialect {
            Dialect::MySQL => &MYSQL,
            Dialect::PostgreSQL => &POSTGRES,
        }
    }

    /// 識別子のクォート文字かどうか
    pub fn is_identifier_quote(&self, c: char) -> bool {
        self.identifier_quotes.contains(&c)
    }

    /// 型名の収集を終了するキーワードかどうか
    pub fn is_type_stop_keyword(&self, word: &str) -> bool {
        let lower = word.to_ascii_lowercase();
        COMMON_STOP_KEYWORDS.contains(&lower.as_str())
            || self.type_stop_keywords.contains(&lower.as_str())
    }

    /// カラム制約の開始キーワードかどうか
    ///
    /// 型名の先頭語にはこちらのみを適用します（`CHARACTER(10)` などを型として受け付けるため）。
    pub fn is_constraint_keyword(&self, word: &str) -> bool {
        let lower = word.to_ascii_lowercase();
        COMMON_STOP_KEYWORDS.contains(&lower.as_str())
    }

    /// 自動増分を意味する型かどうか
    pub fn is_identity_type(&self, raw_type: &str) -> bool {
        self.identity_types.contains(&raw_type)
    }
}

/// 型名の正規化
///
/// 空白区切りの小文字型名を、マッピングテーブルのキーとなる表記に揃えます。
pub fn canonicalize_type_name(words: &str) -> String {
    let collapsed = words
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase();

    let canonical = match collapsed.as_str() {
        "character varying" | "char varying" | "national character varying"
        | "national varchar" | "nvarchar" => "varchar",
        "character" | "national character" | "national char" | "nchar" => "char",
        "timestamp without time zone" => "timestamp",
        "timestamp with time zone" => "timestamptz",
        "time without time zone" => "time",
        "time with time zone" => "timetz",
        "bit varying" => "varbit",
        "long varchar" => "mediumtext",
        "long varbinary" => "mediumblob",
        _ => return collapsed,
    };
    canonical.to_string()
}
