// テーブル記述子ドメインモデル
//
// パーサーが生成し、ジェネレーターが消費する正規化済みのテーブル表現。
// TableDescriptor と Column を提供します。
// 値オブジェクトであり、生成後に変更されることはありません。

use crate::core::config::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// テーブル記述子
///
/// 1つの `CREATE TABLE` 文を正規化した表現です。
/// カラムの順序は宣言順を保持します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    /// 解析元の方言
    pub dialect: Dialect,

    /// テーブル名（クォート・スキーマ修飾は除去済み）
    pub table_name: String,

    /// カラム定義のリスト（宣言順）
    pub columns: Vec<Column>,

    /// 主キーを構成するカラム名
    ///
    /// カラム単位の `PRIMARY KEY` とテーブル単位の `PRIMARY KEY (...)` の両方から追加されます。
    pub primary_keys: Vec<String>,

    /// ユニーク制約ごとのカラム名グループ
    pub unique_keys: Vec<Vec<String>>,

    /// インデックスごとのカラム名グループ（情報提供のみ）
    pub indexes: Vec<Vec<String>>,

    /// テーブルコメント（未指定なら空文字列）
    pub table_comment: String,

    /// カラムコメント（PostgreSQLの `COMMENT ON COLUMN` 由来）
    pub column_comments: BTreeMap<String, String>,

    /// 非致命的な警告
    pub warnings: Vec<String>,
}

impl TableDescriptor {
    /// 新しいテーブル記述子を作成
    pub fn new(dialect: Dialect, table_name: String) -> Self {
        Self {
            dialect,
            table_name,
            columns: Vec::new(),
            primary_keys: Vec::new(),
            unique_keys: Vec::new(),
            indexes: Vec::new(),
            table_comment: String::new(),
            column_comments: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// 指定されたカラムを取得
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 指定されたカラムが主キーに含まれるか
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == name)
    }

    /// 重複を除いた主キーカラム名（宣言順）
    pub fn distinct_primary_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for pk in &self.primary_keys {
            if !keys.contains(&pk.as_str()) {
                keys.push(pk);
            }
        }
        keys
    }

    /// カラムがnullable/optionalとして扱われるか
    ///
    /// NOT NULL 指定がなく、主キーにも含まれない場合に true を返します。
    pub fn is_optional(&self, column: &Column) -> bool {
        !column.not_null && !self.is_primary_key(&column.name)
    }

    /// カラムのコメントを取得
    ///
    /// カラム定義に直接付与されたコメントを優先し、
    /// なければ `column_comments` を参照します。空文字列は未指定として扱います。
    pub fn comment_for<'a>(&'a self, column: &'a Column) -> Option<&'a str> {
        column
            .comment
            .as_deref()
            .or_else(|| self.column_comments.get(&column.name).map(String::as_str))
            .filter(|c| !c.is_empty())
    }

    /// テーブルコメントを取得（空文字列はNone）
    pub fn comment(&self) -> Option<&str> {
        if self.table_comment.is_empty() {
            None
        } else {
            Some(&self.table_comment)
        }
    }
}

/// カラム定義
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// カラム名
    pub name: String,

    /// 型名（小文字・正規化済み。例: "varchar", "double precision"）
    pub raw_type: String,

    /// 第1型パラメータ（長さ・精度）
    pub length: Option<String>,

    /// 第2型パラメータ（スケール）
    pub precision: Option<String>,

    /// UNSIGNED指定（MySQLのみ）
    pub unsigned: bool,

    /// NOT NULL制約
    pub not_null: bool,

    /// 自動増分（AUTO_INCREMENT / SERIAL系 / IDENTITY）
    pub auto_increment: bool,

    /// デフォルト値（リテラル・式の生テキスト）
    pub default_value: Option<String>,

    /// カラムコメント
    pub comment: Option<String>,

    /// ENUM / SET のメンバー（クォート除去済み）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Column {
    /// 新しいカラムを作成
    pub fn new(name: String, raw_type: String) -> Self {
        Self {
            name,
            raw_type,
            ..Default::default()
        }
    }

    /// 長さ・精度を設定（ビルダー）
    pub fn with_params(mut self, length: Option<&str>, precision: Option<&str>) -> Self {
        self.length = length.map(str::to_string);
        self.precision = precision.map(str::to_string);
        self
    }

    /// NOT NULL を設定（ビルダー）
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// 自動増分を設定（ビルダー）
    ///
    /// 自動増分カラムは常に NOT NULL になります。
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self.not_null = true;
        self
    }

    /// デフォルト値を設定（ビルダー）
    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }

    /// コメントを設定（ビルダー）
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// 型パラメータを `(length[,precision])` 形式で取得
    pub fn type_params(&self) -> Option<String> {
        match (&self.length, &self.precision) {
            (Some(length), Some(precision)) => Some(format!("({},{})", length, precision)),
            (Some(length), None) => Some(format!("({})", length)),
            _ => None,
        }
    }

    /// `TINYINT(1)` かどうか（MySQLの慣習的な真偽値表現）
    pub fn is_tinyint_bool(&self) -> bool {
        self.raw_type == "tinyint" && self.length.as_deref() == Some("1")
    }
}
