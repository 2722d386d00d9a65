// 命名ユーティリティ
//
// 設定ファイル名の単一ソースに加えて、
// ジェネレーターが使用する識別子のケース変換（snake_case / camelCase / PascalCase）を提供します。

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".tabula.yaml";

/// 識別子を単語に分割
///
/// `_` `-` 空白などの区切り文字と、camelCase の大文字境界で分割します。
/// 連続する大文字は略語として1単語に扱います（`HTTPServer` → `http`, `server`）。
/// 単語はすべて小文字で返します。
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = identifier.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // aB → a|B、ABc → A|Bc
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// 先頭文字を大文字にする
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// snake_case に変換
///
/// # Examples
/// ```
/// use tabula::core::naming::to_snake_case;
/// assert_eq!(to_snake_case("userName"), "user_name");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// ```
pub fn to_snake_case(identifier: &str) -> String {
    split_words(identifier).join("_")
}

/// camelCase に変換
///
/// # Examples
/// ```
/// use tabula::core::naming::to_camel_case;
/// assert_eq!(to_camel_case("user_name"), "userName");
/// assert_eq!(to_camel_case("created_at"), "createdAt");
/// ```
pub fn to_camel_case(identifier: &str) -> String {
    let words = split_words(identifier);
    let mut result = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            result.push_str(word);
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// PascalCase に変換
///
/// # Examples
/// ```
/// use tabula::core::naming::to_pascal_case;
/// assert_eq!(to_pascal_case("user_roles"), "UserRoles");
/// assert_eq!(to_pascal_case("users"), "Users");
/// ```
pub fn to_pascal_case(identifier: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|word| capitalize(word))
        .collect()
}
