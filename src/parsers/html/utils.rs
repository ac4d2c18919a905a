/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 内容永远不参与翻译的元素
pub const OPAQUE_ELEMENTS: &[&str] = &["script", "style"];

/// 带 `placeholder` 属性的表单元素
pub const PLACEHOLDER_ELEMENTS: &[&str] = &["input", "textarea"];

/// 以 `value` 作为可见文本的 `input` 类型
pub const BUTTON_INPUT_TYPES: &[&str] = &["submit", "button"];

/// 检查元素内容是否对翻译不透明
pub fn is_opaque_element(tag_name: &str) -> bool {
    OPAQUE_ELEMENTS
        .iter()
        .any(|opaque| opaque.eq_ignore_ascii_case(tag_name))
}

/// 替换第一次出现的子串，未出现时返回 `None`
pub fn replace_first(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    if needle.is_empty() {
        return None;
    }
    let start = haystack.find(needle)?;
    let mut result = String::with_capacity(haystack.len() - needle.len() + replacement.len());
    result.push_str(&haystack[..start]);
    result.push_str(replacement);
    result.push_str(&haystack[start + needle.len()..]);
    Some(result)
}
