//! HTML 文档元数据处理模块
//!
//! 此模块提供语言切换所需的文档级元数据操作：
//! - 处理字符编码声明（决定输出编码）
//! - 读取和改写文档标题
//! - 读取和设置 `<html lang>` 声明

use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};

use super::dom::{
    find_nodes, get_document_element, get_node_attr, set_node_attr, set_text_content,
};

/// 获取文档字符编码
///
/// 支持 HTML5 格式 `<meta charset="utf-8">` 和 HTML4 格式
/// `<meta http-equiv="content-type" content="text/html; charset=utf-8">`。
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, vec!["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(content) = get_node_attr(meta_node, "content") {
                let charset = content
                    .split(';')
                    .filter_map(|part| part.trim().split_once('='))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
                    .map(|(_, value)| value.trim().trim_matches('"').to_string());
                if charset.is_some() {
                    return charset;
                }
            }
        }
    }

    None
}

/// 获取文档标题
pub fn get_title(node: &Handle) -> Option<String> {
    for title_node in find_nodes(node, vec!["html", "head", "title"]).iter() {
        for child_node in title_node.children.borrow().iter() {
            if let NodeData::Text { ref contents } = child_node.data {
                return Some(contents.borrow().to_string());
            }
        }
    }

    None
}

/// 设置文档标题，没有 `<title>` 元素时不做任何事
pub fn set_title(node: &Handle, title: &str) -> bool {
    let Some(title_node) = find_nodes(node, vec!["html", "head", "title"])
        .into_iter()
        .next()
    else {
        return false;
    };

    let existing_text = title_node
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Text { .. }))
        .cloned();

    match existing_text {
        Some(text_node) => {
            if let NodeData::Text { ref contents } = text_node.data {
                *contents.borrow_mut() = StrTendril::from_slice(title);
            }
        }
        None => set_text_content(&title_node, title),
    }

    true
}

/// 获取 `<html lang>` 声明
pub fn get_document_lang(document: &Handle) -> Option<String> {
    get_document_element(document).and_then(|html| get_node_attr(&html, "lang"))
}

/// 设置 `<html lang>` 声明
pub fn set_document_lang(document: &Handle, lang: &str) -> bool {
    match get_document_element(document) {
        Some(html) => {
            set_node_attr(&html, "lang", Some(lang.to_string()));
            true
        }
        None => false,
    }
}
