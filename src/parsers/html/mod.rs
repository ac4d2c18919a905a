//! HTML解析和处理模块
//!
//! - `utils`: 基础常量和字符串工具
//! - `dom`: 基础DOM查询和修改（相当于浏览器的 DOM 接口）
//! - `metadata`: 文档元数据处理（字符编码、标题、语言声明）
//! - `serializer`: 序列化功能

pub mod dom;
pub mod metadata;
pub mod serializer;
pub mod utils;

pub use dom::{
    add_class, append_child, find_ancestor_by_name, find_element_by_id, find_elements,
    find_elements_by_class, find_elements_by_tag, find_nodes, get_body, get_child_node_by_name,
    get_document_element, get_node_attr, get_node_name, get_parent_node, get_style_property,
    get_text_content, has_class, html_to_dom, new_element, remove_class, remove_from_parent,
    set_node_attr, set_style_property, set_text_content, toggle_class,
};
pub use metadata::{get_charset, get_document_lang, get_title, set_document_lang, set_title};
pub use serializer::serialize_document;
pub use utils::{is_opaque_element, replace_first, WHITESPACES};
