//! # 解析器模块
//!
//! 这个模块包含HTML文档的解析、DOM查询修改和序列化功能。
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM操作、元数据处理

pub mod html;

// Re-export commonly used items for convenience
pub use html::{get_charset, html_to_dom, serialize_document};
