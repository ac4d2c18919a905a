//! 可翻译位置收集器模块
//!
//! 按固定顺序枚举文档中可以被改写的文本位置。每次调用都从头枚举，
//! 不保留游标，因此对同一文档可以反复执行。

use std::collections::HashMap;

use markup5ever_rcdom::{Handle, NodeData};
use html5ever::tendril::StrTendril;

use crate::parsers::html::{
    find_elements, find_elements_by_tag, get_body, get_node_attr, get_node_name,
    get_text_content, is_opaque_element, set_node_attr, set_text_content,
};
use crate::parsers::html::utils::{BUTTON_INPUT_TYPES, PLACEHOLDER_ELEMENTS};

/// 可翻译位置类别，`ORDER` 即遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceKind {
    /// `<body>` 下的自由文本节点（不含 script/style 内容）
    TextNode,
    /// `input` / `textarea` 的 `placeholder` 属性
    Placeholder,
    /// `button` 元素文本以及 submit/button 类型 `input` 的 `value`
    Button,
    /// `a` 元素文本
    Link,
    /// `label` 元素文本
    Label,
    /// `th` 元素文本
    TableHeader,
    /// `option` 元素文本
    Option,
}

impl SurfaceKind {
    pub const ORDER: [SurfaceKind; 7] = [
        SurfaceKind::TextNode,
        SurfaceKind::Placeholder,
        SurfaceKind::Button,
        SurfaceKind::Link,
        SurfaceKind::Label,
        SurfaceKind::TableHeader,
        SurfaceKind::Option,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::TextNode => "text",
            SurfaceKind::Placeholder => "placeholder",
            SurfaceKind::Button => "button",
            SurfaceKind::Link => "link",
            SurfaceKind::Label => "label",
            SurfaceKind::TableHeader => "table-header",
            SurfaceKind::Option => "option",
        }
    }
}

/// 位置中文本的存放方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAccess {
    /// 文本节点本身的内容
    TextNode,
    /// 元素属性
    Attribute(&'static str),
    /// 元素的全部后代文本
    TextContent,
}

/// 单个可翻译位置
#[derive(Debug, Clone)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub access: SurfaceAccess,
    pub node: Handle,
}

impl Surface {
    /// 读取当前文本，属性不存在时返回 `None`
    pub fn read(&self) -> Option<String> {
        match self.access {
            SurfaceAccess::TextNode => match self.node.data {
                NodeData::Text { ref contents } => Some(contents.borrow().to_string()),
                _ => None,
            },
            SurfaceAccess::Attribute(name) => get_node_attr(&self.node, name),
            SurfaceAccess::TextContent => Some(get_text_content(&self.node)),
        }
    }

    /// 原地写入新文本
    pub fn write(&self, value: &str) {
        match self.access {
            SurfaceAccess::TextNode => {
                if let NodeData::Text { ref contents } = self.node.data {
                    *contents.borrow_mut() = StrTendril::from_slice(value);
                }
            }
            SurfaceAccess::Attribute(name) => {
                set_node_attr(&self.node, name, Some(value.to_string()))
            }
            SurfaceAccess::TextContent => set_text_content(&self.node, value),
        }
    }
}

/// 收集统计信息
#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    pub nodes_visited: usize,
    pub opaque_elements_skipped: usize,
    pub surfaces_by_kind: HashMap<SurfaceKind, usize>,
}

impl CollectionStats {
    pub fn reset(&mut self) {
        *self = Default::default();
    }

    pub fn total_surfaces(&self) -> usize {
        self.surfaces_by_kind.values().sum()
    }
}

/// 可翻译位置收集器
#[derive(Debug, Default)]
pub struct SurfaceCollector {
    stats: CollectionStats,
}

impl SurfaceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按固定顺序收集全部位置（文档快照）
    pub fn collect(&mut self, document: &Handle) -> Vec<Surface> {
        self.stats.reset();
        SurfaceKind::ORDER
            .iter()
            .flat_map(|kind| self.collect_kind(document, *kind))
            .collect()
    }

    /// 收集单一类别的位置
    pub fn collect_kind(&mut self, document: &Handle, kind: SurfaceKind) -> Vec<Surface> {
        let surfaces = match kind {
            SurfaceKind::TextNode => self.collect_text_nodes(document),
            SurfaceKind::Placeholder => find_elements(document, |node| {
                get_node_name(node).is_some_and(|name| PLACEHOLDER_ELEMENTS.contains(&name))
                    && get_node_attr(node, "placeholder").is_some()
            })
            .into_iter()
            .map(|node| Surface {
                kind,
                access: SurfaceAccess::Attribute("placeholder"),
                node,
            })
            .collect(),
            SurfaceKind::Button => find_elements(document, |node| {
                match get_node_name(node) {
                    Some("button") => true,
                    Some("input") => is_button_input(node),
                    _ => false,
                }
            })
            .into_iter()
            .map(|node| {
                let access = if get_node_name(&node) == Some("input") {
                    SurfaceAccess::Attribute("value")
                } else {
                    SurfaceAccess::TextContent
                };
                Surface { kind, access, node }
            })
            .collect(),
            SurfaceKind::Link => self.element_text_surfaces(document, "a", kind),
            SurfaceKind::Label => self.element_text_surfaces(document, "label", kind),
            SurfaceKind::TableHeader => self.element_text_surfaces(document, "th", kind),
            SurfaceKind::Option => self.element_text_surfaces(document, "option", kind),
        };

        *self.stats.surfaces_by_kind.entry(kind).or_insert(0) += surfaces.len();
        surfaces
    }

    /// 获取收集统计信息
    pub fn get_stats(&self) -> &CollectionStats {
        &self.stats
    }

    fn element_text_surfaces(&self, document: &Handle, tag: &str, kind: SurfaceKind) -> Vec<Surface> {
        find_elements_by_tag(document, &[tag])
            .into_iter()
            .map(|node| Surface {
                kind,
                access: SurfaceAccess::TextContent,
                node,
            })
            .collect()
    }

    fn collect_text_nodes(&mut self, document: &Handle) -> Vec<Surface> {
        let mut surfaces = Vec::new();
        match get_body(document) {
            Some(body) => self.collect_text_recursive(&body, &mut surfaces),
            None => tracing::debug!("文档没有 <body>，跳过文本节点"),
        }
        surfaces
    }

    fn collect_text_recursive(&mut self, node: &Handle, surfaces: &mut Vec<Surface>) {
        self.stats.nodes_visited += 1;

        match node.data {
            NodeData::Text { .. } => surfaces.push(Surface {
                kind: SurfaceKind::TextNode,
                access: SurfaceAccess::TextNode,
                node: node.clone(),
            }),
            NodeData::Element { ref name, .. } if is_opaque_element(name.local.as_ref()) => {
                self.stats.opaque_elements_skipped += 1;
            }
            _ => {
                for child in node.children.borrow().iter() {
                    self.collect_text_recursive(child, surfaces);
                }
            }
        }
    }
}

fn is_button_input(node: &Handle) -> bool {
    get_node_attr(node, "type")
        .map(|input_type| {
            BUTTON_INPUT_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(input_type.trim()))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::html_to_dom;

    const PAGE: &str = r#"<html><head><title>Clients</title><style>th { color: red }</style></head>
<body>
<script>var label = "Nom";</script>
<h1>Gestion des Clients</h1>
<input class="search-input" placeholder="Rechercher un client..." required>
<textarea placeholder="Note"></textarea>
<input type="submit" value="Enregistrer"><input type="text" value="Nom">
<button>Ajouter</button>
<a href="/logout">Déconnexion</a>
<label for="nom">Nom</label>
<table><tr><th>Nom</th></tr></table>
<select><option>Actif</option></select>
</body></html>"#;

    #[test]
    fn test_collects_in_fixed_order() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let mut collector = SurfaceCollector::new();
        let surfaces = collector.collect(&dom.document);

        let kinds: Vec<SurfaceKind> = surfaces.iter().map(|s| s.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted, "surfaces must follow SurfaceKind::ORDER");

        let stats = collector.get_stats();
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::Placeholder], 2);
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::Button], 2);
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::Link], 1);
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::Label], 1);
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::TableHeader], 1);
        assert_eq!(stats.surfaces_by_kind[&SurfaceKind::Option], 1);
        assert_eq!(stats.opaque_elements_skipped, 1);
    }

    #[test]
    fn test_script_text_is_not_collected() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let mut collector = SurfaceCollector::new();
        let texts: Vec<String> = collector
            .collect_kind(&dom.document, SurfaceKind::TextNode)
            .iter()
            .filter_map(Surface::read)
            .collect();

        assert!(texts.iter().any(|t| t == "Gestion des Clients"));
        assert!(!texts.iter().any(|t| t.contains("var label")));
        assert!(!texts.iter().any(|t| t.contains("color: red")));
    }

    #[test]
    fn test_text_input_value_is_not_a_button() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let mut collector = SurfaceCollector::new();
        let values: Vec<String> = collector
            .collect_kind(&dom.document, SurfaceKind::Button)
            .iter()
            .filter_map(Surface::read)
            .collect();

        assert_eq!(values, vec!["Enregistrer".to_string(), "Ajouter".to_string()]);
    }
}
