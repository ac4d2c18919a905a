use std::cell::RefCell;
use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, StrTendril, TendrilSink};
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

use crate::translation::error::{LangError, LangResult};

use super::utils::WHITESPACES;

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> LangResult<RcDom> {
    let s: String = if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.to_string()
    } else {
        String::from_utf8_lossy(data).to_string()
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .map_err(|e| LangError::ParseError(format!("无法解析HTML: {}", e)))
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: Vec<&str>) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some(node_name) = node_names.first().copied() else {
        return found_nodes;
    };

    if node_names.len() == 1 {
        if let NodeData::Element { ref name, .. } = node.data {
            if &*name.local == node_name {
                found_nodes.push(node.clone());
            }
        }

        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    } else if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == node_name {
            let mut new_node_names = node_names;
            new_node_names.remove(0);
            found_nodes.append(&mut find_nodes(node, new_node_names));
        } else {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
            }
        }
    } else {
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    }

    found_nodes
}

/// 按文档顺序收集满足条件的元素
pub fn find_elements<F>(root: &Handle, predicate: F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    fn visit<F: Fn(&Handle) -> bool>(node: &Handle, predicate: &F, found: &mut Vec<Handle>) {
        if matches!(node.data, NodeData::Element { .. }) && predicate(node) {
            found.push(node.clone());
        }
        for child in node.children.borrow().iter() {
            visit(child, predicate, found);
        }
    }

    let mut found = Vec::new();
    visit(root, &predicate, &mut found);
    found
}

/// 按标签名收集元素（相当于 `querySelectorAll("a, b")`）
pub fn find_elements_by_tag(root: &Handle, tags: &[&str]) -> Vec<Handle> {
    find_elements(root, |node| {
        get_node_name(node).is_some_and(|name| tags.contains(&name))
    })
}

/// 按 class 收集元素
pub fn find_elements_by_class(root: &Handle, class_name: &str) -> Vec<Handle> {
    find_elements(root, |node| has_class(node, class_name))
}

/// 按 id 查找第一个元素
pub fn find_element_by_id(root: &Handle, id: &str) -> Option<Handle> {
    find_elements(root, |node| get_node_attr(node, "id").as_deref() == Some(id))
        .into_iter()
        .next()
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取 `<html>` 元素
pub fn get_document_element(document: &Handle) -> Option<Handle> {
    get_child_node_by_name(document, "html")
}

/// 获取 `<body>` 元素
pub fn get_body(document: &Handle) -> Option<Handle> {
    get_document_element(document).and_then(|html| get_child_node_by_name(&html, "body"))
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取父节点
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let weak = child.parent.take();
    let parent = weak.as_ref().and_then(|node| node.upgrade());
    child.parent.set(weak);
    parent
}

/// 向上查找最近的指定标签祖先（相当于 `closest(tag)`）
pub fn find_ancestor_by_name(node: &Handle, node_name: &str) -> Option<Handle> {
    let mut current = get_parent_node(node);
    while let Some(parent) = current {
        if get_node_name(&parent) == Some(node_name) {
            return Some(parent);
        }
        current = get_parent_node(&parent);
    }
    None
}

/// 设置节点属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.as_deref() {
                    attrs_mut[i].value.clear();
                    attrs_mut[i].value.push_slice(attr_value);
                } else {
                    // Remove attr completely if attr_value is not defined
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            // Add new attribute (since originally the target node didn't have it)
            if let Some(attr_value) = attr_value {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// 检查元素是否带有指定 class
pub fn has_class(node: &Handle, class_name: &str) -> bool {
    get_node_attr(node, "class")
        .map(|classes| classes.split(WHITESPACES).any(|c| c == class_name))
        .unwrap_or(false)
}

/// 添加 class（已存在时不重复）
pub fn add_class(node: &Handle, class_name: &str) {
    let classes = get_node_attr(node, "class").unwrap_or_default();
    let mut list: Vec<&str> = classes.split(WHITESPACES).filter(|c| !c.is_empty()).collect();
    if !list.contains(&class_name) {
        list.push(class_name);
        set_node_attr(node, "class", Some(list.join(" ")));
    }
}

/// 移除 class
pub fn remove_class(node: &Handle, class_name: &str) {
    if let Some(classes) = get_node_attr(node, "class") {
        if !classes.split(WHITESPACES).any(|c| c == class_name) {
            return;
        }
        let list: Vec<&str> = classes
            .split(WHITESPACES)
            .filter(|c| !c.is_empty() && *c != class_name)
            .collect();
        set_node_attr(node, "class", Some(list.join(" ")));
    }
}

/// 按条件切换 class
pub fn toggle_class(node: &Handle, class_name: &str, enabled: bool) {
    if enabled {
        add_class(node, class_name);
    } else {
        remove_class(node, class_name);
    }
}

/// 设置 `style` 属性中的单个声明，保留其余声明
///
/// `value` 为空时移除该声明，声明全部移除后删除 `style` 属性。
pub fn set_style_property(node: &Handle, property: &str, value: &str) {
    let style = get_node_attr(node, "style").unwrap_or_default();
    let mut declarations = parse_style_declarations(&style);

    let value = value.trim();
    match declarations
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(property))
    {
        Some(index) if value.is_empty() => {
            declarations.remove(index);
        }
        Some(index) => declarations[index].1 = value.to_string(),
        None if value.is_empty() => return,
        None => declarations.push((property.to_string(), value.to_string())),
    }

    if declarations.is_empty() {
        set_node_attr(node, "style", None);
        return;
    }

    let serialized: Vec<String> = declarations
        .iter()
        .map(|(name, val)| format!("{}: {};", name, val))
        .collect();
    set_node_attr(node, "style", Some(serialized.join(" ")));
}

/// 读取 `style` 属性中的单个声明
pub fn get_style_property(node: &Handle, property: &str) -> Option<String> {
    parse_style_declarations(&get_node_attr(node, "style")?)
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .map(|(_, value)| value)
}

/// 将内联样式拆分为 `(属性, 值)` 列表
///
/// 括号和引号内的 `;` 与 `:` 不作为分隔符，例如 `url("a;b")`。
fn parse_style_declarations(style: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.extend(split_declaration(&style[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.extend(split_declaration(&style[start..]));
    declarations
}

fn split_declaration(declaration: &str) -> Option<(String, String)> {
    let (name, value) = declaration.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// 获取节点的全部后代文本（相当于 `textContent`）
pub fn get_text_content(node: &Handle) -> String {
    fn collect(node: &Handle, out: &mut String) {
        match node.data {
            NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
            _ => {
                for child in node.children.borrow().iter() {
                    collect(child, out);
                }
            }
        }
    }

    let mut text = String::new();
    collect(node, &mut text);
    text
}

/// 用单个文本节点替换元素的全部子节点（相当于设置 `textContent`）
pub fn set_text_content(node: &Handle, text: &str) {
    if let NodeData::Text { ref contents } = node.data {
        *contents.borrow_mut() = StrTendril::from_slice(text);
        return;
    }

    for child in node.children.borrow().iter() {
        child.parent.set(None);
    }
    node.children.borrow_mut().clear();

    if !text.is_empty() {
        let text_node = Node::new(NodeData::Text {
            contents: RefCell::new(StrTendril::from_slice(text)),
        });
        append_child(node, &text_node);
    }
}

/// 追加子节点并维护父指针
pub fn append_child(parent: &Handle, child: &Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// 将节点从父节点中移除
pub fn remove_from_parent(node: &Handle) {
    if let Some(parent) = get_parent_node(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
        node.parent.set(None);
    }
}

/// 创建带属性的新元素
pub fn new_element(dom: &RcDom, tag: &str, attrs: &[(&str, &str)]) -> Handle {
    create_element(
        dom,
        QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(*name)),
                value: format_tendril!("{}", value),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").unwrap()
    }

    #[test]
    fn test_text_content_roundtrip() {
        let dom = parse("<html><body><a id=\"x\"> <b>Log</b>out </a></body></html>");
        let link = find_element_by_id(&dom.document, "x").unwrap();

        assert_eq!(get_text_content(&link), " Logout ");

        set_text_content(&link, " Déconnexion ");
        assert_eq!(get_text_content(&link), " Déconnexion ");
        assert_eq!(link.children.borrow().len(), 1);
        let child = link.children.borrow()[0].clone();
        assert!(Rc::ptr_eq(&get_parent_node(&child).unwrap(), &link));
    }

    #[test]
    fn test_class_helpers() {
        let dom = parse("<html><body><button id=\"b\" class=\"lang-btn active\">FR</button></body></html>");
        let button = find_element_by_id(&dom.document, "b").unwrap();

        assert!(has_class(&button, "active"));
        remove_class(&button, "active");
        assert!(!has_class(&button, "active"));
        assert_eq!(get_node_attr(&button, "class").as_deref(), Some("lang-btn"));

        add_class(&button, "active");
        add_class(&button, "active");
        assert_eq!(get_node_attr(&button, "class").as_deref(), Some("lang-btn active"));
    }

    #[test]
    fn test_set_style_property_keeps_other_declarations() {
        let dom = parse("<html><body><span id=\"s\" style=\"color: red; display: none\">Hi</span></body></html>");
        let span = find_element_by_id(&dom.document, "s").unwrap();

        set_style_property(&span, "display", "inline");
        assert_eq!(get_style_property(&span, "display").as_deref(), Some("inline"));
        assert_eq!(get_style_property(&span, "color").as_deref(), Some("red"));
    }

    #[test]
    fn test_style_values_with_semicolons_survive() {
        let dom = parse(
            r#"<html><body><div id="d" style="background: url('data:image/png;base64,AAA=') no-repeat; color: red"></div></body></html>"#,
        );
        let div = find_element_by_id(&dom.document, "d").unwrap();

        set_style_property(&div, "display", "block");

        assert_eq!(
            get_style_property(&div, "background").as_deref(),
            Some("url('data:image/png;base64,AAA=') no-repeat")
        );
        assert_eq!(get_style_property(&div, "color").as_deref(), Some("red"));
        assert_eq!(get_style_property(&div, "display").as_deref(), Some("block"));
    }

    #[test]
    fn test_empty_style_value_removes_declaration() {
        let dom = parse(r#"<html><body style="overflow: hidden"></body></html>"#);
        let body = get_body(&dom.document).unwrap();

        set_style_property(&body, "overflow", "");
        assert_eq!(get_style_property(&body, "overflow"), None);
        assert_eq!(get_node_attr(&body, "style"), None);

        set_style_property(&body, "overflow", "");
        assert_eq!(get_node_attr(&body, "style"), None);
    }

    #[test]
    fn test_find_ancestor_and_remove() {
        let dom = parse("<html><body><table><tr id=\"row\"><td><input id=\"c\"></td></tr></table></body></html>");
        let input = find_element_by_id(&dom.document, "c").unwrap();
        let row = find_ancestor_by_name(&input, "tr").unwrap();
        assert_eq!(get_node_attr(&row, "id").as_deref(), Some("row"));

        remove_from_parent(&input);
        assert!(find_element_by_id(&dom.document, "c").is_none());
    }
}
