//! 弹窗管理
//!
//! 弹窗是带 `modal` class 的元素，通过内联 `display` 打开或关闭。
//! 打开时锁定页面滚动并把焦点放在第一个输入框；关闭时重置其中的表单。

use markup5ever_rcdom::Handle;

use crate::parsers::html::{
    find_element_by_id, find_elements, find_elements_by_class, find_elements_by_tag, get_body,
    get_node_attr, get_node_name, get_style_property, has_class, remove_class, set_node_attr,
    set_style_property, set_text_content,
};
use crate::translation::config::constants;

pub const MODAL_CLASS: &str = "modal";

/// 重置时保留 `value` 的输入类型
const KEEP_VALUE_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// 弹窗管理器
#[derive(Debug, Clone)]
pub struct ModalManager {
    invalid_class: String,
}

impl ModalManager {
    pub fn new(invalid_class: impl Into<String>) -> Self {
        Self {
            invalid_class: invalid_class.into(),
        }
    }

    /// 打开弹窗，弹窗不存在时返回 `false`
    pub fn open(&self, document: &Handle, modal_id: &str) -> bool {
        let Some(modal) = find_element_by_id(document, modal_id) else {
            tracing::debug!("弹窗 #{} 不存在", modal_id);
            return false;
        };

        set_style_property(&modal, "display", "block");
        if let Some(body) = get_body(document) {
            set_style_property(&body, "overflow", "hidden");
        }
        focus_first_input(&modal);
        true
    }

    /// 关闭弹窗并重置其中的表单，弹窗不存在时返回 `false`
    ///
    /// 没有其他打开的弹窗时恢复页面滚动。
    pub fn close(&self, document: &Handle, modal_id: &str) -> bool {
        let Some(modal) = find_element_by_id(document, modal_id) else {
            tracing::debug!("弹窗 #{} 不存在", modal_id);
            return false;
        };

        self.hide(&modal);
        if open_modals(document).is_empty() {
            release_scroll(document);
        }
        true
    }

    /// 关闭所有打开的弹窗（Escape 键或点击遮罩），返回关闭的数量
    pub fn close_all(&self, document: &Handle) -> usize {
        let modals = open_modals(document);
        for modal in &modals {
            self.hide(modal);
        }
        release_scroll(document);

        tracing::debug!("关闭 {} 个弹窗", modals.len());
        modals.len()
    }

    /// 点击事件：目标是弹窗遮罩本身时关闭所有弹窗
    pub fn handle_click(&self, document: &Handle, target: &Handle) -> usize {
        if has_class(target, MODAL_CLASS) {
            self.close_all(document)
        } else {
            0
        }
    }

    pub fn is_open(&self, document: &Handle, modal_id: &str) -> bool {
        find_element_by_id(document, modal_id).is_some_and(|modal| is_displayed(&modal))
    }

    fn hide(&self, modal: &Handle) {
        set_style_property(modal, "display", "none");
        for form in find_elements_by_tag(modal, &["form"]) {
            self.reset_form(&form);
        }
    }

    /// 清空用户输入和校验标记（相当于 `form.reset()`）
    fn reset_form(&self, form: &Handle) {
        for field in find_elements_by_tag(form, &["input", "textarea"]) {
            match get_node_name(&field) {
                Some("textarea") => set_text_content(&field, ""),
                _ => {
                    let input_type = get_node_attr(&field, "type")
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    match input_type.as_str() {
                        "checkbox" | "radio" => set_node_attr(&field, "checked", None),
                        t if KEEP_VALUE_TYPES.contains(&t) => {}
                        _ => set_node_attr(&field, "value", None),
                    }
                }
            }
        }

        for marked in find_elements_by_class(form, &self.invalid_class) {
            remove_class(&marked, &self.invalid_class);
        }
    }
}

impl Default for ModalManager {
    fn default() -> Self {
        Self::new(constants::DEFAULT_INVALID_CLASS)
    }
}

fn open_modals(document: &Handle) -> Vec<Handle> {
    find_elements_by_class(document, MODAL_CLASS)
        .into_iter()
        .filter(is_displayed)
        .collect()
}

fn is_displayed(modal: &Handle) -> bool {
    get_style_property(modal, "display").is_some_and(|display| display != "none")
}

fn release_scroll(document: &Handle) {
    if let Some(body) = get_body(document) {
        set_style_property(&body, "overflow", "");
    }
}

/// 焦点通过 `autofocus` 表示，弹窗内只保留一个
fn focus_first_input(modal: &Handle) {
    for focused in find_elements(modal, |node| get_node_attr(node, "autofocus").is_some()) {
        set_node_attr(&focused, "autofocus", None);
    }

    let first = find_elements_by_tag(modal, &["input"])
        .into_iter()
        .find(|input| {
            !get_node_attr(input, "type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
        });
    if let Some(input) = first {
        set_node_attr(&input, "autofocus", Some(String::new()));
    }
}
