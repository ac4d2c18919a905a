//! 表单必填字段校验

use markup5ever_rcdom::Handle;

use crate::notification::{Notifier, Severity, ANIMALS_SLOT, CLIENTS_SLOT};
use crate::parsers::html::{
    find_element_by_id, find_elements, find_elements_by_tag, get_node_attr, get_node_name,
    get_text_content, toggle_class,
};
use crate::translation::config::constants;

pub const VALIDATION_FAILED_MESSAGE: &str = "Please fill in all required fields correctly";

/// 单个表单的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub form_id: Option<String>,
    /// 检查过的必填字段数量
    pub checked: usize,
    /// 为空的必填字段（name，其次 id，其次标签名）
    pub invalid_fields: Vec<String>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_fields.is_empty()
    }
}

/// 表单校验器
#[derive(Debug, Clone)]
pub struct FormValidator {
    invalid_class: String,
}

impl FormValidator {
    pub fn new(invalid_class: impl Into<String>) -> Self {
        Self {
            invalid_class: invalid_class.into(),
        }
    }

    /// 校验表单中所有带 `required` 的字段，空字段标记为无效，已填写的移除标记
    pub fn validate(&self, form: &Handle) -> FormReport {
        let mut report = FormReport {
            form_id: get_node_attr(form, "id"),
            checked: 0,
            invalid_fields: Vec::new(),
        };

        for field in find_elements(form, |node| get_node_attr(node, "required").is_some()) {
            report.checked += 1;
            let filled = !field_value(&field).trim().is_empty();
            toggle_class(&field, &self.invalid_class, !filled);

            if !filled {
                report.invalid_fields.push(field_label(&field));
            }
        }

        tracing::debug!(
            "表单 {:?}: {} 个必填字段，{} 个为空",
            report.form_id,
            report.checked,
            report.invalid_fields.len()
        );

        report
    }

    /// 按 id 校验文档中的表单，不存在的表单跳过
    ///
    /// 每个未通过校验的表单发出一条错误通知。
    pub fn validate_forms<S: AsRef<str>>(
        &self,
        document: &Handle,
        form_ids: &[S],
        notifier: &Notifier,
    ) -> Vec<FormReport> {
        let mut reports = Vec::new();

        for form_id in form_ids {
            let form_id = form_id.as_ref();
            let Some(form) = find_element_by_id(document, form_id) else {
                tracing::debug!("表单 #{} 不存在，跳过", form_id);
                continue;
            };

            let report = self.validate(&form);
            if !report.is_valid() {
                notifier.notify(slot_for_form(form_id), VALIDATION_FAILED_MESSAGE, Severity::Error);
            }
            reports.push(report);
        }

        reports
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(constants::DEFAULT_INVALID_CLASS)
    }
}

fn slot_for_form(form_id: &str) -> &'static str {
    if form_id.contains("Animal") {
        ANIMALS_SLOT
    } else {
        CLIENTS_SLOT
    }
}

/// 字段当前值（相当于 `field.value`）
fn field_value(field: &Handle) -> String {
    match get_node_name(field) {
        Some("textarea") => get_text_content(field),
        Some("select") => {
            let options = find_elements_by_tag(field, &["option"]);
            options
                .iter()
                .find(|option| get_node_attr(option, "selected").is_some())
                .or_else(|| options.first())
                .map(|option| {
                    get_node_attr(option, "value").unwrap_or_else(|| get_text_content(option))
                })
                .unwrap_or_default()
        }
        _ => get_node_attr(field, "value").unwrap_or_default(),
    }
}

fn field_label(field: &Handle) -> String {
    get_node_attr(field, "name")
        .or_else(|| get_node_attr(field, "id"))
        .unwrap_or_else(|| get_node_name(field).unwrap_or("field").to_string())
}
