//! 客户批量选择与批量删除

use markup5ever_rcdom::Handle;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::notification::{Notifier, Severity, CLIENTS_SLOT};
use crate::parsers::html::{
    append_child, find_ancestor_by_name, find_element_by_id, find_elements,
    find_elements_by_class, get_node_attr, get_node_name, get_text_content, has_class, set_node_attr,
    set_style_property, set_text_content,
};
use crate::translation::config::constants;
use crate::translation::error::{LangError, LangResult};

pub const CHECKBOX_CLASS: &str = "client-checkbox";
pub const NAME_CLASS: &str = "client-name";
pub const ACTIONS_BAR_ID: &str = "bulkActionsBar";
pub const SELECTED_COUNT_ID: &str = "selectedCount";
pub const SELECT_ALL_ID: &str = "selectAll";
pub const UNKNOWN_CLIENT: &str = "Unknown";

pub const NOTHING_SELECTED_MESSAGE: &str = "No clients selected for deletion";
pub const MISSING_TOKEN_MESSAGE: &str = "CSRF token not found. Please refresh the page.";
pub const DELETE_FAILED_MESSAGE: &str = "An error occurred while deleting clients";
const DELETING_LABEL: &str = " Deleting...";
// 静态头名必须为小写
const CSRF_HEADER: &str = "x-csrftoken";

/// 被选中的客户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedClient {
    pub id: String,
    pub name: String,
}

/// 当前的勾选状态
#[derive(Debug, Clone, Default)]
pub struct BulkSelection {
    /// 页面上客户复选框的总数
    pub total: usize,
    pub selected: Vec<SelectedClient>,
}

impl BulkSelection {
    /// 读取文档中已勾选的客户复选框
    pub fn from_document(document: &Handle) -> Self {
        let checkboxes = find_elements_by_class(document, CHECKBOX_CLASS);
        let selected = checkboxes
            .iter()
            .filter(|checkbox| get_node_attr(checkbox, "checked").is_some())
            .map(|checkbox| SelectedClient {
                id: get_node_attr(checkbox, "value").unwrap_or_default(),
                name: row_client_name(checkbox),
            })
            .collect();

        Self {
            total: checkboxes.len(),
            selected,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().map(|c| c.id.clone()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.selected.iter().map(|c| c.name.as_str()).collect()
    }

    /// 删除前的确认文本
    pub fn confirm_message(&self) -> String {
        format!(
            "Are you sure you want to delete the following {} client(s)?\n\n{}\n\nThis action cannot be undone.",
            self.len(),
            self.names().join("\n")
        )
    }

    pub fn to_request(&self) -> BulkDeleteRequest {
        BulkDeleteRequest {
            client_ids: self.ids(),
        }
    }

    /// 更新操作栏、计数和全选框
    pub fn apply_to_document(&self, document: &Handle) {
        if let Some(bar) = find_element_by_id(document, ACTIONS_BAR_ID) {
            let display = if self.is_empty() { "none" } else { "flex" };
            set_style_property(&bar, "display", display);
        }

        if !self.is_empty() {
            if let Some(count) = find_element_by_id(document, SELECTED_COUNT_ID) {
                set_text_content(&count, &self.len().to_string());
            }
        }

        if let Some(select_all) = find_element_by_id(document, SELECT_ALL_ID) {
            let all_selected = self.total > 0 && self.len() == self.total;
            set_checked(&select_all, all_selected);
        }
    }
}

/// 全选或全部取消，返回新的选择状态
pub fn select_all(document: &Handle, checked: bool) -> BulkSelection {
    for checkbox in find_elements_by_class(document, CHECKBOX_CLASS) {
        set_checked(&checkbox, checked);
    }
    let selection = BulkSelection::from_document(document);
    selection.apply_to_document(document);
    selection
}

fn set_checked(node: &Handle, checked: bool) {
    set_node_attr(node, "checked", checked.then(String::new));
}

fn row_client_name(checkbox: &Handle) -> String {
    find_ancestor_by_name(checkbox, "tr")
        .and_then(|row| find_elements_by_class(&row, NAME_CLASS).into_iter().next())
        .map(|cell| get_text_content(&cell).trim().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// 查找 CSRF 令牌：先找 `[name=csrfmiddlewaretoken]` 的值，再找 `<meta name="csrf-token">`
pub fn find_csrf_token(document: &Handle) -> Option<String> {
    let from_input = find_elements(document, |node| {
        get_node_attr(node, "name").as_deref() == Some("csrfmiddlewaretoken")
    })
    .into_iter()
    .next()
    .and_then(|node| get_node_attr(&node, "value"))
    .filter(|token| !token.is_empty());

    from_input.or_else(|| {
        find_elements(document, |node| {
            get_node_name(node) == Some("meta")
                && get_node_attr(node, "name").as_deref() == Some("csrf-token")
        })
        .into_iter()
        .next()
        .and_then(|node| get_node_attr(&node, "content"))
        .filter(|token| !token.is_empty())
    })
}

/// 批量删除请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub client_ids: Vec<String>,
}

/// 批量删除响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// 批量删除接口客户端
#[derive(Debug, Clone)]
pub struct BulkDeleteClient {
    http: reqwest::Client,
    base_url: Url,
    endpoint: Url,
}

impl BulkDeleteClient {
    pub fn new(base_url: &str) -> LangResult<Self> {
        Self::with_endpoint(base_url, constants::DEFAULT_BULK_ENDPOINT)
    }

    pub fn with_endpoint(base_url: &str, endpoint: &str) -> LangResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LangError::NetworkError(format!("无法创建HTTP客户端: {}", e)))?;
        Self::with_http_client(http, base_url, endpoint)
    }

    /// 使用已配置的 HTTP 客户端
    pub fn with_http_client(http: reqwest::Client, base_url: &str, endpoint: &str) -> LangResult<Self> {
        let base_url = Url::parse(base_url)?;
        let endpoint = base_url.join(endpoint)?;

        Ok(Self {
            http,
            base_url,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// 发送删除请求
    pub async fn delete(
        &self,
        request: &BulkDeleteRequest,
        csrf_token: &str,
    ) -> LangResult<BulkDeleteResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            CSRF_HEADER,
            HeaderValue::from_str(csrf_token)
                .map_err(|e| LangError::NetworkError(format!("无效的CSRF令牌: {}", e)))?,
        );
        if let Ok(referer) = HeaderValue::from_str(self.base_url.as_str()) {
            headers.insert(REFERER, referer);
        }

        tracing::debug!(
            "POST {} ({} 个客户)",
            self.endpoint,
            request.client_ids.len()
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(headers)
            .body(serde_json::to_vec(request)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            LangError::NetworkError(format!("无法解析响应 (HTTP {}): {}", status, e))
        })
    }
}

/// 批量删除的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    NothingSelected,
    Cancelled,
    MissingToken,
    Deleted { message: String },
    Rejected { message: String },
    Failed { error: String },
}

/// 删除按钮的原始状态，用于失败后恢复
struct DeleteButton {
    node: Handle,
    children: Vec<Handle>,
    disabled: Option<String>,
}

impl DeleteButton {
    fn find(document: &Handle) -> Option<Self> {
        let container = find_elements_by_class(document, "bulk-actions-buttons")
            .into_iter()
            .next()?;
        let node = find_elements_by_class(&container, "btn-danger")
            .into_iter()
            .next()?;
        let children = node.children.borrow().clone();
        let disabled = get_node_attr(&node, "disabled");
        Some(Self {
            node,
            children,
            disabled,
        })
    }

    fn set_busy(&self) {
        set_text_content(&self.node, DELETING_LABEL);
        set_node_attr(&self.node, "disabled", Some(String::new()));
    }

    fn restore(&self) {
        set_text_content(&self.node, "");
        for child in &self.children {
            append_child(&self.node, child);
        }
        set_node_attr(&self.node, "disabled", self.disabled.clone());
    }
}

/// 执行批量删除流程
///
/// `confirm` 收到确认文本，返回 `false` 时取消。
pub async fn run_bulk_delete<F>(
    document: &Handle,
    client: &BulkDeleteClient,
    notifier: &Notifier,
    confirm: F,
) -> BulkOutcome
where
    F: FnOnce(&str) -> bool,
{
    let selection = BulkSelection::from_document(document);
    if selection.is_empty() {
        notifier.notify(CLIENTS_SLOT, NOTHING_SELECTED_MESSAGE, Severity::Error);
        return BulkOutcome::NothingSelected;
    }

    if !confirm(&selection.confirm_message()) {
        tracing::debug!("用户取消批量删除");
        return BulkOutcome::Cancelled;
    }

    let button = DeleteButton::find(document);
    if let Some(ref button) = button {
        button.set_busy();
    }
    let restore = || {
        if let Some(ref button) = button {
            button.restore();
        }
    };

    let Some(csrf_token) = find_csrf_token(document) else {
        notifier.notify(CLIENTS_SLOT, MISSING_TOKEN_MESSAGE, Severity::Error);
        restore();
        return BulkOutcome::MissingToken;
    };

    match client.delete(&selection.to_request(), &csrf_token).await {
        Ok(response) if response.success => {
            tracing::info!("批量删除 {} 个客户: {}", selection.len(), response.message);
            notifier.notify(CLIENTS_SLOT, &response.message, Severity::Success);
            BulkOutcome::Deleted {
                message: response.message,
            }
        }
        Ok(response) => {
            tracing::warn!("服务器拒绝批量删除: {}", response.message);
            notifier.notify(CLIENTS_SLOT, &response.message, Severity::Error);
            restore();
            BulkOutcome::Rejected {
                message: response.message,
            }
        }
        Err(e) => {
            tracing::error!("批量删除失败: {}", e);
            notifier.notify(CLIENTS_SLOT, DELETE_FAILED_MESSAGE, Severity::Error);
            restore();
            BulkOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// 按钮当前是否被禁用
pub fn is_disabled(node: &Handle) -> bool {
    get_node_attr(node, "disabled").is_some() || has_class(node, "disabled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{get_style_property, html_to_dom};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    const PAGE: &str = r#"<html><head><meta name="csrf-token" content="meta-token"></head><body>
<div id="bulkActionsBar" style="display: none;"><span id="selectedCount">0</span>
  <div class="bulk-actions-buttons"><button class="btn btn-danger" id="del"><i class="fa-solid fa-trash"></i> Delete</button></div>
</div>
<input type="checkbox" id="selectAll">
<table>
<tr><td><input type="checkbox" class="client-checkbox" value="7" checked></td><td class="client-name"> Marie Curie </td></tr>
<tr><td><input type="checkbox" class="client-checkbox" value="9" checked></td><td>no name cell</td></tr>
<tr><td><input type="checkbox" class="client-checkbox" value="11"></td><td class="client-name">Louis</td></tr>
</table>
</body></html>"#;

    /// 只应答一次的 HTTP 服务，返回收到的原始请求
    fn one_shot_server(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}/", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if received.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&received).to_string()).unwrap();
        });

        (address, rx)
    }

    fn local_client(address: &str) -> BulkDeleteClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        BulkDeleteClient::with_http_client(http, address, constants::DEFAULT_BULK_ENDPOINT).unwrap()
    }

    #[test]
    fn test_selection_reads_checked_rows() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let selection = BulkSelection::from_document(&dom.document);

        assert_eq!(selection.total, 3);
        assert_eq!(selection.ids(), vec!["7", "9"]);
        assert_eq!(selection.names(), vec!["Marie Curie", "Unknown"]);
        assert_eq!(
            selection.confirm_message(),
            "Are you sure you want to delete the following 2 client(s)?\n\nMarie Curie\nUnknown\n\nThis action cannot be undone."
        );
    }

    #[test]
    fn test_apply_to_document_updates_bar_and_select_all() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let doc = &dom.document;

        BulkSelection::from_document(doc).apply_to_document(doc);
        let bar = find_element_by_id(doc, ACTIONS_BAR_ID).unwrap();
        assert_eq!(get_style_property(&bar, "display").as_deref(), Some("flex"));
        let count = find_element_by_id(doc, SELECTED_COUNT_ID).unwrap();
        assert_eq!(get_text_content(&count), "2");
        let all = find_element_by_id(doc, SELECT_ALL_ID).unwrap();
        assert!(get_node_attr(&all, "checked").is_none());

        let selection = select_all(doc, true);
        assert_eq!(selection.len(), 3);
        assert!(get_node_attr(&all, "checked").is_some());

        let selection = select_all(doc, false);
        assert!(selection.is_empty());
        assert_eq!(get_style_property(&bar, "display").as_deref(), Some("none"));
        assert!(get_node_attr(&all, "checked").is_none());
    }

    #[test]
    fn test_csrf_token_prefers_form_input() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        assert_eq!(find_csrf_token(&dom.document).as_deref(), Some("meta-token"));

        let dom = html_to_dom(
            br#"<html><head><meta name="csrf-token" content="meta-token"></head><body><form><input type="hidden" name="csrfmiddlewaretoken" value="form-token"></form></body></html>"#,
            "utf-8",
        )
        .unwrap();
        assert_eq!(find_csrf_token(&dom.document).as_deref(), Some("form-token"));

        let dom = html_to_dom(b"<html><body></body></html>", "utf-8").unwrap();
        assert_eq!(find_csrf_token(&dom.document), None);
    }

    #[test]
    fn test_endpoint_is_joined_to_base() {
        let client = BulkDeleteClient::new("http://clinic.local:8000/app/").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://clinic.local:8000/bulk-delete/clients/"
        );
        assert!(BulkDeleteClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_nothing_selected_notifies_error() {
        let dom = html_to_dom(b"<html><body></body></html>", "utf-8").unwrap();
        let client = local_client("http://127.0.0.1:9/");
        let notifier = Notifier::default();

        let outcome = run_bulk_delete(&dom.document, &client, &notifier, |_| true).await;

        assert_eq!(outcome, BulkOutcome::NothingSelected);
        assert_eq!(notifier.active()[0].message, NOTHING_SELECTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_successful_delete_posts_ids_with_token() {
        let (address, requests) =
            one_shot_server("200 OK", r#"{"success": true, "message": "2 clients deleted"}"#);
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let client = local_client(&address);
        let notifier = Notifier::default();

        let outcome = run_bulk_delete(&dom.document, &client, &notifier, |_| true).await;

        assert_eq!(
            outcome,
            BulkOutcome::Deleted {
                message: "2 clients deleted".to_string()
            }
        );
        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /bulk-delete/clients/"));
        assert!(request.to_lowercase().contains("x-csrftoken: meta-token"));
        assert!(request.contains(r#"{"client_ids":["7","9"]}"#));

        let button = find_element_by_id(&dom.document, "del").unwrap();
        assert!(is_disabled(&button));
        assert_eq!(notifier.active()[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_rejected_delete_restores_button() {
        let (address, _requests) =
            one_shot_server("400 Bad Request", r#"{"success": false, "message": "Invalid client IDs"}"#);
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let client = local_client(&address);
        let notifier = Notifier::default();

        let outcome = run_bulk_delete(&dom.document, &client, &notifier, |_| true).await;

        assert_eq!(
            outcome,
            BulkOutcome::Rejected {
                message: "Invalid client IDs".to_string()
            }
        );
        let button = find_element_by_id(&dom.document, "del").unwrap();
        assert!(!is_disabled(&button));
        assert_eq!(get_text_content(&button), " Delete");
    }

    #[tokio::test]
    async fn test_network_failure_notifies_and_restores() {
        // 绑定后立即释放端口，连接会被拒绝
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let client = local_client(&format!("http://127.0.0.1:{}/", port));
        let notifier = Notifier::default();

        let outcome = run_bulk_delete(&dom.document, &client, &notifier, |_| true).await;

        assert!(matches!(outcome, BulkOutcome::Failed { .. }));
        assert_eq!(notifier.active()[0].message, DELETE_FAILED_MESSAGE);
        let button = find_element_by_id(&dom.document, "del").unwrap();
        assert!(!is_disabled(&button));
    }

    #[tokio::test]
    async fn test_cancelled_confirmation_sends_nothing() {
        let dom = html_to_dom(PAGE.as_bytes(), "utf-8").unwrap();
        let client = local_client("http://127.0.0.1:9/");
        let notifier = Notifier::default();

        let outcome = run_bulk_delete(&dom.document, &client, &notifier, |message| {
            assert!(message.contains("Marie Curie"));
            false
        })
        .await;

        assert_eq!(outcome, BulkOutcome::Cancelled);
        assert!(notifier.active().is_empty());
    }
}
