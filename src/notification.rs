//! 通知模块
//!
//! 短暂显示、可被屏幕阅读器播报的提示消息。每个通知属于一个槽位（profile），
//! 自动消失由可取消的 tokio 任务完成；同一槽位的新通知会取消旧的消失任务并替换旧通知。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use markup5ever_rcdom::RcDom;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::parsers::html::{
    append_child, find_elements, get_body, get_node_attr, new_element, remove_from_parent,
    set_text_content,
};
use crate::translation::error::{LangError, LangResult};

/// 语言切换使用的槽位
pub const LANGUAGE_SLOT: &str = "language";
/// 客户管理页面使用的槽位
pub const CLIENTS_SLOT: &str = "clients";
/// 动物管理页面使用的槽位
pub const ANIMALS_SLOT: &str = "animals";
/// 商店购物车使用的槽位
pub const STORE_SLOT: &str = "store";

const DEFAULT_DISMISS_MS: u64 = 5000;

/// 通知严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "info-circle",
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-triangle",
        }
    }
}

/// 槽位配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationProfile {
    /// 自动消失延迟（毫秒）
    pub dismiss_after_ms: u64,
    /// 通知元素的基础 CSS class
    pub css_class: String,
}

impl NotificationProfile {
    pub fn new(dismiss_after_ms: u64, css_class: &str) -> Self {
        Self {
            dismiss_after_ms,
            css_class: css_class.to_string(),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    /// 各页面原有的通知设置
    pub fn defaults() -> HashMap<String, NotificationProfile> {
        HashMap::from([
            (
                LANGUAGE_SLOT.to_string(),
                NotificationProfile::new(DEFAULT_DISMISS_MS, "notification"),
            ),
            (
                CLIENTS_SLOT.to_string(),
                NotificationProfile::new(DEFAULT_DISMISS_MS, "notification"),
            ),
            (
                ANIMALS_SLOT.to_string(),
                NotificationProfile::new(DEFAULT_DISMISS_MS, "notification"),
            ),
            (
                STORE_SLOT.to_string(),
                NotificationProfile::new(3000, "cart-notification"),
            ),
        ])
    }
}

impl Default for NotificationProfile {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_MS, "notification")
    }
}

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub slot: String,
    pub message: String,
    pub severity: Severity,
    pub css_class: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct NotifierState {
    active: Vec<Notification>,
    pending: HashMap<String, (u64, JoinHandle<()>)>,
}

/// 通知发布器
#[derive(Clone)]
pub struct Notifier {
    profiles: Arc<HashMap<String, NotificationProfile>>,
    state: Arc<Mutex<NotifierState>>,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new(profiles: HashMap<String, NotificationProfile>) -> Self {
        Self {
            profiles: Arc::new(profiles),
            state: Arc::new(Mutex::new(NotifierState::default())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn profile(&self, slot: &str) -> NotificationProfile {
        self.profiles.get(slot).cloned().unwrap_or_else(|| {
            tracing::debug!("未配置的通知槽位 '{}'，使用默认设置", slot);
            NotificationProfile::default()
        })
    }

    /// 显示通知并安排自动消失，返回通知 id
    pub fn show(&self, slot: &str, message: impl Into<String>, severity: Severity) -> LangResult<u64> {
        let profile = self.profile(slot);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            slot: slot.to_string(),
            message: message.into(),
            severity,
            css_class: profile.css_class.clone(),
            created_at: Utc::now(),
        };

        tracing::info!(
            "[{}] {}: {}",
            slot,
            severity.as_str(),
            notification.message
        );

        let mut state = self.lock()?;

        // 同一槽位只保留最新的通知
        if let Some((old_id, task)) = state.pending.remove(slot) {
            task.abort();
            tracing::debug!("通知 {} 被 {} 替换，取消其消失任务", old_id, id);
        }
        state.active.retain(|n| n.slot != slot);
        state.active.push(notification);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::clone(&self.state);
                let slot_name = slot.to_string();
                let delay = profile.dismiss_after();
                let task = runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Ok(mut state) = shared.lock() {
                        state.active.retain(|n| n.id != id);
                        if state
                            .pending
                            .get(&slot_name)
                            .is_some_and(|(pending_id, _)| *pending_id == id)
                        {
                            state.pending.remove(&slot_name);
                        }
                    }
                });
                state.pending.insert(slot.to_string(), (id, task));
            }
            Err(_) => {
                tracing::debug!("没有异步运行时，通知 {} 需要手动关闭", id);
            }
        }

        Ok(id)
    }

    /// 显示通知；通知系统不可用时退回到阻塞式提示
    pub fn notify(&self, slot: &str, message: &str, severity: Severity) -> Option<u64> {
        match self.show(slot, message, severity) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!("显示通知失败: {}", e);
                fallback_alert(message);
                None
            }
        }
    }

    /// 提前关闭通知并取消其消失任务
    pub fn dismiss(&self, id: u64) -> bool {
        let Ok(mut state) = self.lock() else {
            return false;
        };

        let Some(position) = state.active.iter().position(|n| n.id == id) else {
            return false;
        };
        let notification = state.active.remove(position);

        if state
            .pending
            .get(&notification.slot)
            .is_some_and(|(pending_id, _)| *pending_id == id)
        {
            if let Some((_, task)) = state.pending.remove(&notification.slot) {
                task.abort();
            }
        }

        true
    }

    /// 当前仍在显示的通知
    pub fn active(&self) -> Vec<Notification> {
        self.lock()
            .map(|state| state.active.clone())
            .unwrap_or_default()
    }

    /// 尚未触发的消失任务数量
    pub fn pending_dismissals(&self) -> usize {
        self.lock()
            .map(|state| state.pending.values().filter(|(_, task)| !task.is_finished()).count())
            .unwrap_or(0)
    }

    /// 关闭全部通知
    pub fn clear(&self) {
        if let Ok(mut state) = self.lock() {
            for (_, (_, task)) in state.pending.drain() {
                task.abort();
            }
            state.active.clear();
        }
    }

    /// 将当前通知渲染到 `<body>` 末尾，返回渲染的数量
    ///
    /// 已渲染过的通知元素会先被移除，重复调用不会产生重复元素。
    pub fn render_into(&self, dom: &RcDom) -> LangResult<usize> {
        let body = get_body(&dom.document)
            .ok_or_else(|| LangError::NotificationError("文档没有 <body>".to_string()))?;

        for stale in find_elements(&body, |node| get_node_attr(node, "data-notification-id").is_some()) {
            remove_from_parent(&stale);
        }

        let active = self.active();
        for notification in &active {
            let id = notification.id.to_string();
            let class = format!(
                "{} notification-{}",
                notification.css_class,
                notification.severity.as_str()
            );
            let container = new_element(
                dom,
                "div",
                &[
                    ("class", class.as_str()),
                    ("role", "alert"),
                    ("aria-live", "polite"),
                    ("data-notification-id", id.as_str()),
                ],
            );
            let content = new_element(dom, "div", &[("class", "notification-content")]);
            let icon_class = format!("fa-solid fa-{}", notification.severity.icon());
            let icon = new_element(
                dom,
                "i",
                &[("class", icon_class.as_str()), ("aria-hidden", "true")],
            );
            let message = new_element(dom, "span", &[]);
            set_text_content(&message, &notification.message);
            let close = new_element(
                dom,
                "button",
                &[
                    ("class", "notification-close"),
                    ("aria-label", "Close notification"),
                ],
            );
            let close_icon = new_element(
                dom,
                "i",
                &[("class", "fa-solid fa-times"), ("aria-hidden", "true")],
            );

            append_child(&close, &close_icon);
            append_child(&content, &icon);
            append_child(&content, &message);
            append_child(&content, &close);
            append_child(&container, &content);
            append_child(&body, &container);
        }

        Ok(active.len())
    }

    fn lock(&self) -> LangResult<MutexGuard<'_, NotifierState>> {
        self.state
            .lock()
            .map_err(|e| LangError::NotificationError(format!("通知状态锁失败: {}", e)))
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NotificationProfile::defaults())
    }
}

/// 阻塞式提示（通知系统不可用时）
pub fn fallback_alert(message: &str) {
    tracing::error!("ALERT: {}", message);
    eprintln!("{}", message);
}
