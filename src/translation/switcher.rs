//! 语言切换控制器
//!
//! 持有显式的语言状态，将选择应用到语言按钮、问候语、`<html lang>`、标题，
//! 持久化选择，执行翻译并发出确认通知。公开入口都是故障边界：内部错误会被
//! 记录但不会向调用方传播，文档保留已经完成的部分修改。

use markup5ever_rcdom::{Handle, RcDom};

use crate::notification::{Notifier, Severity, LANGUAGE_SLOT};
use crate::parsers::html::{
    find_elements_by_class, get_document_element, get_node_attr, get_title,
    set_document_lang, set_node_attr, set_style_property, set_title, toggle_class,
};
use crate::storage::PreferenceStore;
use crate::translation::config::{LangConfig, SelectorConfig, TitleConfig};
use crate::translation::engine::{TranslationEngine, TranslationReport};
use crate::translation::error::{helpers, LangResult};
use crate::translation::language::{LanguageCode, LanguageState};

/// 一次语言切换的结果
#[derive(Debug, Clone)]
pub struct SwitchOutcome {
    pub target: LanguageCode,
    pub report: TranslationReport,
    /// 发出的确认通知，未发出时为 `None`
    pub notification_id: Option<u64>,
}

/// 语言切换器
pub struct LanguageSwitcher<S: PreferenceStore> {
    engine: TranslationEngine,
    store: S,
    notifier: Notifier,
    config: LangConfig,
    state: LanguageState,
}

impl<S: PreferenceStore> LanguageSwitcher<S> {
    /// 使用内置短语和默认配置创建，语言状态从存储读取
    pub fn new(store: S) -> Self {
        let state = LanguageState::load(&store);
        Self {
            engine: TranslationEngine::default(),
            store,
            notifier: Notifier::default(),
            config: LangConfig::default(),
            state,
        }
    }

    /// 按配置创建（附加短语、通知设置、选择器）
    pub fn from_config(config: LangConfig, store: S) -> LangResult<Self> {
        config.validate()?;
        let engine = TranslationEngine::new(config.build_phrase_book()?);
        let notifier = Notifier::new(config.notifications.profiles.clone());
        let state = LanguageState::load(&store);

        Ok(Self {
            engine,
            store,
            notifier,
            config,
            state,
        })
    }

    pub fn with_engine(mut self, engine: TranslationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_config(mut self, config: LangConfig) -> Self {
        self.config = config;
        self
    }

    pub fn current_language(&self) -> LanguageCode {
        self.state.current()
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LangConfig {
        &self.config
    }

    /// 切换到指定语言
    ///
    /// 无法识别的语言代码不做任何事，也不改变状态。
    pub fn select_language(&mut self, dom: &RcDom, code: &str) -> Option<SwitchOutcome> {
        let Some(target) = LanguageCode::parse(code) else {
            tracing::debug!("忽略无法识别的语言代码: {:?}", code);
            return None;
        };

        helpers::guard("select_language", || self.apply(dom, target, true))
    }

    /// 按存储的偏好初始化文档
    ///
    /// 启动时默认不显示确认通知（由 `startup.notify_on_initialize` 控制）。
    pub fn initialize(&mut self, dom: &RcDom) -> Option<SwitchOutcome> {
        self.state = LanguageState::load(&self.store);
        let target = self.state.current();
        let notify = self.config.startup.notify_on_initialize;

        tracing::debug!("初始化语言: {}", target);
        helpers::guard("initialize", || self.apply(dom, target, notify))
    }

    fn apply(&mut self, dom: &RcDom, target: LanguageCode, notify: bool) -> LangResult<SwitchOutcome> {
        let document = &dom.document;
        if get_document_element(document).is_none() {
            return Err(helpers::dom_error("文档没有根元素"));
        }

        tracing::info!("切换语言: {} -> {}", self.state.current(), target);

        update_selectors(document, &self.config.selectors, target);
        update_greetings(document, &self.config.selectors, target);

        if !set_document_lang(document, target.as_str()) {
            tracing::debug!("无法设置 <html lang>");
        }

        self.state.set(target);
        if let Err(e) = self.state.save(&self.store) {
            // 存储故障不中断后续步骤
            tracing::warn!("保存语言偏好失败: {}", e);
        }

        annotate_title(document, &self.config.title, target);

        let report = self.engine.translate(document, target);

        let notification_id = if notify {
            self.notifier
                .notify(LANGUAGE_SLOT, switch_message(target), Severity::Success)
        } else {
            None
        };

        Ok(SwitchOutcome {
            target,
            report,
            notification_id,
        })
    }
}

/// 语言切换确认消息
pub fn switch_message(target: LanguageCode) -> &'static str {
    match target {
        LanguageCode::Fr => "Langue changée en français",
        LanguageCode::En => "Language changed to English",
    }
}

/// 只有第一个指向目标语言的按钮被激活，同一语言有多个按钮时其余保持未选中
fn update_selectors(document: &Handle, selectors: &SelectorConfig, target: LanguageCode) {
    let buttons = find_elements_by_class(document, &selectors.lang_button_class);
    tracing::debug!("更新 {} 个语言按钮", buttons.len());

    let active = buttons
        .iter()
        .position(|button| get_node_attr(button, "data-lang").as_deref() == Some(target.as_str()));

    for (index, button) in buttons.iter().enumerate() {
        let selected = active == Some(index);
        toggle_class(button, &selectors.active_class, selected);
        set_node_attr(button, "aria-pressed", Some(selected.to_string()));
    }
}

fn update_greetings(document: &Handle, selectors: &SelectorConfig, target: LanguageCode) {
    let visible = selectors.greeting_display.as_str();
    let (fr_display, en_display) = match target {
        LanguageCode::Fr => (visible, "none"),
        LanguageCode::En => ("none", visible),
    };

    for node in find_elements_by_class(document, &selectors.greeting_fr_class) {
        set_style_property(&node, "display", fr_display);
    }
    for node in find_elements_by_class(document, &selectors.greeting_en_class) {
        set_style_property(&node, "display", en_display);
    }
}

fn annotate_title(document: &Handle, title: &TitleConfig, target: LanguageCode) {
    if !title.annotate {
        return;
    }

    let Some(current) = get_title(document) else {
        return;
    };
    if current.contains(title.separator.as_str()) {
        return;
    }

    let annotated = format!("{} {} {}", current, title.separator, target.title_tag());
    set_title(document, &annotated);
}
