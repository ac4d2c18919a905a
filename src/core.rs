use std::fs;
use std::io::{self, Write};
use std::path::Path;

use encoding_rs::Encoding;
use markup5ever_rcdom::RcDom;

use crate::notification::{fallback_alert, Notifier};
use crate::parsers::html::{get_charset, html_to_dom, serialize_document};
use crate::translation::error::{LangError, LangResult};

/// 文档处理选项
#[derive(Debug, Default, Clone)]
pub struct LangOptions {
    /// 输入文档编码（未指定时读取 `<meta charset>`，否则为 UTF-8）
    pub input_encoding: Option<String>,
    /// 输出文档编码（未指定时沿用输入编码）
    pub output_encoding: Option<String>,
    /// 是否把当前通知写入输出文档
    pub render_notifications: bool,
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// 处理后的文档
#[derive(Debug)]
pub struct ProcessedDocument<T> {
    pub data: Vec<u8>,
    pub encoding: String,
    pub outcome: T,
}

/// 文档处理器，负责协调 解析 → 操作 → 渲染通知 → 序列化 的流程
pub struct DocumentProcessor<'a> {
    options: &'a LangOptions,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(options: &'a LangOptions) -> Self {
        Self { options }
    }

    /// 处理文档数据：解析后对 DOM 执行 `operation`，再序列化
    pub fn process_document<T, F>(
        &self,
        input_data: &[u8],
        notifier: Option<&Notifier>,
        operation: F,
    ) -> LangResult<ProcessedDocument<T>>
    where
        F: FnOnce(&RcDom) -> T,
    {
        // 1. 验证配置
        EncodingValidator::new().validate_options(self.options)?;

        // 2. 解析并确定编码
        let (dom, document_encoding) =
            EncodingProcessor::new().process_encoding(input_data, self.options.input_encoding.clone())?;

        // 3. 执行操作
        let outcome = operation(&dom);

        // 4. 渲染通知
        if self.options.render_notifications {
            if let Some(notifier) = notifier {
                render_notifications(&dom, notifier);
            }
        }

        // 5. 序列化
        let encoding = self
            .options
            .output_encoding
            .clone()
            .unwrap_or(document_encoding);
        let data = OutputFormatter::new().format_output(dom, &encoding)?;

        Ok(ProcessedDocument {
            data,
            encoding,
            outcome,
        })
    }
}

/// 编码验证器
pub struct EncodingValidator;

impl EncodingValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_options(&self, options: &LangOptions) -> LangResult<()> {
        for encoding in [&options.input_encoding, &options.output_encoding]
            .into_iter()
            .flatten()
        {
            if Encoding::for_label_no_replacement(encoding.as_bytes()).is_none() {
                return Err(LangError::ConfigError(format!(
                    "unknown encoding \"{}\"",
                    encoding
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncodingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 编码处理器
pub struct EncodingProcessor;

impl EncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process_encoding(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> LangResult<(RcDom, String)> {
        let explicit = input_encoding.is_some();
        let mut document_encoding = input_encoding.unwrap_or_else(|| "utf-8".to_string());

        // 初始解析
        let mut dom = html_to_dom(input_data, &document_encoding)?;

        // 未显式指定时，按文档声明的字符集重新解析
        if !explicit {
            if let Some(html_charset) = get_charset(&dom.document) {
                if let Some(document_charset) =
                    Encoding::for_label_no_replacement(html_charset.as_bytes())
                {
                    if document_charset.name() != "UTF-8" {
                        tracing::debug!("按文档声明的字符集 {} 重新解析", html_charset);
                        dom = html_to_dom(input_data, document_charset.name())?;
                    }
                    document_encoding = html_charset;
                }
            }
        }

        Ok((dom, document_encoding))
    }
}

impl Default for EncodingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// 输出格式化器
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_output(&self, dom: RcDom, document_encoding: &str) -> LangResult<Vec<u8>> {
        let mut result = serialize_document(dom, document_encoding)?;
        self.ensure_trailing_newline(&mut result);
        Ok(result)
    }

    fn ensure_trailing_newline(&self, result: &mut Vec<u8>) {
        if result.last() != Some(&b'\n') {
            result.extend_from_slice(b"\n");
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 将通知写入文档，文档没有 `<body>` 时退回到阻塞式提示
pub fn render_notifications(dom: &RcDom, notifier: &Notifier) {
    if let Err(e) = notifier.render_into(dom) {
        tracing::error!("渲染通知失败: {}", e);
        for notification in notifier.active() {
            fallback_alert(&notification.message);
        }
    }
}

/// 读取输入文件
pub fn read_input(path: &Path) -> LangResult<Vec<u8>> {
    if !path.exists() {
        return Err(LangError::IoError(format!(
            "File not found: {}",
            path.display()
        )));
    }
    fs::read(path).map_err(|e| LangError::IoError(format!("Failed to read file: {e}")))
}

/// 写出结果，未指定路径时写到标准输出
pub fn write_output(path: Option<&Path>, data: &[u8]) -> LangResult<()> {
    match path {
        Some(path) if path != Path::new("-") => fs::write(path, data)
            .map_err(|e| LangError::IoError(format!("Failed to write {}: {e}", path.display()))),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
