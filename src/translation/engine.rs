//! 翻译引擎
//!
//! 对文档中的可翻译位置执行精确短语替换。

use std::collections::HashMap;
use std::sync::Arc;

use markup5ever_rcdom::Handle;

use crate::parsers::html::replace_first;
use crate::translation::collector::{SurfaceCollector, SurfaceKind};
use crate::translation::language::LanguageCode;
use crate::translation::phrases::PhraseBook;

/// 单次翻译的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    pub target: LanguageCode,
    /// 访问过的位置总数
    pub visited: usize,
    /// 被改写的位置总数
    pub replaced: usize,
    /// 各类别被改写的数量
    pub replaced_by_kind: HashMap<SurfaceKind, usize>,
}

impl TranslationReport {
    fn new(target: LanguageCode) -> Self {
        Self {
            target,
            visited: 0,
            replaced: 0,
            replaced_by_kind: HashMap::new(),
        }
    }

    fn record(&mut self, kind: SurfaceKind) {
        self.replaced += 1;
        *self.replaced_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn replaced_of(&self, kind: SurfaceKind) -> usize {
        self.replaced_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// 翻译引擎
///
/// 短语表在构建后只读，可以在多个切换器之间共享。
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    phrases: Arc<PhraseBook>,
}

impl TranslationEngine {
    pub fn new(phrases: PhraseBook) -> Self {
        Self {
            phrases: Arc::new(phrases),
        }
    }

    pub fn with_shared(phrases: Arc<PhraseBook>) -> Self {
        Self { phrases }
    }

    pub fn phrases(&self) -> &PhraseBook {
        &self.phrases
    }

    /// 将文档改写为目标语言
    ///
    /// 每个位置的文本去除首尾空白后与短语表精确匹配；命中时只替换原始文本中
    /// 第一次出现的匹配串，保留周围空白和其他内容。未命中的位置以及译文与
    /// 原文相同的位置保持原样，不计入改写数量。
    pub fn translate(&self, document: &Handle, target: LanguageCode) -> TranslationReport {
        let mut report = TranslationReport::new(target);
        let table = self.phrases.table(target);

        if table.is_empty() {
            tracing::debug!("短语表 {} 为空，跳过翻译", target);
            return report;
        }

        let mut collector = SurfaceCollector::new();
        for kind in SurfaceKind::ORDER {
            // 每个类别在前一类别改写之后重新枚举
            for surface in collector.collect_kind(document, kind) {
                report.visited += 1;

                let Some(original) = surface.read() else {
                    continue;
                };
                let trimmed = original.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if let Some(translated) = table.get(trimmed) {
                    // 译文与原文相同时不写回，元素文本写回会丢弃子元素（如图标）
                    if translated == trimmed {
                        continue;
                    }
                    if let Some(rewritten) = replace_first(&original, trimmed, translated) {
                        tracing::trace!(
                            "{}: '{}' -> '{}'",
                            kind.name(),
                            trimmed,
                            translated
                        );
                        surface.write(&rewritten);
                        report.record(kind);
                    }
                }
            }
        }

        tracing::debug!(
            "翻译到 {} 完成: 访问 {} 个位置，改写 {} 个",
            target,
            report.visited,
            report.replaced
        );

        report
    }
}

impl Default for TranslationEngine {
    fn default() -> Self {
        Self::new(PhraseBook::builtin())
    }
}
