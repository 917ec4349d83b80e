//! HTML 分段器
//!
//! 把文档中的可翻译文本节点提取为有序的 [`Segment`] 列表，同时生成一个
//! [`Template`]：文本节点被替换为编号占位符后的序列化结果。回填时只做字符串
//! 拼接，不需要重新解析文档。

use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};

use super::filters::TextFilter;
use crate::parsers::html::{
    escape_text, fragment_root, html_fragment_to_dom, html_to_dom, is_full_document,
    serialize_children,
};
use crate::translation::error::{TranslationError, TranslationResult};

const SLOT_OPEN: char = '\u{FDD0}';
const SLOT_CLOSE: char = '\u{FDD1}';

/// 一段可翻译文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 文档顺序中的序号，同时也是模板中的占位符编号
    pub index: usize,
    /// 从根节点出发的子节点下标路径，例如 `0/1/3`
    pub position_id: String,
    /// 原始文本，保留首尾空白
    pub original_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Markup(String),
    Slot(usize),
}

/// 文本被占位符替换后的文档结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
    slot_count: usize,
}

impl Template {
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// 按占位符顺序填入译文并返回 HTML
    ///
    /// 译文数量必须与占位符数量一致，否则返回 `StructureMismatch`。
    pub fn reinsert<S: AsRef<str>>(&self, translated: &[S]) -> TranslationResult<String> {
        if translated.len() != self.slot_count {
            return Err(TranslationError::StructureMismatch {
                expected: self.slot_count,
                actual: translated.len(),
            });
        }

        let capacity = self
            .parts
            .iter()
            .map(|part| match part {
                TemplatePart::Markup(markup) => markup.len(),
                TemplatePart::Slot(index) => translated[*index].as_ref().len(),
            })
            .sum();

        let mut html = String::with_capacity(capacity);
        for part in &self.parts {
            match part {
                TemplatePart::Markup(markup) => html.push_str(markup),
                TemplatePart::Slot(index) => html.push_str(&escape_text(translated[*index].as_ref())),
            }
        }

        Ok(html)
    }

    /// 把序列化结果按占位符切分
    fn from_serialized(serialized: &str, expected_slots: usize) -> TranslationResult<Self> {
        let mut parts = Vec::with_capacity(expected_slots * 2 + 1);
        let mut rest = serialized;
        let mut next_slot = 0;

        while let Some(open) = rest.find(SLOT_OPEN) {
            if open > 0 {
                parts.push(TemplatePart::Markup(rest[..open].to_string()));
            }

            let after_open = &rest[open + SLOT_OPEN.len_utf8()..];
            let close = after_open.find(SLOT_CLOSE).ok_or_else(reserved_chars_error)?;
            let index: usize = after_open[..close]
                .parse()
                .map_err(|_| reserved_chars_error())?;
            if index != next_slot {
                return Err(reserved_chars_error());
            }

            parts.push(TemplatePart::Slot(index));
            next_slot += 1;
            rest = &after_open[close + SLOT_CLOSE.len_utf8()..];
        }

        if rest.contains(SLOT_CLOSE) || next_slot != expected_slots {
            return Err(reserved_chars_error());
        }
        if !rest.is_empty() {
            parts.push(TemplatePart::Markup(rest.to_string()));
        }

        Ok(Self {
            parts,
            slot_count: next_slot,
        })
    }
}

fn reserved_chars_error() -> TranslationError {
    TranslationError::InvalidInput("HTML 中包含保留的非字符码位 U+FDD0/U+FDD1".to_string())
}

/// HTML 分段器
#[derive(Debug, Clone, Default)]
pub struct HtmlSegmenter {
    filter: TextFilter,
}

impl HtmlSegmenter {
    pub fn new(filter: TextFilter) -> Self {
        Self { filter }
    }

    /// 提取可翻译文本并生成模板
    ///
    /// 完整文档按文档解析，其余输入按 `<template>` 上下文的片段解析，输出形式与输入一致。
    pub fn extract(&self, html: &str) -> TranslationResult<(Vec<Segment>, Template)> {
        if html.contains(SLOT_OPEN) || html.contains(SLOT_CLOSE) {
            return Err(reserved_chars_error());
        }

        let full_document = is_full_document(html);
        let dom = if full_document {
            html_to_dom(html)
        } else {
            html_fragment_to_dom(html)
        };

        let root = if full_document {
            dom.document.clone()
        } else {
            fragment_root(&dom).ok_or_else(|| {
                TranslationError::SerializationError("片段解析结果缺少根节点".to_string())
            })?
        };

        let mut found = Vec::new();
        let mut path = Vec::new();
        self.collect_text_nodes(&root, &mut path, &mut found);

        let mut segments = Vec::with_capacity(found.len());
        for (index, (node, position_id)) in found.into_iter().enumerate() {
            if let NodeData::Text { ref contents } = node.data {
                let mut contents = contents.borrow_mut();
                segments.push(Segment {
                    index,
                    position_id,
                    original_text: contents.to_string(),
                });
                *contents = StrTendril::from(format!("{}{}{}", SLOT_OPEN, index, SLOT_CLOSE));
            }
        }

        let serialized = serialize_children(&root)?;
        let template = Template::from_serialized(&serialized, segments.len())?;

        tracing::debug!("提取到 {} 个文本段", segments.len());

        Ok((segments, template))
    }

    /// 把译文填回模板
    pub fn reinsert<S: AsRef<str>>(
        &self,
        template: &Template,
        translated: &[S],
    ) -> TranslationResult<String> {
        template.reinsert(translated)
    }

    fn collect_text_nodes(
        &self,
        node: &Handle,
        path: &mut Vec<usize>,
        found: &mut Vec<(Handle, String)>,
    ) {
        for (i, child) in node.children.borrow().iter().enumerate() {
            path.push(i);
            match child.data {
                NodeData::Text { ref contents } => {
                    if self.filter.should_translate(&contents.borrow()) {
                        found.push((child.clone(), position_id(path)));
                    }
                }
                NodeData::Element { .. } => {
                    if !self.filter.should_skip_element(child) {
                        self.collect_text_nodes(child, path, found);
                    }
                }
                // 注释、doctype 和处理指令不参与翻译
                _ => {}
            }
            path.pop();
        }
    }
}

fn position_id(path: &[usize]) -> String {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
