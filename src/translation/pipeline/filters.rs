//! 文本过滤器模块
//!
//! 判断 DOM 中哪些元素和文本节点需要送去翻译

use std::collections::HashSet;

use markup5ever_rcdom::Handle;

use crate::parsers::html::{get_node_attr, get_node_name};
use crate::translation::config::constants;

/// 可翻译内容的判定策略
#[derive(Debug, Clone)]
pub struct TextFilter {
    skip_elements: HashSet<String>,
    /// 遵守 `translate="no"` 和 `class="notranslate"`
    honor_translate_attr: bool,
}

impl TextFilter {
    /// 创建新的文本过滤器
    ///
    /// 原始文本元素（`script`、`style` 等）总是跳过，与传入的列表无关。
    pub fn new<I, S>(skip_elements: I, honor_translate_attr: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skip_elements = skip_elements
            .into_iter()
            .map(|s| s.as_ref().to_ascii_lowercase())
            .chain(constants::RAW_TEXT_ELEMENTS.iter().map(|s| s.to_string()))
            .collect();

        Self {
            skip_elements,
            honor_translate_attr,
        }
    }

    /// 判断文本节点内容是否需要翻译
    pub fn should_translate(&self, text: &str) -> bool {
        !text.trim().is_empty()
    }

    /// 判断元素（及其整个子树）是否应跳过
    pub fn should_skip_element(&self, node: &Handle) -> bool {
        let Some(tag_name) = get_node_name(node) else {
            return false;
        };

        if self.skip_elements.contains(&tag_name.to_ascii_lowercase()) {
            return true;
        }

        self.honor_translate_attr && Self::opts_out(node)
    }

    fn opts_out(node: &Handle) -> bool {
        if let Some(value) = get_node_attr(node, "translate") {
            if value.trim().eq_ignore_ascii_case("no") {
                return true;
            }
        }

        get_node_attr(node, "class")
            .map(|classes| {
                classes
                    .split_ascii_whitespace()
                    .any(|c| c == constants::NO_TRANSLATE_CLASS)
            })
            .unwrap_or(false)
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new(constants::SKIP_ELEMENTS.iter(), true)
    }
}
