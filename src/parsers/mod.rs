//! # 解析器模块
//!
//! 负责把 HTML 输入解析成 DOM，以及把 DOM 序列化回 HTML。
//! 翻译相关的文本收集逻辑位于 `translation::pipeline`。

pub mod html;

pub use html::{html_fragment_to_dom, html_to_dom, serialize_children};
