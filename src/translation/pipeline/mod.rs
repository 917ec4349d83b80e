//! 翻译管道模块
//!
//! 提供可翻译文本的过滤、提取和回填

pub mod filters;
pub mod segmenter;

// 重新导出主要类型
pub use filters::TextFilter;
pub use segmenter::{HtmlSegmenter, Segment, Template, TemplatePart};
