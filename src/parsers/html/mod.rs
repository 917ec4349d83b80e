//! HTML解析和处理模块
//!
//! - `dom`: 文档/片段解析和基础DOM操作
//! - `serializer`: 序列化和文本转义

pub mod dom;
pub mod serializer;

pub use dom::{
    decode_html_bytes, fragment_root, get_child_node_by_name, get_node_attr, get_node_name,
    html_fragment_to_dom, html_to_dom, is_full_document,
};
pub use serializer::{escape_text, serialize_children};
