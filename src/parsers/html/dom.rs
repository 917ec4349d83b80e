use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;
use html5ever::interface::QualName;
use html5ever::tendril::TendrilSink;
use html5ever::{namespace_url, ns, parse_document, parse_fragment, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 将完整 HTML 文档解析为 DOM
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// 将 HTML 片段按 `<template>` 上下文解析为 DOM
///
/// `<template>` 上下文接受任意内容模型，`<tr>`、`<td>`、`<caption>` 等表格部件不会被丢弃。
/// 片段节点挂在 `document > html` 之下，序列化时只输出该 `html` 节点的子节点。
pub fn html_fragment_to_dom(html: &str) -> RcDom {
    let context = QualName::new(None, ns!(html), LocalName::from("template"));
    parse_fragment(RcDom::default(), Default::default(), context, vec![]).one(html)
}

/// 判断输入是否为完整文档
///
/// 跳过开头的空白和注释后，以 doctype 或 `<html>`、`<head>`、`<body>` 开始标签开头即为完整文档。
pub fn is_full_document(html: &str) -> bool {
    let mut rest = html.trim_start_matches(['\u{FEFF}', ' ', '\t', '\n', '\r', '\u{0C}']);

    while rest.starts_with("<!--") {
        match rest[4..].find("-->") {
            Some(end) => rest = rest[4 + end + 3..].trim_start(),
            None => return false,
        }
    }

    let head: String = rest.chars().take(10).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype") {
        return true;
    }

    ["<html", "<head", "<body"].iter().any(|tag| {
        head.strip_prefix(tag)
            .map(|after| {
                after
                    .chars()
                    .next()
                    .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace())
            })
            .unwrap_or(false)
    })
}

/// 片段解析结果的根节点（`document > html`）
pub fn fragment_root(dom: &RcDom) -> Option<Handle> {
    get_child_node_by_name(&dom.document, "html")
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 解码上传的 HTML 字节：优先 UTF-8，失败时按 Latin-1 解码
pub fn decode_html_bytes(data: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(data) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            tracing::debug!("文档不是有效的 UTF-8，按 Latin-1 解码");
            let (decoded, _, _) = WINDOWS_1252.decode(data);
            decoded
        }
    }
}
