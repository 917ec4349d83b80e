// 集成测试公共模块
//
// 提供 HTML 测试数据、测试用翻译服务和断言辅助工具

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use markup5ever_rcdom::{Handle, NodeData};

use html_translator::parsers::html::{
    fragment_root, get_node_name, html_fragment_to_dom, html_to_dom, is_full_document,
};
use html_translator::translation::{
    ProviderError, ProviderErrorKind, TranslationOrchestrator, TranslationProvider,
    TranslationResult,
};

/// HTML 测试数据
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 创建简单的英文HTML页面
    pub fn create_simple_english_page() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Test Page</title>
    <meta charset="UTF-8">
    <style>body { font-family: sans-serif; }</style>
</head>
<body>
    <h1>Welcome to Test</h1>
    <p>This is a test paragraph with some <strong>important</strong> text.</p>
    <div>
        <p>Another paragraph in a div.</p>
        <a href="https://example.com" title="Example Link">Visit Example</a>
    </div>
    <button>Click Me</button>
    <input type="text" placeholder="Enter your name">
    <img src="test.jpg" alt="Test Image">
    <script>console.log("not translated");</script>
</body>
</html>"#
            .to_string()
    }

    /// 创建一个不带 doctype 的 HTML 片段
    pub fn create_article_fragment() -> String {
        r#"<article class="post" data-id="42">
  <h2>Release notes</h2>
  <p>Install with <code>cargo install</code> and run it.</p>
  <pre>fn main() {}</pre>
  <p class="notranslate">ACME Widget&trade;</p>
  <!-- internal note -->
  <ul><li>Fast</li><li>Small &amp; simple</li></ul>
</article>"#
            .to_string()
    }

    /// 没有任何可翻译文本的页面
    pub fn create_markup_only_page() -> String {
        "<div class=\"spacer\">\n  <br>\n  <img src=\"a.png\" alt=\"A\">\n</div>".to_string()
    }

    /// 按文档顺序列出所有元素名称
    pub fn tag_sequence(html: &str) -> Vec<String> {
        let dom = if is_full_document(html) {
            html_to_dom(html)
        } else {
            html_fragment_to_dom(html)
        };
        let root = if is_full_document(html) {
            dom.document.clone()
        } else {
            fragment_root(&dom).unwrap()
        };

        let mut tags = Vec::new();
        collect_tags(&root, &mut tags);
        tags
    }
}

fn collect_tags(node: &Handle, tags: &mut Vec<String>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            tags.push(get_node_name(child).unwrap().to_string());
            collect_tags(child, tags);
        }
    }
}

/// 把文本转成大写的翻译服务，并记录每一批请求
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingProvider {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _target_lang: &str,
        _source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>> {
        self.calls.lock().unwrap().push(texts.to_vec());
        Ok(texts.iter().map(|t| t.to_uppercase()).collect())
    }
}

/// 总是少返回一条译文的翻译服务
pub struct ShortProvider;

#[async_trait]
impl TranslationProvider for ShortProvider {
    fn name(&self) -> &str {
        "short"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _target_lang: &str,
        _source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>> {
        Ok(texts.iter().skip(1).cloned().collect())
    }
}

/// 总是返回指定错误的翻译服务
pub struct FailingProvider {
    pub kind: ProviderErrorKind,
}

#[async_trait]
impl TranslationProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn translate_batch(
        &self,
        _texts: &[String],
        _target_lang: &str,
        _source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>> {
        Err(ProviderError::new("failing", self.kind, "simulated failure").into())
    }
}

/// 用指定的翻译服务创建编排器
pub fn orchestrator_with<P: TranslationProvider + 'static>(provider: P) -> TranslationOrchestrator {
    TranslationOrchestrator::new(Arc::new(provider))
}

/// 断言辅助工具
pub struct AssertionHelper;

impl AssertionHelper {
    /// 断言两段 HTML 的元素结构完全一致
    pub fn assert_same_structure(original: &str, translated: &str) {
        assert_eq!(
            HtmlTestHelper::tag_sequence(original),
            HtmlTestHelper::tag_sequence(translated),
            "Element structure changed:\n{}\n---\n{}",
            original,
            translated
        );
    }
}
