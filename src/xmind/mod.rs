//! XMind Boundary Module
//!
//! 思维导图文档的内存模型与读写边界。读取端同时支持两种档案
//! 方言：XMind 8 的 `content.xml`（quick-xml）与 XMind Zen 的
//! `content.json`（serde_json）；写出端生成 XMind 8 档案
//! （content.xml + meta.xml + META-INF/manifest.xml）。

mod reader;
mod writer;

pub use reader::read_document;
pub use writer::write_document;

use crate::types::TopicNode;

/// 一个思维导图文档（一个 .xmind 文件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmindDocument {
    /// 画布（文档顺序）
    pub sheets: Vec<XmindSheet>,
}

/// 一张画布：标题加一棵根主题树
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmindSheet {
    /// 画布标题（可能与根主题标题不同）
    pub title: String,

    /// 根主题（根标题不计入展开输出的路径）
    pub root: TopicNode,
}

impl XmindDocument {
    /// 以单张画布构造文档（Excel → XMind 方向每张工作表产出一个文件）
    pub fn single_sheet(title: impl Into<String>, root: TopicNode) -> Self {
        let title = title.into();
        Self {
            sheets: vec![XmindSheet { title, root }],
        }
    }
}
