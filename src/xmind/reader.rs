//! XMind Reader Module
//!
//! 从 .xmind 档案（ZIP）读出文档模型。优先尝试 XMind Zen 的
//! `content.json`，退回 XMind 8 的 `content.xml`；两者都不存在
//! 视为损坏文档（致命）。打开档案前先做安全检查。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{XmindDocument, XmindSheet};
use crate::error::ConvertError;
use crate::security::{check_archive, SecurityConfig};
use crate::types::TopicNode;

/// 读取一个 .xmind 文件
pub fn read_document(path: &Path) -> Result<XmindDocument, ConvertError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    check_archive(&mut archive, &SecurityConfig::default())?;

    if let Some(json) = read_entry(&mut archive, "content.json")? {
        return parse_content_json(&json);
    }
    if let Some(xml) = read_entry(&mut archive, "content.xml")? {
        return parse_content_xml(&xml);
    }

    Err(ConvertError::MalformedDocument(
        "archive contains neither content.json nor content.xml".to_string(),
    ))
}

/// 读取档案内一个条目的全文；条目不存在时返回 `None`
fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ConvertError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(Some(content))
}

// ====== XMind Zen (content.json) ======

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSheet {
    #[serde(default)]
    title: String,
    root_topic: Option<JsonTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonTopic {
    title: Option<String>,
    notes: Option<JsonNotes>,
    children: Option<JsonChildren>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonChildren {
    attached: Vec<JsonTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonNotes {
    plain: Option<JsonPlain>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonPlain {
    content: String,
}

fn parse_content_json(content: &str) -> Result<XmindDocument, ConvertError> {
    let sheets: Vec<JsonSheet> = serde_json::from_str(content)?;
    let sheets = sheets
        .into_iter()
        .map(|sheet| {
            let root = sheet
                .root_topic
                .map(topic_from_json)
                .unwrap_or_else(|| TopicNode::new(""));
            XmindSheet {
                title: sheet.title,
                root,
            }
        })
        .collect();
    Ok(XmindDocument { sheets })
}

fn topic_from_json(topic: JsonTopic) -> TopicNode {
    let mut node = TopicNode::new(topic.title.unwrap_or_default());
    node.notes = topic
        .notes
        .and_then(|notes| notes.plain)
        .map(|plain| plain.content)
        .filter(|content| !content.is_empty());
    if let Some(children) = topic.children {
        node.children = children.attached.into_iter().map(topic_from_json).collect();
    }
    node
}

// ====== XMind 8 (content.xml) ======

/// 解析 content.xml 为文档模型
///
/// 事件驱动的单遍解析：`<topic>` 用栈维护嵌套；`<title>` 在主题
/// 栈非空时归属栈顶主题，否则归属当前画布；备注只取
/// `<notes><plain>` 的纯文本。未知元素一律忽略。
fn parse_content_xml(content: &str) -> Result<XmindDocument, ConvertError> {
    let mut reader = Reader::from_reader(content.as_bytes());
    // 不修剪文本：备注内容的换行与空白必须原样保留

    let mut sheets: Vec<XmindSheet> = Vec::new();
    let mut sheet_title: Option<String> = None;
    let mut sheet_root: Option<TopicNode> = None;
    let mut topic_stack: Vec<TopicNode> = Vec::new();
    let mut text = String::new();
    let mut in_title = false;
    let mut in_plain = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"sheet" => {
                    sheet_title = None;
                    sheet_root = None;
                }
                b"topic" => topic_stack.push(TopicNode::new("")),
                b"title" => {
                    in_title = true;
                    text.clear();
                }
                b"plain" => {
                    in_plain = true;
                    text.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                // 自闭合 <topic/>：一个既无标题也无子节点的主题
                if e.name().as_ref() == b"topic" {
                    attach_topic(TopicNode::new(""), &mut topic_stack, &mut sheet_root);
                }
            }
            Ok(Event::Text(e)) => {
                if in_title || in_plain {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"title" => {
                    if let Some(top) = topic_stack.last_mut() {
                        top.title = text.clone();
                    } else {
                        sheet_title = Some(text.clone());
                    }
                    in_title = false;
                }
                b"plain" => {
                    if let Some(top) = topic_stack.last_mut() {
                        if !text.is_empty() {
                            top.notes = Some(text.clone());
                        }
                    }
                    in_plain = false;
                }
                b"topic" => {
                    if let Some(node) = topic_stack.pop() {
                        attach_topic(node, &mut topic_stack, &mut sheet_root);
                    }
                }
                b"sheet" => {
                    let root = sheet_root.take().unwrap_or_else(|| TopicNode::new(""));
                    let title = sheet_title.take().unwrap_or_else(|| root.title.clone());
                    sheets.push(XmindSheet { title, root });
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(XmindDocument { sheets })
}

/// 把一个解析完的主题挂到父主题，或在栈空时登记为画布根
fn attach_topic(
    node: TopicNode,
    topic_stack: &mut [TopicNode],
    sheet_root: &mut Option<TopicNode>,
) {
    if let Some(parent) = topic_stack.last_mut() {
        parent.children.push(node);
    } else if sheet_root.is_none() {
        *sheet_root = Some(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_xml_nested_topics_and_notes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xmap-content xmlns="urn:xmind:xmap:xmlns:content:2.0" version="2.0">
  <sheet id="s1"><title>画布1</title>
    <topic id="t0"><title>测试表</title>
      <children><topics type="attached">
        <topic id="t1"><title>模块1</title>
          <children><topics type="attached">
            <topic id="t2"><title>TC001</title>
              <notes><plain>【车型】ModelX&#10;【优先级】2</plain></notes>
            </topic>
          </topics></children>
        </topic>
      </topics></children>
    </topic>
  </sheet>
</xmap-content>"#;

        let doc = parse_content_xml(xml).unwrap();
        assert_eq!(doc.sheets.len(), 1);
        let sheet = &doc.sheets[0];
        assert_eq!(sheet.title, "画布1");
        assert_eq!(sheet.root.title, "测试表");

        let m1 = &sheet.root.children[0];
        assert_eq!(m1.title, "模块1");
        let case = &m1.children[0];
        assert_eq!(case.title, "TC001");
        assert_eq!(case.notes.as_deref(), Some("【车型】ModelX\n【优先级】2"));
    }

    #[test]
    fn test_parse_content_xml_sheet_without_title_uses_root_title() {
        let xml = r#"<xmap-content><sheet><topic><title>根</title></topic></sheet></xmap-content>"#;
        let doc = parse_content_xml(xml).unwrap();
        assert_eq!(doc.sheets[0].title, "根");
        assert_eq!(doc.sheets[0].root.title, "根");
    }

    #[test]
    fn test_parse_content_xml_self_closing_topic() {
        let xml = r#"<xmap-content><sheet><topic><title>根</title>
            <children><topics type="attached"><topic/></topics></children>
        </topic></sheet></xmap-content>"#;
        let doc = parse_content_xml(xml).unwrap();
        let root = &doc.sheets[0].root;
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title, "");
    }

    #[test]
    fn test_parse_content_json_basic() {
        let json = r#"[{
            "title": "画布1",
            "rootTopic": {
                "title": "测试表",
                "children": {
                    "attached": [
                        {
                            "title": "模块1→TC001",
                            "notes": {"plain": {"content": "【优先级】1"}}
                        }
                    ]
                }
            }
        }]"#;

        let doc = parse_content_json(json).unwrap();
        let sheet = &doc.sheets[0];
        assert_eq!(sheet.title, "画布1");
        assert_eq!(sheet.root.children[0].title, "模块1→TC001");
        assert_eq!(sheet.root.children[0].notes.as_deref(), Some("【优先级】1"));
    }

    #[test]
    fn test_parse_content_json_missing_fields_default() {
        let json = r#"[{"rootTopic": {"title": "根"}}]"#;
        let doc = parse_content_json(json).unwrap();
        assert_eq!(doc.sheets[0].title, "");
        assert_eq!(doc.sheets[0].root.title, "根");
        assert!(doc.sheets[0].root.children.is_empty());
    }

    #[test]
    fn test_parse_content_json_invalid_is_error() {
        assert!(parse_content_json("{not json").is_err());
    }
}
