//! XMind Writer Module
//!
//! 把文档模型写成 XMind 8 档案。生成三个条目：`content.xml`
//! （主题树与备注）、`meta.xml`（创建时间）、`META-INF/manifest.xml`
//! （条目清单）。先在内存里完整生成再写盘，不留半成品文件。

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::XmindDocument;
use crate::error::ConvertError;
use crate::types::TopicNode;

/// 固定的档案清单
const MANIFEST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<manifest xmlns="urn:xmind:xmap:xmlns:manifest:1.0">
    <file-entry full-path="content.xml" media-type="text/xml"/>
    <file-entry full-path="META-INF/" media-type=""/>
    <file-entry full-path="META-INF/manifest.xml" media-type="text/xml"/>
    <file-entry full-path="meta.xml" media-type="text/xml"/>
</manifest>
"#;

/// 把文档写到 .xmind 文件
pub fn write_document(document: &XmindDocument, path: &Path) -> Result<(), ConvertError> {
    let content = render_content_xml(document)?;
    let meta = render_meta_xml();

    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("content.xml", options)?;
    zip.write_all(&content)?;
    zip.start_file("meta.xml", options)?;
    zip.write_all(meta.as_bytes())?;
    zip.add_directory("META-INF", options)?;
    zip.start_file("META-INF/manifest.xml", options)?;
    zip.write_all(MANIFEST_XML.as_bytes())?;
    zip.finish()?;

    Ok(())
}

/// 生成 content.xml 字节串
fn render_content_xml(document: &XmindDocument) -> Result<Vec<u8>, ConvertError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

    let timestamp = Utc::now().timestamp_millis().to_string();

    let mut content_el = BytesStart::new("xmap-content");
    content_el.push_attribute(("xmlns", "urn:xmind:xmap:xmlns:content:2.0"));
    content_el.push_attribute(("xmlns:fo", "http://www.w3.org/1999/XSL/Format"));
    content_el.push_attribute(("timestamp", timestamp.as_str()));
    content_el.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(content_el))?;

    for sheet in &document.sheets {
        let mut sheet_el = BytesStart::new("sheet");
        sheet_el.push_attribute(("id", element_id().as_str()));
        sheet_el.push_attribute(("timestamp", timestamp.as_str()));
        writer.write_event(Event::Start(sheet_el))?;

        write_text_element(&mut writer, "title", &sheet.title)?;
        write_topic(&mut writer, &sheet.root, &timestamp)?;

        writer.write_event(Event::End(BytesEnd::new("sheet")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("xmap-content")))?;
    Ok(writer.into_inner())
}

/// 递归写出一个主题及其子树
fn write_topic(
    writer: &mut Writer<Vec<u8>>,
    node: &TopicNode,
    timestamp: &str,
) -> Result<(), ConvertError> {
    let mut topic_el = BytesStart::new("topic");
    topic_el.push_attribute(("id", element_id().as_str()));
    topic_el.push_attribute(("timestamp", timestamp));
    writer.write_event(Event::Start(topic_el))?;

    write_text_element(writer, "title", &node.title)?;

    if let Some(notes) = node.notes.as_deref() {
        writer.write_event(Event::Start(BytesStart::new("notes")))?;
        write_text_element(writer, "plain", notes)?;
        writer.write_event(Event::End(BytesEnd::new("notes")))?;
    }

    if !node.children.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("children")))?;
        let mut topics_el = BytesStart::new("topics");
        topics_el.push_attribute(("type", "attached"));
        writer.write_event(Event::Start(topics_el))?;
        for child in &node.children {
            write_topic(writer, child, timestamp)?;
        }
        writer.write_event(Event::End(BytesEnd::new("topics")))?;
        writer.write_event(Event::End(BytesEnd::new("children")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("topic")))?;
    Ok(())
}

/// 写出 `<name>text</name>`（文本自动转义）
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), ConvertError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// 生成 meta.xml 文本
fn render_meta_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
         <meta xmlns=\"urn:xmind:xmap:xmlns:meta:2.0\" version=\"2.0\">\
         <Create><Time>{}</Time></Create></meta>\n",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

/// 生成一个元素 id（32 位十六进制）
fn element_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmind::read_document;
    use crate::xmind::XmindSheet;

    fn sample_document() -> XmindDocument {
        let mut root = TopicNode::new("测试表");
        let mut module = TopicNode::new("模块1");
        let mut case = TopicNode::new("TC001");
        case.notes = Some("【车型】ModelX\n【优先级】2".to_string());
        module.children.push(case);
        root.children.push(module);
        XmindDocument::single_sheet("测试表", root)
    }

    #[test]
    fn test_render_content_xml_structure() {
        let xml = String::from_utf8(render_content_xml(&sample_document()).unwrap()).unwrap();
        assert!(xml.contains("urn:xmind:xmap:xmlns:content:2.0"));
        assert!(xml.contains("<title>测试表</title>"));
        assert!(xml.contains("<topics type=\"attached\">"));
        assert!(xml.contains("<plain>"));
        assert!(xml.contains("【优先级】2"));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xmind");
        let document = sample_document();

        write_document(&document, &path).unwrap();
        let loaded = read_document(&path).unwrap();

        assert_eq!(loaded.sheets.len(), 1);
        let sheet = &loaded.sheets[0];
        assert_eq!(sheet.title, "测试表");
        assert_eq!(sheet.root.children[0].title, "模块1");
        assert_eq!(
            sheet.root.children[0].children[0].notes.as_deref(),
            Some("【车型】ModelX\n【优先级】2")
        );
    }

    #[test]
    fn test_write_multi_sheet_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.xmind");
        let document = XmindDocument {
            sheets: vec![
                XmindSheet {
                    title: "画布A".to_string(),
                    root: TopicNode::new("根A"),
                },
                XmindSheet {
                    title: "画布B".to_string(),
                    root: TopicNode::new("根B"),
                },
            ],
        };

        write_document(&document, &path).unwrap();
        let loaded = read_document(&path).unwrap();
        assert_eq!(loaded.sheets.len(), 2);
        assert_eq!(loaded.sheets[0].root.title, "根A");
        assert_eq!(loaded.sheets[1].title, "画布B");
    }
}
