//! Tree To Table Module
//!
//! 把主题树深度优先展平为表格行。根主题本身不进入输出路径；
//! 叶子的完整标题链按最后一个分隔符拆成（模块路径, 用例名），
//! 备注经 NoteCodec 解码为其余五列。输出顺序即文档顺序。

use crate::diagnostics::Diagnostics;
use crate::notes::decode_notes;
use crate::types::{TopicNode, PATH_SEPARATOR};

use super::TableRow;

/// 把根主题的子树展平为表格行
///
/// 从 `root` 的直接子节点开始深度优先遍历：有子节点的主题把
/// 自己的标题拼入前缀后递归；叶子产出一行。标题为空的节点连同
/// 其整个子树被跳过（见 DESIGN.md 的未决问题）。
pub fn tree_to_rows(root: &TopicNode, diag: &mut dyn Diagnostics) -> Vec<TableRow> {
    walk(&root.children, "", diag)
}

fn walk(topics: &[TopicNode], parent_title: &str, diag: &mut dyn Diagnostics) -> Vec<TableRow> {
    let mut rows = Vec::new();

    for topic in topics {
        if topic.title.is_empty() {
            continue;
        }

        let full_title = if parent_title.is_empty() {
            topic.title.clone()
        } else {
            format!("{parent_title}{PATH_SEPARATOR}{}", topic.title)
        };

        if !topic.children.is_empty() {
            rows.extend(walk(&topic.children, &full_title, diag));
        } else {
            let (module_path, case_name) = match full_title.rsplit_once(PATH_SEPARATOR) {
                Some((modules, name)) => (modules.to_string(), name.to_string()),
                None => (String::new(), full_title),
            };
            let fields = decode_notes(topic.notes.as_deref(), diag);
            rows.push([
                module_path,
                case_name,
                fields.precondition,
                fields.steps,
                fields.expected_result,
                fields.vehicle_type,
                fields.priority,
            ]);
        }
    }

    rows
}
