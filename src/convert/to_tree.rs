//! Table To Tree Module
//!
//! 把一张工作表的原始行（含表头）转换为以表名为根的主题树。
//! 单遍处理：解析 → 校验 → 沿模块路径折叠 → 在叶子上挂编码备注。
//! 所有行级问题都记录诊断后跳过，绝不中断整表转换。

use crate::diagnostics::Diagnostics;
use crate::hierarchy::{descend, find_or_create_child};
use crate::notes::{encode_notes, NoteFields};
use crate::types::{TestCaseRow, TopicNode, PATH_SEPARATOR};
use crate::validate::{validate, SkipReason};
use log::Level;

/// 一张工作表的转换结果
#[derive(Debug)]
pub struct SheetConversion {
    /// 构建出的主题树根（标题为工作表名）
    pub root: TopicNode,

    /// 成功转换的行数（用于每表汇总）
    pub processed: usize,
}

/// 把原始行序列转换为主题树
///
/// # 引数
///
/// * `sheet_title` - 工作表名（也作为根主题标题；出现在行级诊断中）
/// * `rows` - 行优先的原始网格，第 1 行为表头；合并单元格应已在
///   读取边界解开（左上值传播到整个区域）
/// * `diag` - 诊断シンク
///
/// # アルゴリズム
///
/// 跳过表头后逐行：列数不匹配或必填字段强制失败 → 记录并丢弃；
/// 校验失败（[`SkipReason`]）→ 记录（含 1 始まり行号）并丢弃；
/// 否则按 `→` 拆分模块路径（空段丢弃）、沿段折叠到叶子、再以
/// 用例名查找或创建用例节点，挂上编码后的备注。同一路径下重复的
/// 用例名采用后写覆盖语义，并记录一条可检测的冲突警告。
pub fn rows_to_tree(
    sheet_title: &str,
    rows: &[Vec<Option<String>>],
    diag: &mut dyn Diagnostics,
) -> SheetConversion {
    let mut root = TopicNode::new(sheet_title);
    let mut processed = 0usize;

    // 第 1 行是表头；行号按 1 始まり报告
    for (index, cells) in rows.iter().enumerate().skip(1) {
        let row_number = index + 1;

        let Some(row) = TestCaseRow::from_cells(cells) else {
            diag.record(
                Level::Warn,
                format!("工作表 '{sheet_title}' 第 {row_number} 行列数不匹配，已跳过"),
            );
            continue;
        };

        match validate(&row) {
            Ok(()) => {}
            Err(SkipReason::MissingRequiredField) => {
                diag.record(
                    Level::Warn,
                    format!("工作表 '{sheet_title}' 第 {row_number} 行模块/用例名称/车型为空"),
                );
                continue;
            }
            Err(SkipReason::InvalidPriority) => {
                diag.record(
                    Level::Warn,
                    format!(
                        "工作表 '{sheet_title}' 第 {row_number} 行优先级无效: {}",
                        row.priority
                    ),
                );
                continue;
            }
        }

        attach_case(&mut root, &row, sheet_title, row_number, diag);
        processed += 1;
    }

    SheetConversion { root, processed }
}

/// 沿模块路径下降并把用例挂为叶子节点
fn attach_case(
    root: &mut TopicNode,
    row: &TestCaseRow,
    sheet_title: &str,
    row_number: usize,
    diag: &mut dyn Diagnostics,
) {
    let segments = row
        .module_path
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty());
    let parent = descend(root, segments);
    let leaf = find_or_create_child(parent, &row.name);

    if leaf.notes.is_some() {
        // 同一模块路径下重复的用例名：后写覆盖（详见 DESIGN.md 的未决问题）
        diag.record(
            Level::Warn,
            format!(
                "工作表 '{sheet_title}' 第 {row_number} 行用例 '{}' 与已有用例重名，备注被覆盖",
                row.name
            ),
        );
    }
    leaf.notes = Some(encode_notes(&NoteFields::from(row)));
}
