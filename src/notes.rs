//! Note Codec Module
//!
//! 叶子主题的备注文本与五个带标签字段之间的编解码。
//! 编码格式为 `【标签】` 前缀的分段文本，字段顺序固定：
//! 前置条件、执行步骤、预期结果、车型、优先级。
//! 可选字段为空时整段省略（不输出空值段）；优先级恒为最后一段。

use crate::diagnostics::Diagnostics;
use crate::types::{
    TestCaseRow, LABEL_EXPECTED, LABEL_PRECONDITION, LABEL_PRIORITY, LABEL_STEPS,
    LABEL_VEHICLE_TYPE,
};
use log::Level;

/// 标签起始定界符
const LABEL_OPEN: char = '【';
/// 标签结束定界符
const LABEL_CLOSE: char = '】';

/// 备注的逻辑视图：五个定序字符串字段
///
/// 解码时缺失的标签一律取空字符串，因此任何备注（包括 `None`）
/// 都能解出一个完整的字段组。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFields {
    /// 前置条件
    pub precondition: String,
    /// 执行步骤
    pub steps: String,
    /// 预期结果
    pub expected_result: String,
    /// 车型
    pub vehicle_type: String,
    /// 优先级
    pub priority: String,
}

impl From<&TestCaseRow> for NoteFields {
    fn from(row: &TestCaseRow) -> Self {
        Self {
            precondition: row.precondition.clone().unwrap_or_default(),
            steps: row.steps.clone().unwrap_or_default(),
            expected_result: row.expected_result.clone().unwrap_or_default(),
            vehicle_type: row.vehicle_type.clone(),
            priority: row.priority.clone(),
        }
    }
}

/// 把字段组编码为单个备注文本
///
/// 四个可选字段（前置条件、执行步骤、预期结果、车型）按固定顺序，
/// 非空时各追加一段 `【标签】\n值`；最后恒追加 `【优先级】值`
/// （若前面没有任何段则不带前导换行）。纯函数，无副作用。
///
/// # 使用例
///
/// ```rust
/// use casemind::NoteFields;
///
/// let fields = NoteFields {
///     vehicle_type: "ModelX".to_string(),
///     priority: "1".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(casemind::encode_notes(&fields), "【车型】\nModelX\n【优先级】1");
/// ```
pub fn encode_notes(fields: &NoteFields) -> String {
    let optional_parts = [
        (LABEL_PRECONDITION, &fields.precondition),
        (LABEL_STEPS, &fields.steps),
        (LABEL_EXPECTED, &fields.expected_result),
        (LABEL_VEHICLE_TYPE, &fields.vehicle_type),
    ];

    let body = optional_parts
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{LABEL_OPEN}{label}{LABEL_CLOSE}\n{value}"))
        .collect::<Vec<_>>()
        .join("\n");

    let priority_part = format!(
        "{LABEL_OPEN}{LABEL_PRIORITY}{LABEL_CLOSE}{}",
        fields.priority
    );
    if body.is_empty() {
        priority_part
    } else {
        format!("{body}\n{priority_part}")
    }
}

/// 把备注文本解码回五个定序字段
///
/// 以 `【` 切分；每个非空段再按首个 `】` 拆为（标签, 值），值做
/// 首尾空白修剪。没有闭合定界符的段记录一条诊断后跳过，不致命；
/// 未知标签被忽略；同一标签出现多次时后者覆盖前者。
///
/// 往返律：对任何值中既不含 `【`/`】` 也不带首尾空白的字段组 `f`，
/// `decode_notes(encode_notes(f)) == f`。
pub fn decode_notes(blob: Option<&str>, diag: &mut dyn Diagnostics) -> NoteFields {
    let mut fields = NoteFields::default();
    let blob = match blob {
        Some(text) if !text.is_empty() => text,
        _ => return fields,
    };

    for segment in blob.split(LABEL_OPEN) {
        if segment.trim().is_empty() {
            continue;
        }
        let Some((label, value)) = segment.split_once(LABEL_CLOSE) else {
            diag.record(Level::Warn, format!("无效的备注格式: {segment}"));
            continue;
        };
        let value = value.trim().to_string();
        match label {
            LABEL_PRECONDITION => fields.precondition = value,
            LABEL_STEPS => fields.steps = value,
            LABEL_EXPECTED => fields.expected_result = value,
            LABEL_VEHICLE_TYPE => fields.vehicle_type = value,
            LABEL_PRIORITY => fields.priority = value,
            _ => {}
        }
    }

    fields
}
