//! Sheet Title Module
//!
//! 把来自思维导图的标题规整为合法且唯一的 Excel 工作表名。
//! Excel 对工作表名的限制：不能包含 `/ \ [ ] * ? :`，长度不超过 31 个字符。

use std::collections::HashSet;
use uuid::Uuid;

/// Excel 工作表名中不允许出现的字符
const INVALID_CHARS: [char; 7] = ['/', '\\', '[', ']', '*', '?', ':'];

/// 工作表名最大长度（字符数）
const MAX_TITLE_LEN: usize = 31;

/// 规整一个工作表标题
///
/// 非法字符替换为 `_`，按字符截断到 31；结果为空或全空白时
/// 代之以 `Sheet_<8位十六进制>` 占位名（随机分支是本函数唯一的
/// 非确定性来源）。
pub fn sanitize(title: &str) -> String {
    let result: String = title
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_TITLE_LEN)
        .collect();

    if result.trim().is_empty() {
        let hex = Uuid::new_v4().simple().to_string();
        format!("Sheet_{}", &hex[..8])
    } else {
        result
    }
}

/// 在工作簿内保证工作表名唯一
///
/// 已被占用时追加 `_2`、`_3`……并保持总长不超过 31 个字符。
pub fn uniquify(title: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(title) {
        return title.to_string();
    }

    for counter in 2u32.. {
        let suffix = format!("_{counter}");
        let keep = MAX_TITLE_LEN.saturating_sub(suffix.chars().count());
        let candidate: String = title.chars().take(keep).chain(suffix.chars()).collect();
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
    unreachable!("uniquify counter exhausted");
}
