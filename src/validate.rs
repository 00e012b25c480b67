//! Row Validator Module
//!
//! 测试用例行的必填字段与优先级取值检查。
//! 验证失败是行级可恢复问题：调用方记录诊断（含工作表名与
//! 1 始まり的行号）后跳过该行，绝不中断整张表的转换。

use crate::types::{TestCaseRow, PRIORITY_VALUES};
use thiserror::Error;

/// 行被跳过的原因
///
/// 以显式结果建模跳过路径（而非异常控制流），便于单独测试。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 模块路径、用例名称或车型为空
    #[error("missing-required-field")]
    MissingRequiredField,

    /// 优先级不在 "0".."5" 集合内
    #[error("invalid-priority")]
    InvalidPriority,
}

/// 校验一行测试用例
///
/// # 戻り値
///
/// * `Ok(())` - 行有效
/// * `Err(SkipReason::MissingRequiredField)` - 修剪后模块路径/用例名称/车型为空
/// * `Err(SkipReason::InvalidPriority)` - 修剪后优先级不在合法集合内
///
/// 纯函数；诊断输出由调用方负责。
pub fn validate(row: &TestCaseRow) -> Result<(), SkipReason> {
    if row.module_path.trim().is_empty()
        || row.name.trim().is_empty()
        || row.vehicle_type.trim().is_empty()
    {
        return Err(SkipReason::MissingRequiredField);
    }

    if !PRIORITY_VALUES.contains(&row.priority.trim()) {
        return Err(SkipReason::InvalidPriority);
    }

    Ok(())
}
