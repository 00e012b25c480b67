//! Diagnostics Module
//!
//! 変換過程の警告・情報を収集する注入式シンクを定義するモジュール。
//! 行级/段级的可恢复问题不会中断转换，只会以一条记录的形式流入
//! 这里定义的接口；门面与转换器都通过 `&mut dyn Diagnostics`
//! 接受调用方注入的实现，测试可以用 [`MemoryDiagnostics`]
//! 确定性地捕获全部输出，而不依赖全局日志状态。

use log::Level;

/// 診断シンク
///
/// 变换器产出的每条人类可读消息都经由 `record` 进入实现方。
pub trait Diagnostics {
    /// 1 条の診断メッセージを記録する
    fn record(&mut self, level: Level, message: String);
}

/// `log`ファサードへ転送するシンク
///
/// 二进制入口使用的默认实现；实际输出目标由 `env_logger` 等
/// 全局 logger 决定。
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn record(&mut self, level: Level, message: String) {
        log::log!(level, "{}", message);
    }
}

/// メモリ上に全記録を保持するシンク
///
/// テストや库调用方想要程序化检查诊断时使用。
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    /// 受け取った(レベル, メッセージ)の列（到着順）
    pub records: Vec<(Level, String)>,
}

impl MemoryDiagnostics {
    /// 空のシンクを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定レベルの記録数
    pub fn count(&self, level: Level) -> usize {
        self.records.iter().filter(|(l, _)| *l == level).count()
    }

    /// 部分文字列を含む記録が存在するか
    pub fn contains(&self, needle: &str) -> bool {
        self.records.iter().any(|(_, m)| m.contains(needle))
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&mut self, level: Level, message: String) {
        self.records.push((level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_diagnostics_records_in_order() {
        let mut diag = MemoryDiagnostics::new();
        diag.record(Level::Warn, "第一条".to_string());
        diag.record(Level::Info, "第二条".to_string());

        assert_eq!(diag.records.len(), 2);
        assert_eq!(diag.records[0], (Level::Warn, "第一条".to_string()));
        assert_eq!(diag.records[1].0, Level::Info);
    }

    #[test]
    fn test_memory_diagnostics_count_and_contains() {
        let mut diag = MemoryDiagnostics::new();
        diag.record(Level::Warn, "工作表 'S1' 第 3 行优先级无效".to_string());
        diag.record(Level::Warn, "工作表 'S1' 第 4 行模块为空".to_string());
        diag.record(Level::Info, "成功转换 2 条用例".to_string());

        assert_eq!(diag.count(Level::Warn), 2);
        assert_eq!(diag.count(Level::Info), 1);
        assert!(diag.contains("优先级无效"));
        assert!(!diag.contains("不存在的消息"));
    }

    #[test]
    fn test_log_diagnostics_is_usable_as_trait_object() {
        let mut sink = LogDiagnostics;
        let diag: &mut dyn Diagnostics = &mut sink;
        diag.record(Level::Debug, "转发到 log 门面".to_string());
    }
}
