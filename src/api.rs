//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::path::Path;

use crate::error::ConvertError;

/// 変換方向
///
/// 通常由输入文件扩展名推断（`.xlsx` → 表格转导图，`.xmind` →
/// 导图转表格），也可以通过 [`crate::ConverterBuilder::with_kind`]
/// 显式指定以覆盖检测结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionKind {
    /// Excel 表格 → XMind 思维导图
    ExcelToXmind,

    /// XMind 思维导图 → Excel 表格
    XmindToExcel,
}

impl ConversionKind {
    /// 按文件扩展名（小写化后）检测转换方向
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionKind)` - 扩展名为 `.xlsx` 或 `.xmind`
    /// * `Err(ConvertError::UnsupportedFormat)` - 其它扩展名（含无扩展名），
    ///   错误信息中带出检测到的扩展名
    pub fn detect(path: &Path) -> Result<Self, ConvertError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" => Ok(Self::ExcelToXmind),
            "xmind" => Ok(Self::XmindToExcel),
            _ => Err(ConvertError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    extension
                } else {
                    format!(".{extension}")
                },
            }),
        }
    }
}
