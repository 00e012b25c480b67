//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// casemindクレート全体で使用するエラー型
///
/// 変換一次运行中所有致命（文件级）错误的统一类型。
/// 行级与备注段级的问题不会成为 `ConvertError`——它们只产生诊断记录
/// 并跳过对应的行/段；工作表级的异常由门面捕获后记入诊断，
/// 继续处理其余工作表。
///
/// # エラーの種類
///
/// - `Io`: I/O 操作失败（文件读写等）
/// - `Spreadsheet`: calamine 解析 Excel 文件失败
/// - `SpreadsheetWrite`: rust_xlsxwriter 写出 Excel 文件失败
/// - `Zip`: XMind 档案（ZIP）读写失败
/// - `Xml` / `Json`: XMind 内容文档解析失败
/// - `InputNotFound` / `UnsupportedFormat`: 入口参数错误（用户可见）
/// - `MalformedDocument`: 文档结构不符合预期
/// - `SecurityViolation`: 档案超出安全限制（ZIP bomb、路径穿越等）
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Excelファイルの書き出し中に発生したエラー（rust_xlsxwriter由来）
    #[error("Failed to write Excel file: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// XMindアーカイブ（ZIP）の読み書きエラー
    #[error("XMind archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XMind content.xml の解析・生成エラー
    #[error("XMind XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XMind content.json の解析エラー
    #[error("XMind JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 入力ファイルが存在しない
    #[error("输入文件不存在: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 対応していないファイル拡張子
    #[error("不支持的文件类型: {extension}. 仅支持 .xlsx 和 .xmind 文件")]
    UnsupportedFormat {
        /// 検出された拡張子（小文字化済み、空もあり得る）
        extension: String,
    },

    /// 文書構造が期待と一致しない
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb、パストラバーサル、サイズ上限超過など。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ConvertError = io_err.into();

        match error {
            ConvertError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_unsupported_format_display() {
        let error = ConvertError::UnsupportedFormat {
            extension: ".txt".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains(".txt"));
        assert!(msg.contains(".xlsx"));
        assert!(msg.contains(".xmind"));
    }

    #[test]
    fn test_input_not_found_display() {
        let error = ConvertError::InputNotFound(PathBuf::from("missing.xlsx"));
        assert!(error.to_string().contains("missing.xlsx"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), ConvertError> {
            let _file = std::fs::File::open("nonexistent_file.xmind")?;
            Ok(())
        }

        match io_operation() {
            Err(ConvertError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_malformed_document_display() {
        let error = ConvertError::MalformedDocument("missing root topic".to_string());
        assert!(error.to_string().contains("missing root topic"));
    }
}
