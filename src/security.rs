//! Security Module
//!
//! 打开 XMind 档案（ZIP）时的安全限制。
//! 防范 ZIP bomb、パストラバーサル攻撃、超大条目等恶意输入。

use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::error::ConvertError;

/// 档案安全限制
///
/// 思维导图文件通常在几 MB 以内，上限取得远高于正常值。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 档案内最大条目数
    pub max_entry_count: usize,
    /// 单个条目解压后的最大尺寸（字节）
    pub max_entry_size: u64,
    /// 全部条目解压后的累计最大尺寸（字节）
    pub max_decompressed_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_entry_count: 1_000,
            max_entry_size: 104_857_600,         // 100MB
            max_decompressed_size: 536_870_912,  // 512MB
        }
    }
}

/// 校验整个档案是否在安全限制内
///
/// 逐条目检查路径与尺寸；任何违反都返回
/// [`ConvertError::SecurityViolation`]（致命，整次运行中止）。
pub(crate) fn check_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    config: &SecurityConfig,
) -> Result<(), ConvertError> {
    if archive.len() > config.max_entry_count {
        return Err(ConvertError::SecurityViolation(format!(
            "archive contains too many entries: {} (max: {})",
            archive.len(),
            config.max_entry_count
        )));
    }

    let mut total_decompressed = 0u64;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;

        validate_zip_path(entry.name()).map_err(ConvertError::SecurityViolation)?;

        let size = entry.size();
        if size > config.max_entry_size {
            return Err(ConvertError::SecurityViolation(format!(
                "entry '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                entry.name(),
                size,
                config.max_entry_size
            )));
        }

        total_decompressed = total_decompressed.checked_add(size).ok_or_else(|| {
            ConvertError::SecurityViolation(
                "total decompressed size calculation overflow".to_string(),
            )
        })?;
        if total_decompressed > config.max_decompressed_size {
            return Err(ConvertError::SecurityViolation(format!(
                "total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total_decompressed, config.max_decompressed_size
            )));
        }
    }

    Ok(())
}

/// 校验档案内部路径
///
/// 拒绝空路径、绝对路径、含 `..` 的路径穿越以及反斜杠分隔符。
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("empty archive path is not allowed".to_string());
    }

    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("absolute archive path is not allowed: {path}"));
    }

    if path.contains("..") {
        return Err(format!("path traversal detected: {path}"));
    }

    if path.contains('\\') {
        return Err(format!("backslash in archive path is not allowed: {path}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_zip_path_valid() {
        assert!(validate_zip_path("content.xml").is_ok());
        assert!(validate_zip_path("META-INF/manifest.xml").is_ok());
        assert!(validate_zip_path("Thumbnails/thumbnail.png").is_ok());
    }

    #[test]
    fn test_validate_zip_path_empty() {
        assert!(validate_zip_path("").is_err());
    }

    #[test]
    fn test_validate_zip_path_absolute() {
        assert!(validate_zip_path("/etc/passwd").is_err());
        assert!(validate_zip_path("C:\\Windows\\system32").is_err());
    }

    #[test]
    fn test_validate_zip_path_traversal() {
        assert!(validate_zip_path("../etc/passwd").is_err());
        assert!(validate_zip_path("META-INF/../../etc/passwd").is_err());
    }

    #[test]
    fn test_validate_zip_path_backslash() {
        assert!(validate_zip_path("META-INF\\manifest.xml").is_err());
    }

    #[test]
    fn test_check_archive_within_limits() {
        use std::io::{Cursor, Write};
        use zip::write::FileOptions;

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("content.xml", FileOptions::default()).unwrap();
            zip.write_all(b"<xmap-content/>").unwrap();
            zip.finish().unwrap();
        }
        buffer.set_position(0);

        let mut archive = ZipArchive::new(buffer).unwrap();
        assert!(check_archive(&mut archive, &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_check_archive_rejects_oversized_entry() {
        use std::io::{Cursor, Write};
        use zip::write::FileOptions;

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("content.xml", FileOptions::default()).unwrap();
            zip.write_all(&vec![0u8; 64]).unwrap();
            zip.finish().unwrap();
        }
        buffer.set_position(0);

        let tight = SecurityConfig {
            max_entry_size: 16,
            ..SecurityConfig::default()
        };
        let mut archive = ZipArchive::new(buffer).unwrap();
        match check_archive(&mut archive, &tight) {
            Err(ConvertError::SecurityViolation(msg)) => assert!(msg.contains("content.xml")),
            other => panic!("expected SecurityViolation, got {other:?}"),
        }
    }
}
