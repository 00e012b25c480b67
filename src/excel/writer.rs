//! Excel Writer Module
//!
//! rust_xlsxwriterを使用したExcelファイル書き出しの実装。
//! 固定模板：列宽 A..G = 30,30,45,45,45,20,10，表头加粗居中带
//! 浅灰底色，数据单元格细边框并自动换行，关闭网格线。
//! 工作表名在加入前经过规整与去重。

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::convert::TableRow;
use crate::error::ConvertError;
use crate::sheet_title::{sanitize, uniquify};
use crate::types::{COLUMN_HEADERS, COLUMN_WIDTHS};

/// 表头/边框使用的浅灰色（LightGray）
const LIGHT_GRAY: Color = Color::RGB(0xD3D3D3);

/// Excel 工作簿写出器
///
/// 逐表累积数据，[`ExcelWriter::save`] 时一次性写出文件——
/// 不会留下写了一半的输出工件。
pub struct ExcelWriter {
    workbook: Workbook,
    taken_titles: HashSet<String>,
}

impl Default for ExcelWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelWriter {
    /// 创建一个空工作簿
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            taken_titles: HashSet::new(),
        }
    }

    /// 新增一张带固定模板的工作表并填入数据行
    ///
    /// # 引数
    ///
    /// * `title` - 原始标题（来自思维导图根主题，可能含非法字符）
    /// * `rows` - 数据行（不含表头）
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 实际使用的（规整且唯一的）工作表名
    /// * `Err(ConvertError)` - rust_xlsxwriter 拒绝写入时
    pub fn add_sheet(&mut self, title: &str, rows: &[TableRow]) -> Result<String, ConvertError> {
        let tab_name = uniquify(&sanitize(title), &self.taken_titles);

        let header_format = Format::new()
            .set_font_name("Calibri")
            .set_font_size(16)
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(LIGHT_GRAY);
        let body_format = Format::new()
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(LIGHT_GRAY);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&tab_name)?;

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (col, header) in COLUMN_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (row_index, row) in rows.iter().enumerate() {
            for (col, content) in row.iter().enumerate() {
                worksheet.write_string_with_format(
                    row_index as u32 + 1,
                    col as u16,
                    content,
                    &body_format,
                )?;
            }
        }

        worksheet.set_screen_gridlines(false);

        self.taken_titles.insert(tab_name.clone());
        Ok(tab_name)
    }

    /// 已加入的工作表数
    pub fn sheet_count(&self) -> usize {
        self.taken_titles.len()
    }

    /// 把工作簿写到文件
    pub fn save(mut self, path: &Path) -> Result<(), ConvertError> {
        self.workbook.save(path)?;
        Ok(())
    }

    /// 把工作簿序列化到内存（测试用）
    pub fn save_to_buffer(mut self) -> Result<Vec<u8>, ConvertError> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> TableRow {
        [
            "模块1→模块2".to_string(),
            "TC001".to_string(),
            "无".to_string(),
            "步骤1".to_string(),
            "预期1".to_string(),
            "ModelX".to_string(),
            "1".to_string(),
        ]
    }

    #[test]
    fn test_add_sheet_returns_sanitized_name() {
        let mut writer = ExcelWriter::new();
        let name = writer.add_sheet("登录/注册", &[sample_row()]).unwrap();
        assert_eq!(name, "登录_注册");
        assert_eq!(writer.sheet_count(), 1);
    }

    #[test]
    fn test_add_sheet_uniquifies_duplicate_titles() {
        let mut writer = ExcelWriter::new();
        let first = writer.add_sheet("模块", &[]).unwrap();
        let second = writer.add_sheet("模块", &[]).unwrap();
        assert_eq!(first, "模块");
        assert_eq!(second, "模块_2");
        assert_eq!(writer.sheet_count(), 2);
    }

    #[test]
    fn test_save_to_buffer_produces_xlsx_archive() {
        let mut writer = ExcelWriter::new();
        writer.add_sheet("测试表", &[sample_row()]).unwrap();
        let buffer = writer.save_to_buffer().unwrap();
        // XLSX 是 ZIP 档案，以 PK 签名开头
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_empty_title_gets_placeholder_name() {
        let mut writer = ExcelWriter::new();
        let name = writer.add_sheet("", &[]).unwrap();
        assert!(name.starts_with("Sheet_"));
    }
}
