//! Excel Reader Module
//!
//! calamineを使用したExcelファイル読み込みの実装。
//! 每张工作表产出一个稠密的行优先网格：所有单元格被强制为
//! `Option<String>`（类型化提取，核心对字符串保持纯粹），
//! 合并单元格区域以左上值传播的方式解开。

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};

use crate::error::ConvertError;

/// 一张工作表的稠密网格
#[derive(Debug, Clone)]
pub struct SheetGrid {
    /// 工作表名
    pub title: String,

    /// 行优先网格（含表头行；空单元格为 `None`）
    pub rows: Vec<Vec<Option<String>>>,
}

/// Excel 工作簿读取器
///
/// calamineのラッパーとして、按工作表读取的操作を提供します。
/// 打开时一并加载合并单元格区域信息。
pub struct ExcelReader {
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl ExcelReader {
    /// 打开一个 .xlsx 文件
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExcelReader)` - 成功打开（仅支持 XLSX 格式）
    /// * `Err(ConvertError)` - 文件不可读或格式不受支持（致命，整次运行中止）
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let buffer = std::fs::read(path)?;

        // calamineでワークブックを開く
        let sheets =
            open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(ConvertError::Spreadsheet)?;
        let mut workbook = match sheets {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(ConvertError::MalformedDocument(
                    "only XLSX workbooks are supported".to_string(),
                ))
            }
        };

        // 合并单元格区域信息
        workbook
            .load_merged_regions()
            .map_err(|e| ConvertError::Spreadsheet(e.into()))?;

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 读取一张工作表为稠密网格
    ///
    /// 行提取前先解开所有合并单元格区域：左上单元格的值被传播到
    /// 区域内的每个单元格，保证纵向/横向合并的「模块」列仍能按行
    /// 读出平坦值。
    pub fn read_sheet(&mut self, sheet_name: &str) -> Result<SheetGrid, ConvertError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ConvertError::Spreadsheet(e.into()))?;

        let mut rows = match (range.start(), range.end()) {
            (Some(start), Some(end)) => {
                // 从 (0,0) 起的绝对坐标稠密网格，与合并区域坐标对齐
                let height = end.0 as usize + 1;
                let width = end.1 as usize + 1;
                let mut grid = vec![vec![None; width]; height];
                for (row_offset, row) in range.rows().enumerate() {
                    for (col_offset, cell) in row.iter().enumerate() {
                        let r = start.0 as usize + row_offset;
                        let c = start.1 as usize + col_offset;
                        grid[r][c] = coerce_cell(cell);
                    }
                }
                grid
            }
            _ => Vec::new(),
        };

        let regions: Vec<((u32, u32), (u32, u32))> =
            match self.workbook.worksheet_merge_cells(sheet_name) {
                Some(Ok(regions)) => regions.iter().map(|dims| (dims.start, dims.end)).collect(),
                Some(Err(_)) | None => Vec::new(),
            };
        unpack_merged_regions(&mut rows, &regions);

        Ok(SheetGrid {
            title: sheet_name.to_string(),
            rows,
        })
    }
}

/// 把合并区域的左上值传播到区域内的每个单元格
///
/// 越出网格边界的坐标被安全忽略。
fn unpack_merged_regions(
    grid: &mut [Vec<Option<String>>],
    regions: &[((u32, u32), (u32, u32))],
) {
    for ((min_row, min_col), (max_row, max_col)) in regions {
        let top_left = grid
            .get(*min_row as usize)
            .and_then(|row| row.get(*min_col as usize))
            .cloned()
            .flatten();

        for row_index in *min_row..=*max_row {
            let Some(row) = grid.get_mut(row_index as usize) else {
                continue;
            };
            for col_index in *min_col..=*max_col {
                if let Some(cell) = row.get_mut(col_index as usize) {
                    *cell = top_left.clone();
                }
            }
        }
    }
}

/// 把 calamine 单元格值强制为字符串（空单元格为 `None`）
///
/// 整数值的浮点（如优先级列被 Excel 存成 1.0）格式化为不带小数点
/// 的形式，与用户在表格中看到的一致。
fn coerce_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::Error(e) => Some(format!("{:?}", e)),
        other => {
            let text = other.to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_cell_empty_variants() {
        assert_eq!(coerce_cell(&Data::Empty), None);
        assert_eq!(coerce_cell(&Data::String(String::new())), None);
    }

    #[test]
    fn test_coerce_cell_integral_float() {
        assert_eq!(coerce_cell(&Data::Float(1.0)), Some("1".to_string()));
        assert_eq!(coerce_cell(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(coerce_cell(&Data::Int(3)), Some("3".to_string()));
    }

    #[test]
    fn test_coerce_cell_string_and_bool() {
        assert_eq!(
            coerce_cell(&Data::String("ModelX".to_string())),
            Some("ModelX".to_string())
        );
        assert_eq!(coerce_cell(&Data::Bool(true)), Some("true".to_string()));
    }

    #[test]
    fn test_unpack_merged_regions_propagates_top_left() {
        let mut grid = vec![
            vec![Some("模块A".to_string()), Some("x".to_string())],
            vec![None, Some("y".to_string())],
            vec![None, Some("z".to_string())],
        ];
        // A1:A3 纵向合并
        unpack_merged_regions(&mut grid, &[((0, 0), (2, 0))]);

        for row in &grid {
            assert_eq!(row[0].as_deref(), Some("模块A"));
        }
        assert_eq!(grid[1][1].as_deref(), Some("y"));
    }

    #[test]
    fn test_unpack_merged_regions_out_of_bounds_is_ignored() {
        let mut grid = vec![vec![Some("v".to_string())]];
        unpack_merged_regions(&mut grid, &[((0, 0), (5, 5))]);
        assert_eq!(grid[0][0].as_deref(), Some("v"));
    }

    #[test]
    fn test_unpack_merged_regions_empty_top_left_clears_region() {
        let mut grid = vec![
            vec![None, Some("保留".to_string())],
            vec![Some("残值".to_string()), None],
        ];
        unpack_merged_regions(&mut grid, &[((0, 0), (1, 0))]);
        assert_eq!(grid[1][0], None);
        assert_eq!(grid[0][1].as_deref(), Some("保留"));
    }
}
