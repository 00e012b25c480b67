//! Excel Boundary Module
//!
//! 表格文档的读写边界。读取端基于 calamine，按工作表产出
//! 已解开合并单元格的稠密字符串网格；写出端基于 rust_xlsxwriter，
//! 负责固定的列宽/表头/边框模板。核心转换逻辑不接触文件格式，
//! 只消费/产出这里定义的内存表示。

mod reader;
mod writer;

pub use reader::{ExcelReader, SheetGrid};
pub use writer::ExcelWriter;
