//! Conversion Core Module
//!
//! 平坦行模型与嵌套主题模型之间的双向映射。
//! `to_tree` 把表格行折叠成主题树，`to_rows` 把主题树深度优先
//! 展开回表格行。两个方向都只在内存模型上工作，文件读写由
//! excel/xmind 边界模块负责。

mod to_rows;
mod to_tree;

pub use to_rows::tree_to_rows;
pub use to_tree::{rows_to_tree, SheetConversion};

/// 一行输出表格数据（列顺序：模块、用例名称、前置条件、执行步骤、
/// 预期结果、车型、优先级）
pub type TableRow = [String; 7];
