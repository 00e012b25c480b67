//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを構築する。
//! `Converter` 是变换处理的门面：按方向调度两个转换管线，
//! 维护工作表粒度的部分失败语义与输出文件命名。

use std::path::{Path, PathBuf};

use log::Level;
use uuid::Uuid;

use crate::api::ConversionKind;
use crate::convert::{rows_to_tree, tree_to_rows};
use crate::diagnostics::Diagnostics;
use crate::error::ConvertError;
use crate::excel::{ExcelReader, ExcelWriter};
use crate::xmind::{read_document, write_document, XmindDocument};

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、
/// 必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use casemind::{ConverterBuilder, ConversionKind, LogDiagnostics};
/// use std::path::Path;
///
/// # fn main() -> Result<(), casemind::ConvertError> {
/// let converter = ConverterBuilder::new()
///     .with_kind(ConversionKind::ExcelToXmind)
///     .build();
/// let outputs = converter.convert_file(Path::new("cases.xlsx"), &mut LogDiagnostics)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    kind: Option<ConversionKind>,
    output_dir: Option<PathBuf>,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 変換方向: 入力ファイルの拡張子から自動検出
    /// - 出力先: 入力ファイルと同じディレクトリ
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換方向を明示的に指定する（拡張子検出をオーバーライド）
    pub fn with_kind(mut self, kind: ConversionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// 出力ディレクトリを指定する
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// `Converter`インスタンスを生成する
    pub fn build(self) -> Converter {
        Converter {
            kind: self.kind,
            output_dir: self.output_dir,
        }
    }
}

/// 変換処理のファサード
///
/// 一次调用转换一个输入文件。文件级错误（文件不存在、扩展名不受
/// 支持、源文档不可读）作为 `Err` 返回；工作表级错误记入诊断后
/// 跳过该表继续；行级问题在转换核心内消化，绝不向上传播。
#[derive(Debug)]
pub struct Converter {
    kind: Option<ConversionKind>,
    output_dir: Option<PathBuf>,
}

impl Converter {
    /// 转换一个输入文件，返回写出的全部输出文件路径
    pub fn convert_file(
        &self,
        input: &Path,
        diag: &mut dyn Diagnostics,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        if !input.exists() {
            return Err(ConvertError::InputNotFound(input.to_path_buf()));
        }

        let kind = match self.kind {
            Some(kind) => kind,
            None => ConversionKind::detect(input)?,
        };
        let output_dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        diag.record(Level::Info, format!("开始处理文件: {}", input.display()));

        match kind {
            ConversionKind::ExcelToXmind => self.excel_to_xmind(input, &output_dir, &stem, diag),
            ConversionKind::XmindToExcel => self.xmind_to_excel(input, &output_dir, &stem, diag),
        }
    }

    /// Excel → XMind：每张工作表产出一个独立的 .xmind 文件
    fn excel_to_xmind(
        &self,
        input: &Path,
        output_dir: &Path,
        stem: &str,
        diag: &mut dyn Diagnostics,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        let mut reader = ExcelReader::open(input)?;
        let sheet_names = reader.sheet_names();
        diag.record(
            Level::Info,
            format!("成功加载Excel文件，共包含 {} 个工作表", sheet_names.len()),
        );

        let mut outputs = Vec::new();
        for sheet_name in &sheet_names {
            match self.convert_excel_sheet(&mut reader, sheet_name, output_dir, stem, diag) {
                Ok(path) => outputs.push(path),
                Err(e) => {
                    // 工作表级可恢复：记录后继续处理其余工作表
                    diag.record(
                        Level::Error,
                        format!("处理工作表 '{sheet_name}' 时出错: {e}"),
                    );
                    continue;
                }
            }
        }

        diag.record(Level::Info, "转换完成".to_string());
        Ok(outputs)
    }

    /// 转换一张 Excel 工作表并写出 .xmind 文件
    fn convert_excel_sheet(
        &self,
        reader: &mut ExcelReader,
        sheet_name: &str,
        output_dir: &Path,
        stem: &str,
        diag: &mut dyn Diagnostics,
    ) -> Result<PathBuf, ConvertError> {
        diag.record(Level::Info, format!("开始处理工作表: {sheet_name}"));

        let grid = reader.read_sheet(sheet_name)?;
        let conversion = rows_to_tree(sheet_name, &grid.rows, diag);

        let output_path =
            output_dir.join(format!("{stem}_{}_{sheet_name}.xmind", Uuid::new_v4()));
        let document = XmindDocument::single_sheet(sheet_name, conversion.root);
        write_document(&document, &output_path)?;

        diag.record(
            Level::Info,
            format!(
                "工作表 '{sheet_name}' 处理完成，成功转换 {} 条用例",
                conversion.processed
            ),
        );
        diag.record(
            Level::Info,
            format!("已保存XMind文件: {}", output_path.display()),
        );
        Ok(output_path)
    }

    /// XMind → Excel：全部画布进同一个工作簿，每画布一张表
    fn xmind_to_excel(
        &self,
        input: &Path,
        output_dir: &Path,
        stem: &str,
        diag: &mut dyn Diagnostics,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        let document = read_document(input)?;
        let mut writer = ExcelWriter::new();
        let total = document.sheets.len();

        for (index, sheet) in document.sheets.iter().enumerate() {
            diag.record(
                Level::Info,
                format!("处理工作表 {}/{}: {}", index + 1, total, sheet.title),
            );

            let rows = tree_to_rows(&sheet.root, diag);
            match writer.add_sheet(&sheet.root.title, &rows) {
                Ok(tab_name) => diag.record(
                    Level::Info,
                    format!("工作表 '{tab_name}' 处理完成，成功转换 {} 条用例", rows.len()),
                ),
                Err(e) => {
                    diag.record(
                        Level::Error,
                        format!("处理工作表 '{}' 时出错: {e}", sheet.title),
                    );
                    continue;
                }
            }
        }

        let output_path = output_dir.join(format!("{stem}_{}.xlsx", Uuid::new_v4()));
        writer.save(&output_path)?;
        diag.record(
            Level::Info,
            format!("转换完成，已保存Excel文件: {}", output_path.display()),
        );
        Ok(vec![output_path])
    }
}
