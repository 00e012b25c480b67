//! 测试用例格式转换工具の CLI エントリーポイント。
//! 转换方向默认按扩展名检测，可用 `--direction` 覆盖。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use casemind::{ConversionKind, ConverterBuilder, LogDiagnostics};

/// 测试用例格式转换工具（Excel ↔ XMind）
#[derive(Debug, Parser)]
#[command(name = "casemind", version, about)]
struct Cli {
    /// 输入文件路径（.xlsx 或 .xmind）
    input: PathBuf,

    /// 显式指定转换方向（默认按文件扩展名检测）
    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// 输出目录（默认与输入文件相同）
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    /// Excel 表格 → XMind 思维导图
    ExcelToXmind,
    /// XMind 思维导图 → Excel 表格
    XmindToExcel,
}

impl From<Direction> for ConversionKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::ExcelToXmind => ConversionKind::ExcelToXmind,
            Direction::XmindToExcel => ConversionKind::XmindToExcel,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut builder = ConverterBuilder::new();
    if let Some(direction) = cli.direction {
        builder = builder.with_kind(direction.into());
    }
    if let Some(output_dir) = cli.output_dir {
        builder = builder.with_output_dir(output_dir);
    }
    let converter = builder.build();

    match converter.convert_file(&cli.input, &mut LogDiagnostics) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("程序执行出错: {e}");
            ExitCode::FAILURE
        }
    }
}
