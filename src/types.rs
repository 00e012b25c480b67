//! Types Module
//!
//! クレート全体で使用する共通データ型と定数を定義するモジュール。
//! テスト用例行（TestCaseRow）、マインドマップのトピック（TopicNode）、
//! および Excel 表头・路径分隔符などの固定文字列。

/// 模块路径分隔符
///
/// 既用于拆分/拼接 Excel「模块」列中的路径段，
/// 也用于把模块路径与用例名拼接成 XMind 主题链的完整标题。
pub const PATH_SEPARATOR: &str = "→";

/// Excel 表头（顺序敏感，列 A..G）
pub const COLUMN_HEADERS: [&str; 7] = [
    "模块",
    "用例名称",
    "前置条件",
    "执行步骤",
    "预期结果",
    "车型",
    "优先级",
];

/// 列宽（列 A..G，与表头一一对应）
pub const COLUMN_WIDTHS: [f64; 7] = [30.0, 30.0, 45.0, 45.0, 45.0, 20.0, 10.0];

/// 备注字段标签：前置条件
pub const LABEL_PRECONDITION: &str = "前置条件";
/// 备注字段标签：执行步骤
pub const LABEL_STEPS: &str = "执行步骤";
/// 备注字段标签：预期结果
pub const LABEL_EXPECTED: &str = "预期结果";
/// 备注字段标签：车型
pub const LABEL_VEHICLE_TYPE: &str = "车型";
/// 备注字段标签：优先级
pub const LABEL_PRIORITY: &str = "优先级";

/// 优先级的合法取值（字面量集合）
pub const PRIORITY_VALUES: [&str; 6] = ["0", "1", "2", "3", "4", "5"];

/// 一行测试用例数据
///
/// 对应 Excel 工作表中的一行（列 A..G）。可选字段在源单元格为空时为 `None`；
/// 必填字段（模块路径、用例名称、车型）以及优先级在读取边界被强制为字符串，
/// 其有效性由 [`crate::validate::validate`] 检查。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseRow {
    /// 模块路径（以 [`PATH_SEPARATOR`] 连接的路径段）
    pub module_path: String,

    /// 用例名称
    pub name: String,

    /// 前置条件（可选）
    pub precondition: Option<String>,

    /// 执行步骤（可选）
    pub steps: Option<String>,

    /// 预期结果（可选）
    pub expected_result: Option<String>,

    /// 车型
    pub vehicle_type: String,

    /// 优先级（合法值为 "0".."5"）
    pub priority: String,
}

impl TestCaseRow {
    /// 从一行原始单元格构造测试用例
    ///
    /// # 引数
    ///
    /// * `cells` - 读取边界产出的定长单元格序列（空单元格为 `None`）
    ///
    /// # 戻り値
    ///
    /// * `Some(TestCaseRow)` - 单元格数恰为 7 时
    /// * `None` - 列数不匹配时（调用方记录诊断后跳过该行）
    pub fn from_cells(cells: &[Option<String>]) -> Option<Self> {
        let [module_path, name, precondition, steps, expected_result, vehicle_type, priority]: &[Option<String>; 7] =
            cells.try_into().ok()?;

        let required = |cell: &Option<String>| cell.clone().unwrap_or_default();

        Some(Self {
            module_path: required(module_path),
            name: required(name),
            precondition: precondition.clone(),
            steps: steps.clone(),
            expected_result: expected_result.clone(),
            vehicle_type: required(vehicle_type),
            priority: required(priority),
        })
    }
}

/// マインドマップの一个主题节点
///
/// `children` 保持文档顺序；兄弟节点标题由查找或创建语义去重
/// （参见 [`crate::hierarchy::find_or_create_child`]）。`notes` 仅对
/// 叶子（用例）节点有意义，保存编码后的备注文本。
/// 每个节点被其父节点独占所有，根节点由所在文档持有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicNode {
    /// 主题标题
    pub title: String,

    /// 子主题（文档顺序）
    pub children: Vec<TopicNode>,

    /// 纯文本备注（编码后的用例字段）
    pub notes: Option<String>,
}

impl TopicNode {
    /// 以给定标题创建一个没有子节点、没有备注的主题
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
            notes: None,
        }
    }

    /// 节点是否为叶子（用例节点）
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
