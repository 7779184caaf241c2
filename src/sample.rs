//! Sample issue-tracker workbook for trying the filter by hand.
//!
//! The `DTS` sheet holds eight issues. Four have status `定位分发`; three of
//! those are owned by `闵赛`, so the default filter yields rows 1, 5 and 7.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::{config::DEFAULT_SHEET, sheet::Sheet, writer};

pub const SAMPLE_HEADERS: [&str; 7] = [
    "问题ID",
    "问题标题",
    "处理状态",
    "领域责任人",
    "优先级",
    "创建时间",
    "描述",
];

const SAMPLE_ROWS: [[&str; 7]; 8] = [
    ["DTS-001", "系统登录问题", "定位分发", "闵赛", "高", "2025-08-25", "用户无法正常登录系统"],
    ["DTS-002", "数据同步异常", "已解决", "张三", "中", "2025-08-26", "数据同步出现延迟"],
    ["DTS-003", "页面加载缓慢", "定位分发", "李四", "低", "2025-08-27", "页面响应时间过长"],
    ["DTS-004", "接口超时", "处理中", "闵赛", "高", "2025-08-28", "API接口调用超时"],
    ["DTS-005", "用户权限错误", "定位分发", "闵赛", "中", "2025-08-29", "用户权限配置有误"],
    ["DTS-006", "数据库连接失败", "已关闭", "王五", "低", "2025-08-30", "无法连接到数据库"],
    ["DTS-007", "文件上传问题", "定位分发", "闵赛", "高", "2025-08-31", "文件上传功能异常"],
    ["DTS-008", "报表生成错误", "待处理", "赵六", "中", "2025-08-31", "月度报表生成失败"],
];

pub fn sample_sheet() -> Sheet {
    Sheet::new(
        DEFAULT_SHEET,
        SAMPLE_HEADERS.iter().map(|h| h.to_string()).collect(),
        SAMPLE_ROWS
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    )
}

pub fn write_sample_workbook(path: &Path) -> Result<Sheet> {
    let sheet = sample_sheet();
    writer::write_workbook(&sheet, path, Some(sheet.name()))
        .with_context(|| format!("Writing sample workbook {path:?}"))?;
    info!(
        "Sample workbook with {} row(s) written to {path:?}",
        sheet.row_count()
    );
    Ok(sheet)
}
