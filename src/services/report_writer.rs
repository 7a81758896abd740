//! 报告写入服务 - 业务能力层
//!
//! 只负责把一个账号的报告写成 `{name}.json`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::models::AccountReport;

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 报告文件路径
    pub fn path_for(&self, display_name: &str) -> PathBuf {
        let file_name: String = display_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.output_dir.join(format!("{}.json", file_name))
    }

    /// 写入报告
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, display_name: &str, report: &AccountReport) -> Result<PathBuf> {
        let path = self.path_for(display_name);
        let json = serde_json::to_string(report).context("无法序列化报告")?;

        fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建目录: {}", self.output_dir.display()))?;
        fs::write(&path, json)
            .await
            .with_context(|| format!("无法写入报告: {}", path.display()))?;

        debug!("报告已写入: {} ({} 条)", path.display(), report.total_records());

        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
