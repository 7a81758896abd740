use serde::{Deserialize, Serialize};

/// 作业类别
///
/// `code` 是门户系统的 `db` 参数，`label` 只用于日志。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub code: String,
    pub label: String,
}

impl Category {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }

    /// 默认的三个类别：수행평가、경시대회、포트폴리오
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("1551", "수행평가"),
            Category::new("1552", "경시대회"),
            Category::new("1502", "포트폴리오"),
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.label, self.code)
    }
}
