use crate::models::Category;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 账号列表文件（.json / .toml）
    pub accounts_file: String,
    /// 报告输出目录
    pub output_dir: String,
    /// 同时爬取的账号数量
    pub max_concurrent_accounts: usize,
    /// 全局同时进行的网络请求数量（0 表示不限制）
    pub max_concurrent_requests: usize,
    /// 列表每页记录数
    pub page_size: usize,
    /// 作业类别（顺序决定编号前缀）
    pub categories: Vec<Category>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts_file: "Data.json".to_string(),
            output_dir: ".".to_string(),
            max_concurrent_accounts: 16,
            max_concurrent_requests: 32,
            page_size: 21,
            categories: Category::defaults(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            accounts_file: std::env::var("ACCOUNTS_FILE").unwrap_or(default.accounts_file),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            max_concurrent_accounts: std::env::var("MAX_CONCURRENT_ACCOUNTS").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.max_concurrent_accounts),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            page_size: std::env::var("PAGE_SIZE").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.page_size),
            categories: default.categories,
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

/// 学校所在时区（Asia/Seoul，无夏令时）相对 UTC 的秒数
pub const SCHOOL_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// 登录接口路径
pub const LOGIN_PATH: &str = "/ajax.php";

/// 作业列表路径
pub const LISTING_PATH: &str = "/portfolio.php";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page_size, 21);
        assert_eq!(config.categories.len(), 3);
        assert_eq!(config.categories[0].code, "1551");
        assert_eq!(config.categories[1].code, "1552");
        assert_eq!(config.categories[2].code, "1502");
    }
}
