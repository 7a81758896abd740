use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::ProcessingStats;

/// 日志工具模块
///
/// 初始化 tracing 输出，默认 `info`，`verbose` 时为 `debug`；
/// 设置了 `RUST_LOG` 时以其为准。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 作业信息爬取");
    info!("📊 最大并发账号数: {}", config.max_concurrent_accounts);
    if config.max_concurrent_requests == 0 {
        info!("📊 最大并发请求数: 不限制");
    } else {
        info!("📊 最大并发请求数: {}", config.max_concurrent_requests);
    }
    info!(
        "📋 类别: {}",
        config
            .categories
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("{}", "=".repeat(60));
}

/// 记录账号加载信息
///
/// # 参数
/// - `total`: 账号总数
/// - `max_concurrent`: 最大并发数
pub fn log_accounts_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个账号", total);
    info!("📋 同时最多处理 {} 个账号\n", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &ProcessingStats, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("📄 记录总数: {}", stats.records);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", output_dir);
}
