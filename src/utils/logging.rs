/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use anyhow::{anyhow, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{CertificateDescriptor, ItemReport};
use crate::orchestrator::RunReport;

/// 初始化日志输出
///
/// `RUST_LOG` 优先；否则根据 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},chromiumoxide=warn",
            env!("CARGO_CRATE_NAME"),
            default_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("初始化日志失败: {}", e))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, student_id: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 证书收集");
    info!("🎓 R.A: {}", student_id);
    info!("🌐 主页: {}", config.profile_url(student_id));
    info!("📂 输出目录: {}/{}", config.output_root, student_id);
    info!("{}", "=".repeat(60));
}

/// 记录单个证书开始处理
pub fn log_item_start(index: usize, total: usize, descriptor: &CertificateDescriptor) {
    info!("\n{}", "─".repeat(30));
    info!(
        "[{} {}/{}] {}",
        descriptor.category, index, total, descriptor.derived_name
    );
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("👤 学生: {} ({})", report.profile.name, report.profile.id);
    info!("✅ 成功: {}/{}", report.completed(), report.items.len());
    info!("❌ 失败: {}", report.failed());

    for item in &report.items {
        if let ItemReport::Failed { descriptor, error } = item {
            warn!("   ✗ {}: {}", descriptor, error);
        }
    }
    for descriptor in report.missing_formal() {
        warn!("   ⚠️ 无正式证书: {}", descriptor.derived_name);
    }
    for result in report.formal_failures() {
        if let Some(error) = &result.formal_error {
            warn!("   ⚠️ 正式证书失败: {}: {}", result.descriptor.derived_name, error);
        }
    }

    info!(
        "📦 压缩包: {} ({} 个文件)",
        report.archive.path.display(),
        report.archive.entries
    );
    info!("{}", "=".repeat(60));
}
