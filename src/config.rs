use std::time::Duration;

use crate::error::{HarvestError, HarvestResult};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 学习平台地址（不含结尾斜杠）
    pub platform_base_url: String,
    /// 证书输出根目录
    pub output_root: String,
    /// 压缩包输出目录
    pub archive_root: String,
    /// 等待个人主页头部出现的超时（毫秒）
    pub profile_timeout_ms: u64,
    /// 单个证书下载的超时（秒）
    pub download_timeout_secs: u64,
    /// 页面加载完成后等待网络空闲的时间（毫秒）
    pub network_settle_ms: u64,
    /// 浏览器可执行文件路径，未设置时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    /// 是否使用无头模式
    pub headless: bool,
    /// 学生 R.A，未设置时交互式输入
    pub student_id: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_base_url: "https://cursos.alura.com.br".to_string(),
            output_root: "certificados".to_string(),
            archive_root: "certificadosZip".to_string(),
            profile_timeout_ms: 5_000,
            download_timeout_secs: 60,
            network_settle_ms: 500,
            chrome_executable: None,
            headless: true,
            student_id: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            platform_base_url: std::env::var("PLATFORM_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.platform_base_url),
            output_root: std::env::var("OUTPUT_ROOT").unwrap_or(default.output_root),
            archive_root: std::env::var("ARCHIVE_ROOT").unwrap_or(default.archive_root),
            profile_timeout_ms: std::env::var("PROFILE_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.profile_timeout_ms),
            download_timeout_secs: std::env::var("DOWNLOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.download_timeout_secs),
            network_settle_ms: std::env::var("NETWORK_SETTLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.network_settle_ms),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.trim().is_empty()),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            student_id: std::env::var("STUDENT_ID").ok().filter(|v| !v.trim().is_empty()),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查运行前必须满足的配置项
    pub fn validate(&self) -> HarvestResult<()> {
        if !self.platform_base_url.starts_with("http://") && !self.platform_base_url.starts_with("https://") {
            return Err(HarvestError::Config(format!(
                "PLATFORM_BASE_URL 必须以 http:// 或 https:// 开头: {}",
                self.platform_base_url
            )));
        }
        if self.output_root.trim().is_empty() || self.archive_root.trim().is_empty() {
            return Err(HarvestError::Config("输出目录不能为空".to_string()));
        }
        if self.profile_timeout_ms == 0 || self.download_timeout_secs == 0 {
            return Err(HarvestError::Config("超时时间必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 拼接个人主页地址
    pub fn profile_url(&self, student_id: &str) -> String {
        format!("{}/user/{}", self.platform_base_url, student_id)
    }

    pub fn profile_timeout(&self) -> Duration {
        Duration::from_millis(self.profile_timeout_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn network_settle(&self) -> Duration {
        Duration::from_millis(self.network_settle_ms)
    }
}
