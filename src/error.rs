use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum HarvestError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 用户输入无效
    #[error("输入无效: {0}")]
    Input(String),

    /// 浏览器启动或页面创建失败
    #[error("浏览器错误: {message}")]
    Browser { message: String },

    /// 页面导航失败
    #[error("导航到 {url} 失败: {message}")]
    Navigation { url: String, message: String },

    /// 等待超时
    #[error("等待 {what} 超时 ({timeout:?})")]
    Timeout { what: String, timeout: Duration },

    /// 个人主页信息缺失
    #[error("提取信息失败: {0}")]
    Extraction(String),

    /// 找不到完整证书链接
    #[error("未找到完整证书链接 (选择器: {selector})")]
    MissingCertificateLink { selector: String },

    /// 渲染 PDF 失败
    #[error("渲染 PDF 失败 ({url}): {message}")]
    Render { url: String, message: String },

    /// 文件系统错误
    #[error("文件操作失败 ({}): {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 打包失败
    #[error("生成压缩包失败 ({}): {message}", .path.display())]
    Archive { path: PathBuf, message: String },
}

impl From<chromiumoxide::error::CdpError> for HarvestError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        HarvestError::Browser {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::Extraction(format!("JSON 解析失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl HarvestError {
    pub fn browser(message: impl Into<String>) -> Self {
        HarvestError::Browser {
            message: message.into(),
        }
    }

    pub fn navigation(url: impl Into<String>, message: impl ToString) -> Self {
        HarvestError::Navigation {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn timeout(what: impl Into<String>, timeout: Duration) -> Self {
        HarvestError::Timeout {
            what: what.into(),
            timeout,
        }
    }

    pub fn render(url: impl Into<String>, message: impl ToString) -> Self {
        HarvestError::Render {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        HarvestError::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn archive(path: impl AsRef<Path>, message: impl ToString) -> Self {
        HarvestError::Archive {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// 进程退出码，每类致命错误对应不同的值
    pub fn exit_code(&self) -> u8 {
        match self {
            HarvestError::Config(_) | HarvestError::Input(_) => 2,
            HarvestError::Browser { .. } => 3,
            HarvestError::Navigation { .. } => 4,
            HarvestError::Timeout { .. } => 5,
            HarvestError::Extraction(_) => 6,
            HarvestError::MissingCertificateLink { .. } => 7,
            HarvestError::Filesystem { .. } | HarvestError::Render { .. } => 8,
            HarvestError::Archive { .. } => 9,
        }
    }
}

/// 应用程序结果类型
pub type HarvestResult<T> = Result<T, HarvestError>;
