//! # Certificate Harvester
//!
//! 从学习平台的学生主页收集全部证书，渲染为 PDF，按类别整理后打包成 zip
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Browser）
//! - `browser/` - `BrowserSession` / `PageContext` 能力接口及 chromiumoxide 实现
//! - `infrastructure/` - `JsExecutor`，页面内执行 JS、读取 DOM 属性
//!
//! ### ② 业务能力层（Services）
//! - `ProfileNavigator` - 读取学生信息
//! - `CertificateEnumerator` - 收集课程 / 学位 / 完整证书链接
//! - `CertificateDownloader` - 单个证书渲染为 PDF
//! - `DirectoryOrganizer` - 目录创建与输出结构
//! - `ArchivePackager` - 目录打包为 zip
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/harvest_run` - 状态机，隔离单个证书的失败
//! - `orchestrator/app` - 读取 R.A、启动浏览器

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use browser::{launch_headless_browser, BrowserSession, PageContext};
pub use config::Config;
pub use error::{HarvestError, HarvestResult};
pub use infrastructure::JsExecutor;
pub use models::{CertificateCategory, CertificateDescriptor, DownloadResult, ItemReport, StudentProfile};
pub use orchestrator::{harvest, App, RunFailure, RunReport, RunState};
