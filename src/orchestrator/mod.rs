//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 读取 R.A
//! - 启动浏览器会话
//! - 把会话交给 `harvest_run`
//!
//! ### `harvest_run` - 单个学生的收集流程
//! - 状态机：主页 → 枚举 → 下载 → 打包
//! - 持有会话，保证任何路径上都会关闭
//! - 单个证书失败只记录，不中断
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! harvest_run (状态机)
//!     ↓
//! services (主页 / 枚举 / 下载 / 目录 / 打包)
//!     ↓
//! browser + infrastructure (会话、页面、JsExecutor)
//! ```

pub mod app;
pub mod harvest_run;

pub use app::App;
pub use harvest_run::{harvest, CertificateCatalog, RunFailure, RunReport, RunState};
