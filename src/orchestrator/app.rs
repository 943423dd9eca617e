//! 应用入口 - 编排层

use tracing::info;

use crate::browser;
use crate::config::Config;
use crate::orchestrator::harvest_run::{self, RunFailure, RunReport};
use crate::prompt;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport, RunFailure> {
        self.config.validate().map_err(RunFailure::at_init)?;

        let student_id = match &self.config.student_id {
            Some(id) => prompt::validate_student_id(id),
            None => prompt::ask_student_id().await,
        }
        .map_err(RunFailure::at_init)?;

        logging::log_startup(&self.config, &student_id);

        let session = browser::launch_headless_browser(&self.config)
            .await
            .map_err(RunFailure::at_init)?;
        info!("✓ 浏览器会话已打开");

        harvest_run::harvest(session, &self.config, &student_id).await
    }
}
