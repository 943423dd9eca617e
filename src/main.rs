use std::process::ExitCode;

use anyhow::Result;
use certificate_harvester::utils::logging;
use certificate_harvester::{App, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging)?;

    match App::new(config).run().await {
        Ok(_) => {
            info!("🎉 所有证书已下载并整理完成");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            error!("程序结束: {}", failure);
            Ok(ExitCode::from(failure.exit_code()))
        }
    }
}
