use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, error, info, warn};

use crate::browser::capability::{BrowserSession, PageContext};
use crate::config::Config;
use crate::error::{HarvestError, HarvestResult};
use crate::infrastructure::JsExecutor;

/// A4 纸张尺寸（英寸）
const A4_WIDTH_INCHES: f64 = 8.27;
const A4_HEIGHT_INCHES: f64 = 11.69;

/// 等待选择器时的轮询间隔
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 启动无头浏览器
pub async fn launch_headless_browser(config: &Config) -> HarvestResult<ChromeSession> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder();
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(executable) = &config.chrome_executable {
        debug!("浏览器路径: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let browser_config = builder
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",              // 服务器环境下的兼容性
            "--disable-setuid-sandbox",
            "--disable-dev-shm-usage",   // 防止共享内存不足
        ])
        .build()
        .map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            HarvestError::browser(format!("配置无头浏览器失败: {}", e))
        })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        HarvestError::from(e)
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    info!("✅ 无头浏览器已就绪");
    Ok(ChromeSession {
        browser,
        handler_task,
        network_settle: config.network_settle(),
    })
}

/// 基于 chromiumoxide 的浏览器会话
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    network_settle: Duration,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Page = ChromePage;

    async fn open_page(&self) -> HarvestResult<ChromePage> {
        let page = self.browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            HarvestError::browser(format!("创建页面失败: {}", e))
        })?;
        Ok(ChromePage {
            executor: JsExecutor::new(page),
            network_settle: self.network_settle,
        })
    }

    async fn close(self) -> HarvestResult<()> {
        let ChromeSession {
            mut browser,
            handler_task,
            ..
        } = self;

        let closed = browser.close().await;
        if let Err(e) = browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        handler_task.abort();
        closed?;

        info!("🔒 浏览器已关闭");
        Ok(())
    }
}

/// 单个浏览器标签页
pub struct ChromePage {
    executor: JsExecutor,
    network_settle: Duration,
}

impl ChromePage {
    async fn current_url(&self) -> String {
        self.executor
            .page()
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageContext for ChromePage {
    async fn navigate(&self, url: &str) -> HarvestResult<()> {
        debug!("导航到: {}", url);
        let page = self.executor.page();
        page.goto(url)
            .await
            .map_err(|e| HarvestError::navigation(url, e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| HarvestError::navigation(url, e))?;

        // chromiumoxide 没有 networkidle，加载完成后再留出一段静默时间
        sleep(self.network_settle).await;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, limit: Duration) -> HarvestResult<()> {
        let page = self.executor.page();
        let started = Instant::now();
        let found = timeout(limit, async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                sleep(SELECTOR_POLL_INTERVAL).await;
            }
        })
        .await;

        match found {
            Ok(()) => {
                debug!("选择器 {} 在 {:?} 后出现", selector, started.elapsed());
                Ok(())
            }
            Err(_) => Err(HarvestError::timeout(selector, limit)),
        }
    }

    async fn read_property(&self, selector: &str, property: &str) -> HarvestResult<Option<String>> {
        self.executor.query_property(selector, property).await
    }

    async fn read_property_all(&self, selector: &str, property: &str) -> HarvestResult<Vec<String>> {
        self.executor.query_property_all(selector, property).await
    }

    async fn render_pdf(&self) -> HarvestResult<Vec<u8>> {
        let params = PrintToPdfParams::builder()
            .print_background(true)
            .paper_width(A4_WIDTH_INCHES)
            .paper_height(A4_HEIGHT_INCHES)
            .build();

        match self.executor.page().pdf(params).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(HarvestError::render(self.current_url().await, e)),
        }
    }

    async fn close(self) -> HarvestResult<()> {
        self.executor.into_page().close().await?;
        Ok(())
    }
}
