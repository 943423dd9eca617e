//! 浏览器能力接口
//!
//! 核心流程只依赖这两个 trait，不直接接触 chromiumoxide，
//! 测试中用内存实现替换。

use std::time::Duration;

use async_trait::async_trait;

use crate::error::HarvestResult;

/// 浏览器会话
///
/// 由编排层独占持有，下载时以引用形式借出。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Page: PageContext;

    /// 打开一个独立的页面上下文
    async fn open_page(&self) -> HarvestResult<Self::Page>;

    /// 关闭整个会话
    async fn close(self) -> HarvestResult<()>
    where
        Self: Sized;
}

/// 单个页面上下文，打开后必须显式关闭
#[async_trait]
pub trait PageContext: Send + Sync {
    /// 导航到指定地址并等待网络空闲
    async fn navigate(&self, url: &str) -> HarvestResult<()>;

    /// 等待选择器出现，超时返回 `HarvestError::Timeout`
    async fn wait_for(&self, selector: &str, timeout: Duration) -> HarvestResult<()>;

    /// 读取第一个匹配元素的 DOM 属性（如 `href`、`src`、`innerText`）
    async fn read_property(&self, selector: &str, property: &str) -> HarvestResult<Option<String>>;

    /// 按 DOM 顺序读取所有匹配元素的 DOM 属性
    async fn read_property_all(&self, selector: &str, property: &str) -> HarvestResult<Vec<String>>;

    /// 将当前页面渲染为 PDF
    async fn render_pdf(&self) -> HarvestResult<Vec<u8>>;

    async fn close(self) -> HarvestResult<()>
    where
        Self: Sized;
}
