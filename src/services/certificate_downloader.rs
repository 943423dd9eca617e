//! 证书下载服务 - 业务能力层
//!
//! 每个证书使用独立的页面上下文渲染为 PDF，页面在任何返回路径上都会被关闭

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::{BrowserSession, PageContext};
use crate::error::{HarvestError, HarvestResult};
use crate::models::{CertificateDescriptor, DownloadResult};
use crate::services::directory_organizer::{self, DirectoryOrganizer};

/// 课程证书页面上的"正式证书"按钮
pub const FORMAL_CERTIFICATE_SELECTOR: &str = ".options-footer.options-print .buttonLink";

/// 证书下载服务
///
/// 不持有会话，只在每次下载时借用
pub struct CertificateDownloader {
    item_timeout: Duration,
}

impl CertificateDownloader {
    pub fn new(item_timeout: Duration) -> Self {
        Self { item_timeout }
    }

    /// 下载课程证书，找到正式证书按钮时额外下载正式版本
    ///
    /// 正式版本失败不影响已保存的普通证书，错误记录在 `formal_error` 中
    pub async fn download_course<S: BrowserSession>(
        &self,
        session: &S,
        descriptor: &CertificateDescriptor,
        courses_dir: &Path,
    ) -> HarvestResult<DownloadResult> {
        info!("📥 下载课程证书: {}", descriptor.derived_name);

        let normal_path = directory_organizer::normal_dir(courses_dir).join(descriptor.file_name());
        let page = session.open_page().await?;
        let outcome = self
            .bounded(&descriptor.source_url, async {
                let pdf = render(&page, &descriptor.source_url).await?;
                let formal_link = page.read_property(FORMAL_CERTIFICATE_SELECTOR, "href").await?;
                Ok::<_, HarvestError>((pdf, formal_link))
            })
            .await;
        close_page(page).await;
        let (pdf, formal_link) = outcome?;
        save(&normal_path, pdf).await?;
        info!("✓ 普通证书已保存: {}", normal_path.display());

        let mut result = DownloadResult::single(descriptor.clone(), normal_path);

        match formal_link.filter(|href| !href.trim().is_empty()) {
            Some(formal_link) => {
                result.has_formal_variant = Some(true);
                let formal_path = directory_organizer::formal_dir(courses_dir).join(descriptor.file_name());
                match self.capture(session, &formal_link, &formal_path).await {
                    Ok(()) => {
                        info!("✓ 正式证书已保存: {}", formal_path.display());
                        result.produced_paths.push(formal_path);
                    }
                    Err(e) => {
                        warn!("⚠️ 正式证书下载失败 {}: {}", descriptor.derived_name, e);
                        result.formal_error = Some(e.to_string());
                    }
                }
            }
            None => {
                warn!("⚠️ 未找到正式证书按钮: {}", descriptor.source_url);
            }
        }

        Ok(result)
    }

    /// 下载学位证书
    pub async fn download_degree<S: BrowserSession>(
        &self,
        session: &S,
        descriptor: &CertificateDescriptor,
        formations_dir: &Path,
    ) -> HarvestResult<DownloadResult> {
        info!("📥 下载学位证书: {}", descriptor.derived_name);
        let path = formations_dir.join(descriptor.file_name());
        self.download_single(session, descriptor, path).await
    }

    /// 下载完整证书，文件名固定为 fullCertificate.pdf
    pub async fn download_full<S: BrowserSession>(
        &self,
        session: &S,
        descriptor: &CertificateDescriptor,
        root_dir: &Path,
    ) -> HarvestResult<DownloadResult> {
        info!("📥 下载完整证书");
        let path = root_dir.join(descriptor.file_name());
        self.download_single(session, descriptor, path).await
    }

    async fn download_single<S: BrowserSession>(
        &self,
        session: &S,
        descriptor: &CertificateDescriptor,
        path: PathBuf,
    ) -> HarvestResult<DownloadResult> {
        self.capture(session, &descriptor.source_url, &path).await?;
        info!("✓ 证书已保存: {}", path.display());
        Ok(DownloadResult::single(descriptor.clone(), path))
    }

    /// 在新页面中渲染 `url`，关闭页面后再写入文件
    async fn capture<S: BrowserSession>(&self, session: &S, url: &str, path: &Path) -> HarvestResult<()> {
        let page = session.open_page().await?;
        let outcome = self.bounded(url, render(&page, url)).await;
        close_page(page).await;
        save(path, outcome?).await
    }

    /// 为页面内的操作加上超时，页面的关闭由调用方在超时之外完成
    async fn bounded<T>(
        &self,
        url: &str,
        work: impl Future<Output = HarvestResult<T>>,
    ) -> HarvestResult<T> {
        match tokio::time::timeout(self.item_timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(HarvestError::timeout(format!("下载 {}", url), self.item_timeout)),
        }
    }
}

async fn close_page<P: PageContext>(page: P) {
    if let Err(e) = page.close().await {
        warn!("关闭页面失败: {}", e);
    }
}

/// 导航并渲染，只包含页面内的操作
async fn render<P: PageContext>(page: &P, url: &str) -> HarvestResult<Vec<u8>> {
    page.navigate(url).await?;
    let pdf = page.render_pdf().await?;
    debug!("PDF 大小: {} 字节", pdf.len());
    Ok(pdf)
}

/// 写入文件，不受单个证书超时的限制
async fn save(path: &Path, pdf: Vec<u8>) -> HarvestResult<()> {
    if let Some(parent) = path.parent() {
        DirectoryOrganizer::ensure(parent)?;
    }
    tokio::fs::write(path, pdf)
        .await
        .map_err(|e| HarvestError::filesystem(path, e))
}
