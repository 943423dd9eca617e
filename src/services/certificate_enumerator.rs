//! 证书枚举服务 - 业务能力层
//!
//! 在已加载的主页上收集三类证书链接

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::PageContext;
use crate::error::{HarvestError, HarvestResult};
use crate::models::{CertificateCategory, CertificateDescriptor};

pub const COURSE_ANCHOR_SELECTOR: &str = "a.course-card__certificate";
pub const DEGREE_ANCHOR_SELECTOR: &str = "a.lightCard-otherLinks-link.lightCard-otherLinks-certificate";
pub const FULL_CERTIFICATE_SELECTOR: &str = "a.profile-fullCertificate-link";

pub struct CertificateEnumerator {
    anchor_timeout: Duration,
}

impl CertificateEnumerator {
    pub fn new(anchor_timeout: Duration) -> Self {
        Self { anchor_timeout }
    }

    /// 课程证书，按页面顺序
    pub async fn list_course_certificates<P: PageContext>(
        &self,
        page: &P,
    ) -> HarvestResult<Vec<CertificateDescriptor>> {
        match page.wait_for(COURSE_ANCHOR_SELECTOR, self.anchor_timeout).await {
            Ok(()) => {}
            Err(HarvestError::Timeout { .. }) => {
                warn!("⚠️ 主页上没有课程证书链接");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }

        let hrefs = page.read_property_all(COURSE_ANCHOR_SELECTOR, "href").await?;
        let descriptors = collect(CertificateCategory::Course, hrefs, |href| CertificateDescriptor::course(href));
        info!("✓ 找到 {} 个课程证书", descriptors.len());
        Ok(descriptors)
    }

    /// 学位证书，按页面顺序
    pub async fn list_degree_certificates<P: PageContext>(
        &self,
        page: &P,
    ) -> HarvestResult<Vec<CertificateDescriptor>> {
        let hrefs = page.read_property_all(DEGREE_ANCHOR_SELECTOR, "href").await?;
        let descriptors = collect(CertificateCategory::Degree, hrefs, |href| CertificateDescriptor::degree(href));
        info!("✓ 找到 {} 个学位证书", descriptors.len());
        Ok(descriptors)
    }

    /// 完整证书链接，缺失时整个流程无法继续
    pub async fn get_full_certificate_link<P: PageContext>(&self, page: &P) -> HarvestResult<String> {
        let link = page
            .read_property(FULL_CERTIFICATE_SELECTOR, "href")
            .await?
            .filter(|href| !href.trim().is_empty())
            .ok_or_else(|| HarvestError::MissingCertificateLink {
                selector: FULL_CERTIFICATE_SELECTOR.to_string(),
            })?;
        info!("✓ 找到完整证书链接: {}", link);
        Ok(link)
    }
}

/// 解析链接，跳过无法解析以及重名的条目
fn collect(
    category: CertificateCategory,
    hrefs: Vec<String>,
    parse: fn(String) -> Option<CertificateDescriptor>,
) -> Vec<CertificateDescriptor> {
    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(hrefs.len());

    for href in hrefs {
        let Some(descriptor) = parse(href.clone()) else {
            warn!("⚠️ 无法从{}证书链接中解析名称，已跳过: {}", category, href);
            continue;
        };
        if !seen.insert(descriptor.derived_name.clone()) {
            warn!("⚠️ {}证书重名，已跳过: {}", category, href);
            continue;
        }
        debug!("{}", descriptor);
        descriptors.push(descriptor);
    }

    descriptors
}
