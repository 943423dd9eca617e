//! 个人主页服务 - 业务能力层
//!
//! 打开学生主页并读取姓名与头像

use std::time::Duration;

use tracing::{debug, info};

use crate::browser::PageContext;
use crate::error::{HarvestError, HarvestResult};
use crate::models::StudentProfile;

/// 个人主页头部区域
pub const PROFILE_HEADER_SELECTOR: &str =
    "div.profile-header-avatarAndEdit-wrapper.profile-header--alura";
const NAME_SELECTOR: &str = "h2.profile-header-name.bootcamp-text-color";
const AVATAR_SELECTOR: &str = "img.profile-header-avatar";

pub struct ProfileNavigator {
    header_timeout: Duration,
}

impl ProfileNavigator {
    pub fn new(header_timeout: Duration) -> Self {
        Self { header_timeout }
    }

    /// 导航到主页并提取学生信息
    ///
    /// # 错误
    /// - `Navigation`：页面加载失败
    /// - `Timeout`：头部区域未在限定时间内出现
    /// - `Extraction`：姓名或头像缺失
    pub async fn load_profile<P: PageContext>(
        &self,
        page: &P,
        url: &str,
        student_id: &str,
    ) -> HarvestResult<StudentProfile> {
        info!("🌐 访问学生主页: {}", url);
        page.navigate(url).await?;

        page.wait_for(PROFILE_HEADER_SELECTOR, self.header_timeout).await?;
        debug!("主页头部已出现");

        let name = page
            .read_property(&scoped(NAME_SELECTOR), "innerText")
            .await?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let avatar_url = page
            .read_property(&scoped(AVATAR_SELECTOR), "src")
            .await?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (name, avatar_url) {
            (Some(name), Some(avatar_url)) => Ok(StudentProfile {
                id: student_id.to_string(),
                name,
                avatar_url,
            }),
            (name, avatar) => Err(HarvestError::Extraction(format!(
                "未找到学生信息 (姓名: {}, 头像: {})",
                if name.is_some() { "有" } else { "无" },
                if avatar.is_some() { "有" } else { "无" },
            ))),
        }
    }
}

fn scoped(selector: &str) -> String {
    format!("{} {}", PROFILE_HEADER_SELECTOR, selector)
}
