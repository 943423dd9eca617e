//! 单个学生的证书收集流程 - 编排层
//!
//! ## 状态
//!
//! ```text
//! Init → Navigating → Enumerating → DownloadingFull → DownloadingCourses
//!      → DownloadingDegrees → Packaging → Done
//! ```
//!
//! 除 Done 外任一状态都可能进入 Failed。致命错误只有三类：
//! 主页信息提取失败、缺少完整证书链接、打包失败（以及目录无法创建）。
//! 单个证书下载失败只记录在结果里，不中断流程。

use std::fmt;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::browser::{BrowserSession, PageContext};
use crate::config::Config;
use crate::error::{HarvestError, HarvestResult};
use crate::models::{ArchiveSummary, CertificateDescriptor, DownloadResult, ItemReport, StudentProfile};
use crate::services::{
    ArchivePackager, CertificateDownloader, CertificateEnumerator, DirectoryOrganizer, HarvestLayout,
    ProfileNavigator,
};
use crate::utils::logging;

/// 流程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Navigating,
    Enumerating,
    DownloadingFull,
    DownloadingCourses,
    DownloadingDegrees,
    Packaging,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Init => "初始化",
            RunState::Navigating => "访问主页",
            RunState::Enumerating => "收集证书链接",
            RunState::DownloadingFull => "下载完整证书",
            RunState::DownloadingCourses => "下载课程证书",
            RunState::DownloadingDegrees => "下载学位证书",
            RunState::Packaging => "打包",
            RunState::Done => "完成",
            RunState::Failed => "失败",
        };
        f.write_str(name)
    }
}

/// 致命错误及其发生的阶段
#[derive(Debug, Error)]
#[error("[{state}] {error}")]
pub struct RunFailure {
    pub state: RunState,
    #[source]
    pub error: HarvestError,
}

impl RunFailure {
    /// 会话启动之前的失败
    pub fn at_init(error: HarvestError) -> Self {
        Self {
            state: RunState::Init,
            error,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.error.exit_code()
    }
}

/// 主页上收集到的全部证书
#[derive(Debug, Clone)]
pub struct CertificateCatalog {
    pub full: CertificateDescriptor,
    pub courses: Vec<CertificateDescriptor>,
    pub degrees: Vec<CertificateDescriptor>,
}

/// 一次成功运行的报告
#[derive(Debug)]
pub struct RunReport {
    pub profile: StudentProfile,
    pub layout: HarvestLayout,
    pub items: Vec<ItemReport>,
    pub archive: ArchiveSummary,
    /// 经过的状态，按顺序
    pub states: Vec<RunState>,
}

impl RunReport {
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.completed()
    }

    /// 没有正式证书按钮的课程
    pub fn missing_formal(&self) -> Vec<&CertificateDescriptor> {
        self.items
            .iter()
            .filter_map(ItemReport::result)
            .filter(|result| result.missing_formal_variant())
            .map(|result| &result.descriptor)
            .collect()
    }

    /// 正式证书下载失败的课程（普通证书已保存）
    pub fn formal_failures(&self) -> Vec<&DownloadResult> {
        self.items
            .iter()
            .filter_map(ItemReport::result)
            .filter(|result| result.formal_failed())
            .collect()
    }

    pub fn final_state(&self) -> RunState {
        self.states.last().copied().unwrap_or(RunState::Init)
    }
}

/// 在已打开的会话上执行完整流程，无论结果如何都会关闭会话
pub async fn harvest<S: BrowserSession>(
    session: S,
    config: &Config,
    student_id: &str,
) -> Result<RunReport, RunFailure> {
    let mut run = HarvestRun::new(config, student_id);
    let outcome = run.execute(&session).await;

    if let Err(e) = session.close().await {
        warn!("关闭浏览器失败: {}", e);
    }

    match &outcome {
        Ok(report) => logging::print_final_stats(report),
        Err(failure) => error!("❌ 流程在「{}」阶段失败: {}", failure.state, failure.error),
    }
    outcome
}

/// 流程执行器
struct HarvestRun<'a> {
    config: &'a Config,
    student_id: &'a str,
    layout: HarvestLayout,
    state: RunState,
    states: Vec<RunState>,
}

impl<'a> HarvestRun<'a> {
    fn new(config: &'a Config, student_id: &'a str) -> Self {
        Self {
            config,
            student_id,
            layout: HarvestLayout::new(&config.output_root, &config.archive_root, student_id),
            state: RunState::Init,
            states: vec![RunState::Init],
        }
    }

    fn transition(&mut self, next: RunState) {
        info!("▶ 进入阶段: {}", next);
        self.state = next;
        self.states.push(next);
    }

    fn fail(&mut self, error: HarvestError) -> RunFailure {
        let failure = RunFailure {
            state: self.state,
            error,
        };
        self.state = RunState::Failed;
        self.states.push(RunState::Failed);
        failure
    }

    async fn execute<S: BrowserSession>(&mut self, session: &S) -> Result<RunReport, RunFailure> {
        // ========== 主页与证书链接 ==========
        self.transition(RunState::Navigating);
        let page = session.open_page().await.map_err(|e| self.fail(e))?;
        let discovered = self.discover(&page).await;
        if let Err(e) = page.close().await {
            warn!("关闭主页页面失败: {}", e);
        }
        let (profile, catalog) = discovered.map_err(|e| self.fail(e))?;

        // ========== 下载 ==========
        let downloader = CertificateDownloader::new(self.config.download_timeout());
        let mut items = Vec::with_capacity(1 + catalog.courses.len() + catalog.degrees.len());

        self.transition(RunState::DownloadingFull);
        self.layout.prepare().map_err(|e| self.fail(e))?;
        let outcome = downloader
            .download_full(session, &catalog.full, &self.layout.root)
            .await;
        items.push(record(&catalog.full, outcome));

        self.transition(RunState::DownloadingCourses);
        for (index, descriptor) in catalog.courses.iter().enumerate() {
            logging::log_item_start(index + 1, catalog.courses.len(), descriptor);
            let outcome = downloader
                .download_course(session, descriptor, &self.layout.courses_dir)
                .await;
            items.push(record(descriptor, outcome));
        }

        self.transition(RunState::DownloadingDegrees);
        for (index, descriptor) in catalog.degrees.iter().enumerate() {
            logging::log_item_start(index + 1, catalog.degrees.len(), descriptor);
            let outcome = downloader
                .download_degree(session, descriptor, &self.layout.formations_dir)
                .await;
            items.push(record(descriptor, outcome));
        }

        // ========== 打包（所有下载结束之后） ==========
        self.transition(RunState::Packaging);
        DirectoryOrganizer::ensure(&self.layout.archive_dir).map_err(|e| self.fail(e))?;
        let archive = ArchivePackager::package(&self.layout.root, &self.layout.archive_path)
            .wait()
            .await
            .map_err(|e| self.fail(e))?;

        self.transition(RunState::Done);
        Ok(RunReport {
            profile,
            layout: self.layout.clone(),
            items,
            archive,
            states: self.states.clone(),
        })
    }

    async fn discover<P: PageContext>(
        &mut self,
        page: &P,
    ) -> HarvestResult<(StudentProfile, CertificateCatalog)> {
        let url = self.config.profile_url(self.student_id);
        let profile = ProfileNavigator::new(self.config.profile_timeout())
            .load_profile(page, &url, self.student_id)
            .await?;
        info!("👤 学生姓名: {}", profile.name);

        self.transition(RunState::Enumerating);
        let enumerator = CertificateEnumerator::new(self.config.profile_timeout());
        let courses = enumerator.list_course_certificates(page).await?;
        let degrees = enumerator.list_degree_certificates(page).await?;
        let full_link = enumerator.get_full_certificate_link(page).await?;

        Ok((
            profile,
            CertificateCatalog {
                full: CertificateDescriptor::full(full_link),
                courses,
                degrees,
            },
        ))
    }
}

/// 单个证书的失败在这里被截住
fn record(descriptor: &CertificateDescriptor, outcome: HarvestResult<DownloadResult>) -> ItemReport {
    match outcome {
        Ok(result) => ItemReport::Completed(result),
        Err(error) => {
            error!("❌ {} 下载失败: {}", descriptor, error);
            ItemReport::Failed {
                descriptor: descriptor.clone(),
                error,
            }
        }
    }
}
