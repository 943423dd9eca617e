//! 内存中的浏览器会话，用于在不启动 Chromium 的情况下驱动整个流程

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use certificate_harvester::services::certificate_downloader::FORMAL_CERTIFICATE_SELECTOR;
use certificate_harvester::services::certificate_enumerator::{
    COURSE_ANCHOR_SELECTOR, DEGREE_ANCHOR_SELECTOR, FULL_CERTIFICATE_SELECTOR,
};
use certificate_harvester::services::profile_navigator::PROFILE_HEADER_SELECTOR;
use certificate_harvester::{BrowserSession, Config, HarvestError, HarvestResult, PageContext};

pub const BASE_URL: &str = "https://cursos.example.test";

/// 单个页面的 DOM 内容
#[derive(Debug, Clone, Default)]
pub struct FakePageSpec {
    properties: HashMap<(String, String), Vec<String>>,
    present: HashSet<String>,
    fail_navigation: bool,
    fail_render: bool,
    navigation_delay: Option<Duration>,
}

impl FakePageSpec {
    pub fn with_property(mut self, selector: &str, property: &str, values: &[&str]) -> Self {
        self.properties.insert(
            (selector.to_string(), property.to_string()),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self.present.insert(selector.to_string());
        self
    }

    pub fn with_element(mut self, selector: &str) -> Self {
        self.present.insert(selector.to_string());
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    pub fn slow_navigation(mut self, delay: Duration) -> Self {
        self.navigation_delay = Some(delay);
        self
    }
}

/// 一个课程证书在主页上的配置
pub struct FakeCourse {
    pub name: &'static str,
    pub has_formal: bool,
}

#[derive(Debug, Default)]
pub struct FakeWeb {
    pages: HashMap<String, FakePageSpec>,
}

impl FakeWeb {
    pub fn insert(&mut self, url: impl Into<String>, spec: FakePageSpec) {
        self.pages.insert(url.into(), spec);
    }

    pub fn page_mut(&mut self, url: &str) -> &mut FakePageSpec {
        self.pages.get_mut(url).expect("page registered")
    }

    /// 构造一个完整的学生主页以及它链接到的证书页面
    pub fn profile(
        student_id: &str,
        courses: &[FakeCourse],
        degrees: &[&str],
        with_full: bool,
    ) -> Self {
        let mut web = FakeWeb::default();

        let course_urls: Vec<String> = courses
            .iter()
            .map(|c| course_url(student_id, c.name))
            .collect();
        let degree_urls: Vec<String> = degrees.iter().map(|d| degree_url(d)).collect();

        let mut profile = FakePageSpec::default()
            .with_element(PROFILE_HEADER_SELECTOR)
            .with_property(
                &format!("{} h2.profile-header-name.bootcamp-text-color", PROFILE_HEADER_SELECTOR),
                "innerText",
                &["  Maria Silva \n"],
            )
            .with_property(
                &format!("{} img.profile-header-avatar", PROFILE_HEADER_SELECTOR),
                "src",
                &["https://cdn.example.test/avatar.png"],
            );
        if !course_urls.is_empty() {
            let refs: Vec<&str> = course_urls.iter().map(String::as_str).collect();
            profile = profile.with_property(COURSE_ANCHOR_SELECTOR, "href", &refs);
        }
        if !degree_urls.is_empty() {
            let refs: Vec<&str> = degree_urls.iter().map(String::as_str).collect();
            profile = profile.with_property(DEGREE_ANCHOR_SELECTOR, "href", &refs);
        }
        if with_full {
            let full = full_url(student_id);
            profile = profile.with_property(FULL_CERTIFICATE_SELECTOR, "href", &[full.as_str()]);
            web.insert(full, FakePageSpec::default());
        }
        web.insert(profile_url(student_id), profile);

        for (course, url) in courses.iter().zip(&course_urls) {
            let mut spec = FakePageSpec::default();
            if course.has_formal {
                let formal = formal_url(student_id, course.name);
                spec = spec.with_property(FORMAL_CERTIFICATE_SELECTOR, "href", &[formal.as_str()]);
                web.insert(formal, FakePageSpec::default());
            }
            web.insert(url.clone(), spec);
        }
        for url in degree_urls {
            web.insert(url, FakePageSpec::default());
        }

        web
    }
}

pub fn profile_url(student_id: &str) -> String {
    format!("{}/user/{}", BASE_URL, student_id)
}

pub fn course_url(student_id: &str, name: &str) -> String {
    format!("{}/user/{}/course/{}/certificate", BASE_URL, student_id, name)
}

pub fn degree_url(name: &str) -> String {
    format!("{}/degree-{}/certificate", BASE_URL, name)
}

pub fn full_url(student_id: &str) -> String {
    format!("{}/user/{}/fullCertificate", BASE_URL, student_id)
}

pub fn formal_url(student_id: &str, name: &str) -> String {
    format!("{}/formal", course_url(student_id, name))
}

/// 会话与页面的生命周期计数
#[derive(Debug, Default)]
pub struct SessionStats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub open_now: AtomicUsize,
    pub max_open: AtomicUsize,
    pub session_closed: AtomicBool,
    pub navigations: Mutex<Vec<String>>,
}

impl SessionStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    pub fn session_closed(&self) -> bool {
        self.session_closed.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

pub struct FakeSession {
    web: Arc<FakeWeb>,
    stats: Arc<SessionStats>,
}

impl FakeSession {
    pub fn new(web: FakeWeb) -> (Self, Arc<SessionStats>) {
        let stats = Arc::new(SessionStats::default());
        (
            Self {
                web: Arc::new(web),
                stats: stats.clone(),
            },
            stats,
        )
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Page = FakePage;

    async fn open_page(&self) -> HarvestResult<FakePage> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        let now = self.stats.open_now.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_open.fetch_max(now, Ordering::SeqCst);
        Ok(FakePage {
            web: self.web.clone(),
            stats: self.stats.clone(),
            current: Mutex::new(None),
        })
    }

    async fn close(self) -> HarvestResult<()> {
        self.stats.session_closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakePage {
    web: Arc<FakeWeb>,
    stats: Arc<SessionStats>,
    current: Mutex<Option<String>>,
}

impl FakePage {
    fn spec(&self) -> Option<FakePageSpec> {
        let current = self.current.lock().unwrap().clone()?;
        self.web.pages.get(&current).cloned()
    }
}

#[async_trait]
impl PageContext for FakePage {
    async fn navigate(&self, url: &str) -> HarvestResult<()> {
        self.stats.navigations.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.web.pages.get(url).and_then(|spec| spec.navigation_delay) {
            tokio::time::sleep(delay).await;
        }
        match self.web.pages.get(url) {
            Some(spec) if !spec.fail_navigation => {
                *self.current.lock().unwrap() = Some(url.to_string());
                Ok(())
            }
            _ => Err(HarvestError::navigation(url, "net::ERR_NAME_NOT_RESOLVED")),
        }
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> HarvestResult<()> {
        match self.spec() {
            Some(spec) if spec.present.contains(selector) => Ok(()),
            _ => Err(HarvestError::timeout(selector, timeout)),
        }
    }

    async fn read_property(&self, selector: &str, property: &str) -> HarvestResult<Option<String>> {
        Ok(self.read_property_all(selector, property).await?.into_iter().next())
    }

    async fn read_property_all(&self, selector: &str, property: &str) -> HarvestResult<Vec<String>> {
        Ok(self
            .spec()
            .and_then(|spec| {
                spec.properties
                    .get(&(selector.to_string(), property.to_string()))
                    .cloned()
            })
            .unwrap_or_default())
    }

    async fn render_pdf(&self) -> HarvestResult<Vec<u8>> {
        let url = self.current.lock().unwrap().clone().unwrap_or_default();
        match self.spec() {
            Some(spec) if !spec.fail_render => Ok(format!("%PDF-1.4 {}", url).into_bytes()),
            _ => Err(HarvestError::render(url, "Printing failed")),
        }
    }

    async fn close(self) -> HarvestResult<()> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        self.stats.open_now.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 测试用配置，输出到临时目录
pub fn test_config(root: &Path) -> Config {
    Config {
        platform_base_url: BASE_URL.to_string(),
        output_root: root.join("certificados").to_string_lossy().into_owned(),
        archive_root: root.join("certificadosZip").to_string_lossy().into_owned(),
        profile_timeout_ms: 50,
        download_timeout_secs: 5,
        network_settle_ms: 0,
        ..Config::default()
    }
}

/// 目录下所有普通文件（相对路径，`/` 分隔，已排序）
pub fn regular_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

/// 压缩包中的条目名（已排序）
pub fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

pub fn student_root(config: &Config, student_id: &str) -> PathBuf {
    Path::new(&config.output_root).join(student_id)
}
