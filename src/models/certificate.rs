//! 证书描述
//!
//! 从证书链接中提取名称的规则集中在这里

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// 完整证书的固定文件名
pub const FULL_CERTIFICATE_NAME: &str = "fullCertificate";

/// 证书类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateCategory {
    /// 课程证书
    Course,
    /// 学位（formação）证书
    Degree,
    /// 完整证书
    Full,
}

impl CertificateCategory {
    pub fn label(self) -> &'static str {
        match self {
            CertificateCategory::Course => "课程",
            CertificateCategory::Degree => "学位",
            CertificateCategory::Full => "完整证书",
        }
    }
}

impl fmt::Display for CertificateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单个证书的描述信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDescriptor {
    pub category: CertificateCategory,
    pub source_url: String,
    /// 从链接中提取的名称，同时作为文件名
    pub derived_name: String,
}

impl CertificateDescriptor {
    /// 根据链接创建课程证书描述，链接无法解析时返回 None
    pub fn course(source_url: impl Into<String>) -> Option<Self> {
        let source_url = source_url.into();
        let derived_name = course_name_from_url(&source_url)?;
        Some(Self {
            category: CertificateCategory::Course,
            source_url,
            derived_name,
        })
    }

    /// 根据链接创建学位证书描述，链接无法解析时返回 None
    pub fn degree(source_url: impl Into<String>) -> Option<Self> {
        let source_url = source_url.into();
        let derived_name = degree_name_from_url(&source_url)?;
        Some(Self {
            category: CertificateCategory::Degree,
            source_url,
            derived_name,
        })
    }

    pub fn full(source_url: impl Into<String>) -> Self {
        Self {
            category: CertificateCategory::Full,
            source_url: source_url.into(),
            derived_name: FULL_CERTIFICATE_NAME.to_string(),
        }
    }

    /// PDF 文件名
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.derived_name)
    }
}

impl fmt::Display for CertificateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.derived_name)
    }
}

fn course_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/course/(.+?)/certificate").expect("valid regex"))
}

fn degree_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/degree-(.+?)/certificate").expect("valid regex"))
}

fn numeric_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-\d+$").expect("valid regex"))
}

/// 提取 `/course/` 与 `/certificate` 之间的名称
pub fn course_name_from_url(url: &str) -> Option<String> {
    let name = course_pattern().captures(url)?.get(1)?.as_str();
    sanitize(name)
}

/// 提取 `/degree-` 与 `/certificate` 之间的名称，并去掉结尾的 `-<数字>`
pub fn degree_name_from_url(url: &str) -> Option<String> {
    let raw = degree_pattern().captures(url)?.get(1)?.as_str();
    let name = numeric_suffix().replace(raw, "");
    sanitize(&name)
}

// 名称直接作为文件名，不能为空，也不能跳出所在目录
fn sanitize(name: &str) -> Option<String> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_name_between_markers() {
        assert_eq!(
            course_name_from_url("https://cursos.alura.com.br/user/123/course/java-oo/certificate"),
            Some("java-oo".to_string())
        );
        assert_eq!(
            course_name_from_url("https://cursos.alura.com.br/user/1/course/rust-2024/certificate?lang=pt"),
            Some("rust-2024".to_string())
        );
    }

    #[test]
    fn test_course_name_keeps_trailing_digits() {
        // 只有学位证书去掉数字后缀
        assert_eq!(
            course_name_from_url("https://x/course/spring-boot-3/certificate"),
            Some("spring-boot-3".to_string())
        );
    }

    #[test]
    fn test_degree_name_strips_numeric_suffix() {
        assert_eq!(
            degree_name_from_url("https://cursos.alura.com.br/degree-java-developer-1234/certificate"),
            Some("java-developer".to_string())
        );
        assert_eq!(
            degree_name_from_url("https://x/user/9/degree-front-end-7/certificate"),
            Some("front-end".to_string())
        );
    }

    #[test]
    fn test_degree_name_without_suffix() {
        assert_eq!(
            degree_name_from_url("https://x/degree-data-science/certificate"),
            Some("data-science".to_string())
        );
    }

    #[test]
    fn test_unparseable_urls_are_rejected() {
        assert_eq!(course_name_from_url("https://x/course//certificate"), None);
        assert_eq!(course_name_from_url("https://x/formacao/abc"), None);
        assert_eq!(degree_name_from_url("https://x/degree--12/certificate"), None);
        assert_eq!(degree_name_from_url("https://x/course/a/certificate"), None);
    }

    #[test]
    fn test_path_like_names_are_rejected() {
        assert_eq!(course_name_from_url("https://x/course/a/b/certificate"), None);
        assert_eq!(course_name_from_url("https://x/course/../certificate"), None);
    }

    #[test]
    fn test_descriptor_constructors() {
        let course = CertificateDescriptor::course("https://x/course/go/certificate").unwrap();
        assert_eq!(course.category, CertificateCategory::Course);
        assert_eq!(course.file_name(), "go.pdf");

        assert!(CertificateDescriptor::degree("https://x/nothing").is_none());

        let full = CertificateDescriptor::full("https://x/user/1/fullCertificate");
        assert_eq!(full.file_name(), "fullCertificate.pdf");
    }
}
