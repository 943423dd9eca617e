//! 单个证书及压缩包的处理结果

use std::path::PathBuf;

use crate::error::HarvestError;
use crate::models::certificate::{CertificateCategory, CertificateDescriptor};

/// 一次下载实际写出的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub descriptor: CertificateDescriptor,
    /// 普通证书在前，正式证书（如有）在后
    pub produced_paths: Vec<PathBuf>,
    /// 仅课程证书有值：页面上是否找到正式证书按钮
    pub has_formal_variant: Option<bool>,
    /// 找到了正式证书按钮但下载失败
    pub formal_error: Option<String>,
}

impl DownloadResult {
    pub fn single(descriptor: CertificateDescriptor, path: PathBuf) -> Self {
        let has_formal_variant = match descriptor.category {
            CertificateCategory::Course => Some(false),
            _ => None,
        };
        Self {
            descriptor,
            produced_paths: vec![path],
            has_formal_variant,
            formal_error: None,
        }
    }

    /// 课程证书缺少正式版本
    pub fn missing_formal_variant(&self) -> bool {
        self.has_formal_variant == Some(false)
    }

    /// 正式证书按钮存在，但正式版本没有写出
    pub fn formal_failed(&self) -> bool {
        self.formal_error.is_some()
    }
}

/// 单个证书的处理结果
#[derive(Debug)]
pub enum ItemReport {
    Completed(DownloadResult),
    Failed {
        descriptor: CertificateDescriptor,
        error: HarvestError,
    },
}

impl ItemReport {
    pub fn descriptor(&self) -> &CertificateDescriptor {
        match self {
            ItemReport::Completed(result) => &result.descriptor,
            ItemReport::Failed { descriptor, .. } => descriptor,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ItemReport::Completed(_))
    }

    pub fn result(&self) -> Option<&DownloadResult> {
        match self {
            ItemReport::Completed(result) => Some(result),
            ItemReport::Failed { .. } => None,
        }
    }
}

/// 打包完成后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// 写入的文件条目数
    pub entries: usize,
}
