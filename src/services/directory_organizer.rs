//! 目录管理服务 - 业务能力层
//!
//! 只负责"目录存在"这一能力，以及固定的输出目录结构

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HarvestError, HarvestResult};

/// 目录管理
pub struct DirectoryOrganizer;

impl DirectoryOrganizer {
    /// 确保目录存在（递归创建）
    ///
    /// 已存在时不做任何事；路径被普通文件占用时报错。
    /// 返回本次是否新建了目录。
    pub fn ensure(path: &Path) -> HarvestResult<bool> {
        if path.exists() {
            let meta = fs::metadata(path).map_err(|e| HarvestError::filesystem(path, e))?;
            if !meta.is_dir() {
                return Err(HarvestError::filesystem(
                    path,
                    std::io::Error::new(std::io::ErrorKind::AlreadyExists, "路径已存在但不是目录"),
                ));
            }
            debug!("目录已存在: {}", path.display());
            return Ok(false);
        }

        fs::create_dir_all(path).map_err(|e| HarvestError::filesystem(path, e))?;
        info!("📁 目录已创建: {}", path.display());
        Ok(true)
    }
}

/// 单个学生的输出目录结构
///
/// ```text
/// <output_root>/<id>/fullCertificate.pdf
/// <output_root>/<id>/cursos/normal/<课程>.pdf
/// <output_root>/<id>/cursos/formal/<课程>.pdf
/// <output_root>/<id>/formações/<学位>.pdf
/// <archive_root>/<id>.zip
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestLayout {
    pub root: PathBuf,
    pub courses_dir: PathBuf,
    pub formations_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub archive_path: PathBuf,
}

impl HarvestLayout {
    pub fn new(output_root: impl AsRef<Path>, archive_root: impl AsRef<Path>, student_id: &str) -> Self {
        let root = output_root.as_ref().join(student_id);
        let archive_dir = archive_root.as_ref().to_path_buf();
        Self {
            courses_dir: root.join("cursos"),
            formations_dir: root.join("formações"),
            archive_path: archive_dir.join(format!("{}.zip", student_id)),
            archive_dir,
            root,
        }
    }

    /// 清空上一次运行留下的文件，再创建下载前需要的目录（正式证书目录按需创建）
    pub fn prepare(&self) -> HarvestResult<()> {
        if self.root.is_dir() {
            fs::remove_dir_all(&self.root).map_err(|e| HarvestError::filesystem(&self.root, e))?;
            info!("🧹 已清空旧的输出目录: {}", self.root.display());
        }
        DirectoryOrganizer::ensure(&self.root)?;
        DirectoryOrganizer::ensure(&self.courses_dir)?;
        DirectoryOrganizer::ensure(&self.formations_dir)?;
        Ok(())
    }
}

pub fn normal_dir(courses_dir: &Path) -> PathBuf {
    courses_dir.join("normal")
}

pub fn formal_dir(courses_dir: &Path) -> PathBuf {
    courses_dir.join("formal")
}
