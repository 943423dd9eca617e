//! 打包服务 - 业务能力层
//!
//! 把整个目录写入一个 zip，完成信号通过 `ArchiveJob::wait` 获取

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{HarvestError, HarvestResult};
use crate::models::ArchiveSummary;

/// 最高压缩级别
const COMPRESSION_LEVEL: i64 = 9;

pub struct ArchivePackager;

impl ArchivePackager {
    /// 在后台线程开始打包
    ///
    /// 条目名为相对 `source_dir` 的路径，不包含根目录名，也不写目录条目
    pub fn package(source_dir: &Path, dest_path: &Path) -> ArchiveJob {
        let source = source_dir.to_path_buf();
        let dest = dest_path.to_path_buf();
        info!("📦 开始打包: {} → {}", source.display(), dest.display());

        let completion = {
            let (source, dest) = (source.clone(), dest.clone());
            tokio::task::spawn_blocking(move || write_archive(&source, &dest))
        };

        ArchiveJob {
            source_dir: source,
            dest_path: dest,
            completion,
        }
    }
}

/// 正在进行的打包任务
///
/// 只有 `wait` 返回后压缩包才完整
pub struct ArchiveJob {
    source_dir: PathBuf,
    dest_path: PathBuf,
    completion: JoinHandle<HarvestResult<usize>>,
}

impl ArchiveJob {
    /// 等待写入和落盘全部完成
    pub async fn wait(self) -> HarvestResult<ArchiveSummary> {
        let entries = self
            .completion
            .await
            .map_err(|e| HarvestError::archive(&self.dest_path, format!("打包任务异常退出: {}", e)))??;

        info!(
            "✅ 压缩包已生成: {} → {} ({} 个文件)",
            self.source_dir.display(),
            self.dest_path.display(),
            entries
        );
        Ok(ArchiveSummary {
            path: self.dest_path,
            entries,
        })
    }
}

fn write_archive(source_dir: &Path, dest_path: &Path) -> HarvestResult<usize> {
    if !source_dir.is_dir() {
        return Err(HarvestError::archive(
            dest_path,
            format!("源目录不存在: {}", source_dir.display()),
        ));
    }
    let dest_dir = match dest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // 先写临时文件，成功后再重命名，失败时不会留下残缺的压缩包
    let tmp = NamedTempFile::new_in(dest_dir).map_err(|e| HarvestError::archive(dest_path, e))?;
    let mut zip = ZipWriter::new(tmp);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    let mut entries = 0;
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| HarvestError::archive(dest_path, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(source_dir, entry.path()).map_err(|e| HarvestError::archive(dest_path, e))?;
        debug!("添加条目: {}", name);
        zip.start_file(name, options).map_err(|e| HarvestError::archive(dest_path, e))?;
        let mut file = File::open(entry.path()).map_err(|e| HarvestError::archive(dest_path, e))?;
        io::copy(&mut file, &mut zip).map_err(|e| HarvestError::archive(dest_path, e))?;
        entries += 1;
    }

    let tmp = zip.finish().map_err(|e| HarvestError::archive(dest_path, e))?;
    tmp.as_file().sync_all().map_err(|e| HarvestError::archive(dest_path, e))?;
    tmp.persist(dest_path).map_err(|e| HarvestError::archive(dest_path, e.error))?;

    Ok(entries)
}

/// 相对路径，统一使用 `/` 分隔
fn entry_name(root: &Path, path: &Path) -> io::Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
