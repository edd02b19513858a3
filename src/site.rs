//! Whole-site generation: static assets plus one page per markdown file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{Config, RenderConfig};
use crate::page;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: crate::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Outcome of a batch run. Failed pages do not stop the others.
#[derive(Debug, Default)]
pub struct Report {
    pub copied: usize,
    pub generated: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, SiteError)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Regenerate the output directory from scratch.
pub fn build(config: &Config) -> Result<Report, SiteError> {
    let site = &config.site;

    let copied = copy_dir_recursive(&site.static_dir, &site.output_dir)?;
    let mut report = generate_pages_recursive(
        &site.content_dir,
        &site.template,
        &site.output_dir,
        &config.render,
    )?;
    report.copied = copied;

    log::info!(
        "{} pages generated, {} failed, {} static files copied",
        report.generated.len(),
        report.failed.len(),
        report.copied
    );
    Ok(report)
}

/// Replace `dst` with a copy of `src`. Returns the number of files copied.
///
/// A missing `src` leaves an empty `dst`.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    if dst.exists() {
        fs::remove_dir_all(dst).map_err(io_error(dst))?;
        log::info!("removed {}", dst.display());
    }
    fs::create_dir_all(dst).map_err(io_error(dst))?;

    if !src.is_dir() {
        log::warn!("static directory {} not found, nothing copied", src.display());
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_error(entry.path()))?;
            log::info!("copied {} -> {}", entry.path().display(), target.display());
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render every `.md` file under `content_dir` into `dest_dir`, mirroring
/// the relative layout with an `.html` extension.
///
/// Only an unreadable template or directory aborts the run; a page that
/// fails is logged and recorded in the report.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    options: &RenderConfig,
) -> Result<Report, SiteError> {
    let template = fs::read_to_string(template_path).map_err(io_error(template_path))?;
    let mut report = Report::default();

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(content_dir) else {
            continue;
        };
        let dest = dest_dir.join(relative).with_extension("html");

        match generate_page_file(path, &template, &dest, options) {
            Ok(()) => {
                log::info!("generated {} -> {}", path.display(), dest.display());
                report.generated.push(dest);
            }
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                report.failed.push((path.to_path_buf(), e));
            }
        }
    }

    Ok(report)
}

/// Render one markdown file into `dest`, creating parent directories.
pub fn generate_page_file(
    src: &Path,
    template: &str,
    dest: &Path,
    options: &RenderConfig,
) -> Result<(), SiteError> {
    let markdown = fs::read_to_string(src).map_err(io_error(src))?;

    let html =
        page::generate_page(&markdown, template, options).map_err(|source| SiteError::Render {
            path: src.to_path_buf(),
            source,
        })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(dest, html).map_err(io_error(dest))
}
