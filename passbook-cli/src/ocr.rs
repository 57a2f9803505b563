//! Text extraction for statement files.
//!
//! Plain-text inputs are read as-is. Images go through Tesseract; PDFs are
//! rasterised page by page with pdftoppm first. Any failure here is fatal
//! for the request: an unreadable file must not look like an empty statement.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;

use crate::config::OcrSection;

/// Where Tesseract usually lives when it is not on PATH
const COMMON_TOOL_DIRS: &[&str] = &["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("input not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("unsupported input type: {0} (expected .pdf, an image, or .txt)")]
    UnsupportedInput(String),

    #[error("{tool} not found on PATH or in search paths (set [ocr] in config.toml)")]
    ToolMissing { tool: String },

    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no text recognised in {0}")]
    EmptyText(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
    Pdf,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self, OcrError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if ext == "pdf" {
            Ok(InputKind::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(InputKind::Image)
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Ok(InputKind::Text)
        } else {
            Err(OcrError::UnsupportedInput(path.display().to_string()))
        }
    }
}

/// Located OCR tools plus their settings
#[derive(Debug, Clone)]
pub struct OcrEngine {
    tesseract: PathBuf,
    rasterizer: String,
    search_paths: Vec<PathBuf>,
    dpi: u32,
    psm: u8,
    oem: u8,
}

impl OcrEngine {
    pub fn locate(cfg: &OcrSection) -> Result<Self, OcrError> {
        let tesseract = find_tool(&cfg.tesseract_command, &cfg.search_paths)?;
        info!("using tesseract at {}", tesseract.display());
        Ok(Self {
            tesseract,
            rasterizer: cfg.pdf_rasterizer.clone(),
            search_paths: cfg.search_paths.clone(),
            dpi: cfg.dpi,
            psm: cfg.page_segmentation_mode,
            oem: cfg.engine_mode,
        })
    }

    pub fn image_to_text(&self, image: &Path) -> Result<String, OcrError> {
        let output = run_tool(
            Command::new(&self.tesseract)
                .arg(image)
                .arg("stdout")
                .arg("--oem")
                .arg(self.oem.to_string())
                .arg("--psm")
                .arg(self.psm.to_string()),
            "tesseract",
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Rasterise every page, OCR them in page order and join with newlines.
    pub fn pdf_to_text(&self, pdf: &Path) -> Result<String, OcrError> {
        let rasterizer = find_tool(&self.rasterizer, &self.search_paths)?;
        let scratch = scratch_dir()?;

        let result = (|| -> Result<String, OcrError> {
            run_tool(
                Command::new(&rasterizer)
                    .arg("-r")
                    .arg(self.dpi.to_string())
                    .arg("-png")
                    .arg(pdf)
                    .arg(scratch.join("page")),
                &self.rasterizer,
            )?;

            let mut pages: Vec<PathBuf> = fs::read_dir(&scratch)
                .map_err(|source| OcrError::Io {
                    path: scratch.clone(),
                    source,
                })?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|e| e == "png"))
                .collect();
            // pdftoppm zero-pads page numbers, so name order is page order
            pages.sort();
            debug!("rasterised {} pages from {}", pages.len(), pdf.display());

            let mut text = String::new();
            for page in &pages {
                text.push_str(&self.image_to_text(page)?);
                text.push('\n');
            }
            Ok(text)
        })();

        let _ = fs::remove_dir_all(&scratch);
        result
    }
}

/// Raw text for a statement file.
pub fn extract_text(path: &Path, cfg: &OcrSection) -> Result<String, OcrError> {
    if !path.exists() {
        return Err(OcrError::SourceNotFound(path.to_path_buf()));
    }

    let text = match InputKind::from_path(path)? {
        InputKind::Text => fs::read_to_string(path).map_err(|source| OcrError::Io {
            path: path.to_path_buf(),
            source,
        })?,
        InputKind::Image => OcrEngine::locate(cfg)?.image_to_text(path)?,
        InputKind::Pdf => OcrEngine::locate(cfg)?.pdf_to_text(path)?,
    };

    if text.trim().is_empty() {
        return Err(OcrError::EmptyText(path.to_path_buf()));
    }
    Ok(text)
}

/// PATH first, then configured directories, then the usual install locations.
pub fn find_tool(command: &str, search_paths: &[PathBuf]) -> Result<PathBuf, OcrError> {
    if let Ok(found) = which::which(command) {
        return Ok(found);
    }

    search_paths
        .iter()
        .cloned()
        .chain(COMMON_TOOL_DIRS.iter().map(PathBuf::from))
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| OcrError::ToolMissing {
            tool: command.to_string(),
        })
}

fn run_tool(cmd: &mut Command, tool: &str) -> Result<Output, OcrError> {
    debug!("running {:?}", cmd);
    let output = cmd.output().map_err(|source| OcrError::Io {
        path: PathBuf::from(tool),
        source,
    })?;
    if !output.status.success() {
        return Err(OcrError::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

fn scratch_dir() -> Result<PathBuf, OcrError> {
    let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("passbook-{}-{}", std::process::id(), stamp));
    fs::create_dir_all(&dir).map_err(|source| OcrError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
