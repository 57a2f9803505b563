use anyhow::{Context, Result};
use passbook_core::{BusinessKeywords, CategoryResolver, category::PERSONAL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_config_path, ensure_passbook_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub categories: CategoriesSection,
    pub ocr: OcrSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesSection {
    /// Added to the built-in business keyword dictionary
    pub extra_business_keywords: Vec<String>,
    /// Use only `extra_business_keywords`, ignoring the built-in list
    pub replace_builtin_keywords: bool,
    /// Label for person-to-person transfers
    pub personal_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSection {
    pub tesseract_command: String,
    /// Rasterizer used to turn PDF pages into images (poppler's pdftoppm)
    pub pdf_rasterizer: String,
    pub dpi: u32,
    /// Tesseract --psm
    pub page_segmentation_mode: u8,
    /// Tesseract --oem
    pub engine_mode: u8,
    /// Extra directories probed when the command is not on PATH
    pub search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Year assumed for "14 Dec"-style dates when exporting ISO dates
    pub default_year: Option<i32>,
}

impl Default for CategoriesSection {
    fn default() -> Self {
        Self {
            extra_business_keywords: Vec::new(),
            replace_builtin_keywords: false,
            personal_label: PERSONAL.to_string(),
        }
    }
}

impl Default for OcrSection {
    fn default() -> Self {
        Self {
            tesseract_command: "tesseract".to_string(),
            pdf_rasterizer: "pdftoppm".to_string(),
            dpi: 300,
            page_segmentation_mode: 6,
            engine_mode: 3,
            search_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Keyword dictionary and personal label as configured.
    pub fn category_resolver(&self) -> CategoryResolver {
        let cats = &self.categories;
        let mut keywords = if cats.replace_builtin_keywords {
            BusinessKeywords::empty()
        } else {
            BusinessKeywords::builtin()
        };
        keywords.extend(&cats.extra_business_keywords);
        CategoryResolver::new(keywords).with_personal_label(cats.personal_label.clone())
    }
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = resolve_config_path(explicit)?;
    if !p.exists() {
        if explicit.is_some() {
            anyhow::bail!("config not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_passbook_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
