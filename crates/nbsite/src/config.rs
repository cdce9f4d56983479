//! Configuration file (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nbsite_static::SiteConfig;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site root marker handed to templates
    pub root: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub notebooks: PathBuf,
    pub templates: PathBuf,
    pub output: PathBuf,
    pub chapters: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub extension: String,
    pub minify: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            root: SiteConfig::default().root_marker,
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        let defaults = SiteConfig::default();
        Self {
            notebooks: defaults.source_dir,
            templates: defaults.templates_dir,
            output: defaults.output_dir,
            chapters: defaults.chapters_subdir,
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        let defaults = SiteConfig::default();
        Self {
            extension: defaults.extension,
            minify: defaults.minify_css,
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Site configuration with paths resolved against `base`.
    pub fn site_config(&self, base: &Path) -> SiteConfig {
        SiteConfig {
            source_dir: base.join(&self.paths.notebooks),
            output_dir: base.join(&self.paths.output),
            chapters_subdir: self.paths.chapters.clone(),
            templates_dir: base.join(&self.paths.templates),
            root_marker: self.site.root.clone(),
            extension: self.build.extension.clone(),
            minify_css: self.build.minify,
        }
    }
}

/// Directory config paths are relative to: the one holding the config file.
pub fn base_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or(Path::new(""))
}
