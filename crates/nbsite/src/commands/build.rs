//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use nbsite_static::{BuildResult, StaticBuilder};

use crate::config::{base_dir, ConfigFile};

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<BuildResult> {
    tracing::info!("Building static site...");

    let file_config = ConfigFile::load(config_path)?;
    let mut config = file_config.site_config(base_dir(config_path));

    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify_css = minify;
    }

    let result = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Built {} chapters ({} pages) in {}ms",
        result.chapters,
        result.pages.len(),
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builds_from_config_directory() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("site.toml");
        fs::write(
            &config_path,
            "[paths]\nnotebooks = \"nbs\"\noutput = \"public\"\n",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("nbs")).unwrap();
        fs::write(
            temp.path().join("nbs/01-intro.ipynb"),
            r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": []}"#,
        )
        .unwrap();
        nbsite_static::write_default_templates(&temp.path().join("templates"), false).unwrap();

        let result = run(&config_path, None, None).unwrap();

        assert_eq!(result.chapters, 1);
        assert!(temp.path().join("public/chapters/01/index.html").exists());
        assert!(temp.path().join("public/index.html").exists());
    }

    #[test]
    fn output_flag_overrides_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("site.toml");
        fs::create_dir_all(temp.path().join("nbs/chapters")).unwrap();
        nbsite_static::write_default_templates(&temp.path().join("templates"), false).unwrap();
        let out = temp.path().join("elsewhere");

        run(&config_path, Some(out.clone()), Some(true)).unwrap();

        assert!(out.join("index.html").exists());
        assert!(out.join("chapters/index.html").exists());
    }
}
