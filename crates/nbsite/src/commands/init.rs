//! Initialize a notebook site in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nbsite_static::write_default_templates;

use crate::config::{base_dir, ConfigFile};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing nbsite...");

    // Create default config
    if !config_path.exists() {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    let site = ConfigFile::load(config_path)?.site_config(base_dir(config_path));

    // Create chapters directory with a first chapter
    fs::create_dir_all(&site.source_dir).context("Failed to create chapters directory")?;

    let welcome_path = site.source_dir.join("00-welcome.ipynb");
    if !welcome_path.exists() || yes {
        fs::write(&welcome_path, DEFAULT_CHAPTER)
            .with_context(|| format!("Failed to write {}", welcome_path.display()))?;
        tracing::info!("Created {}", welcome_path.display());
    }

    // Create templates
    let written = write_default_templates(&site.templates_dir, yes)
        .context("Failed to write templates")?;
    for path in &written {
        tracing::info!("Created {}", path.display());
    }
    if written.len() < 3 {
        tracing::warn!("Kept existing templates. Use --yes to overwrite.");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'nbsite build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# nbsite configuration

[site]
# Root marker passed to templates as `root`
root = "gt"

[paths]
# Directory holding <id>-<title>.ipynb chapter notebooks
notebooks = "nbs/chapters"

# Directory holding chapter.html, home.html and chapters.html
templates = "templates"

# Directory the site is written into
output = "."

# Output subdirectory for chapter pages
chapters = "chapters"

[build]
# Extension of chapter notebooks
extension = "ipynb"

# Minify the CSS inlined into chapter pages
minify = false
"#;

const DEFAULT_CHAPTER: &str = r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "# Welcome\n",
    "\n",
    "Each notebook in this directory becomes one chapter. Name notebooks\n",
    "`<id>-<title-words>.ipynb`; the id becomes the chapter's directory."
   ]
  },
  {
   "cell_type": "code",
   "execution_count": 1,
   "metadata": {},
   "outputs": [
    {
     "name": "stdout",
     "output_type": "stream",
     "text": [
      "Hello from nbsite\n"
     ]
    }
   ],
   "source": [
    "print(\"Hello from nbsite\")"
   ]
  }
 ],
 "metadata": {
  "language_info": {
   "name": "python"
  }
 },
 "nbformat": 4,
 "nbformat_minor": 5
}
"##;
