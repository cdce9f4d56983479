//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use minijinja::context;
use walkdir::WalkDir;

use nbsite_notebook::{ConvertError, HtmlExporter};

use crate::assets::chapter_css;
use crate::chapter::{Chapter, IdentifierError};
use crate::templates::{
    TemplateError, TemplateRenderer, CHAPTERS_TEMPLATE, CHAPTER_TEMPLATE, HOME_TEMPLATE,
};

/// File name of every generated page.
pub const PAGE_FILE: &str = "index.html";

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory holding the chapter notebooks
    pub source_dir: PathBuf,

    /// Directory the site is written into
    pub output_dir: PathBuf,

    /// Subdirectory of the output holding one directory per chapter
    pub chapters_subdir: String,

    /// Directory templates are loaded from
    pub templates_dir: PathBuf,

    /// Site root marker passed to every template as `root`
    pub root_marker: String,

    /// Extension of chapter notebooks
    pub extension: String,

    /// Minify the CSS inlined into chapter pages
    pub minify_css: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("nbs/chapters"),
            output_dir: PathBuf::from("."),
            chapters_subdir: "chapters".to_string(),
            templates_dir: PathBuf::from("templates"),
            root_marker: "gt".to_string(),
            extension: "ipynb".to_string(),
            minify_css: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of chapters built
    pub chapters: usize,

    /// Every page written, chapter pages first
    pub pages: Vec<PathBuf>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Malformed chapter filename {path}: {source}")]
    MalformedFilename {
        path: String,
        source: IdentifierError,
    },

    #[error("Chapter id {id:?} from {path} cannot be used as a directory name")]
    InvalidChapterId { id: String, path: String },

    #[error("Chapter id {id:?} is used by both {first} and {second}")]
    DuplicateChapterId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Failed to convert {path}: {source}")]
    Conversion { path: String, source: ConvertError },

    #[error("Template {name} not found in {dir}")]
    TemplateNotFound { name: String, dir: String },

    #[error("Failed to render template {name}: {message}")]
    TemplateRender { name: String, message: String },

    #[error("Filesystem error at {path}: {source}")]
    Filesystem { path: String, source: io::Error },
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound { name, dir } => Self::TemplateNotFound {
                name,
                dir: dir.display().to_string(),
            },
            TemplateError::Render { name, message } => Self::TemplateRender { name, message },
        }
    }
}

/// Whether `id` names a single, ordinary directory below the chapters dir.
fn is_valid_chapter_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

fn fs_error(path: &Path) -> impl FnOnce(io::Error) -> BuildError + '_ {
    move |source| BuildError::Filesystem {
        path: path.display().to_string(),
        source,
    }
}

/// Build the navigation list: one chapter per source, ordered by path.
///
/// Ordering compares paths, not ids, so `10-x` sorts before `9-y`.
pub fn build_navigation(sources: &[PathBuf]) -> Result<Vec<Chapter>, IdentifierError> {
    let mut sorted = sources.to_vec();
    sorted.sort();
    sorted.iter().map(|path| Chapter::from_path(path)).collect()
}

/// Static site builder.
///
/// A build runs in two phases. The first converts each notebook, in the
/// order it was discovered, and writes its chapter page. The second sorts the
/// discovered paths, derives the navigation list from them and writes the
/// home page and the chapter listing. Any error aborts the build; pages
/// written before the error stay on disk.
pub struct StaticBuilder {
    config: SiteConfig,
    exporter: HtmlExporter,
    templates: TemplateRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: SiteConfig) -> Self {
        let templates = TemplateRenderer::new(&config.templates_dir);
        Self {
            config,
            exporter: HtmlExporter::new(),
            templates,
        }
    }

    /// Build the site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let sources = self.discover_chapters()?;
        let chapters = self.identify_chapters(&sources)?;

        tracing::info!(
            "Building {} chapters from {}",
            chapters.len(),
            self.config.source_dir.display()
        );

        let mut pages = Vec::with_capacity(chapters.len() + 2);
        for (index, (chapter, path)) in chapters.iter().zip(&sources).enumerate() {
            tracing::info!(
                "[{}/{}] Chapter {} ({})",
                index + 1,
                chapters.len(),
                chapter.id,
                path.display()
            );
            pages.push(self.build_chapter(chapter, path)?);
        }

        let navigation =
            build_navigation(&sources).map_err(|source| BuildError::MalformedFilename {
                path: self.config.source_dir.display().to_string(),
                source,
            })?;

        let home = self.config.output_dir.join(PAGE_FILE);
        self.render_index(HOME_TEMPLATE, &home, &navigation)?;
        pages.push(home);

        let listing = self.chapters_dir().join(PAGE_FILE);
        self.render_index(CHAPTERS_TEMPLATE, &listing, &navigation)?;
        pages.push(listing);

        let duration = start.elapsed();

        Ok(BuildResult {
            chapters: chapters.len(),
            pages,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Directory holding the per-chapter output directories.
    fn chapters_dir(&self) -> PathBuf {
        self.config.output_dir.join(&self.config.chapters_subdir)
    }

    /// Find all chapter notebooks directly inside the source directory.
    fn discover_chapters(&self) -> Result<Vec<PathBuf>, BuildError> {
        let dir = &self.config.source_dir;

        if !dir.is_dir() {
            return Err(BuildError::Filesystem {
                path: dir.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "chapters directory not found"),
            });
        }

        let mut sources = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).display().to_string();
                BuildError::Filesystem {
                    path,
                    source: e.into(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if ext != Some(self.config.extension.as_str()) {
                tracing::debug!("Ignoring {}", path.display());
                continue;
            }

            sources.push(path.to_path_buf());
        }

        Ok(sources)
    }

    /// Parse every source's identifier and reject ids used twice.
    fn identify_chapters(&self, sources: &[PathBuf]) -> Result<Vec<Chapter>, BuildError> {
        let mut seen: HashMap<String, &Path> = HashMap::new();
        let mut chapters = Vec::with_capacity(sources.len());

        for path in sources {
            let chapter =
                Chapter::from_path(path).map_err(|source| BuildError::MalformedFilename {
                    path: path.display().to_string(),
                    source,
                })?;

            if !is_valid_chapter_id(&chapter.id) {
                return Err(BuildError::InvalidChapterId {
                    id: chapter.id,
                    path: path.display().to_string(),
                });
            }

            if let Some(first) = seen.insert(chapter.id.clone(), path) {
                return Err(BuildError::DuplicateChapterId {
                    id: chapter.id,
                    first: first.display().to_string(),
                    second: path.display().to_string(),
                });
            }

            chapters.push(chapter);
        }

        Ok(chapters)
    }

    /// Convert one notebook and write its chapter page.
    fn build_chapter(&self, chapter: &Chapter, path: &Path) -> Result<PathBuf, BuildError> {
        let dest_dir = self.chapters_dir().join(&chapter.id);
        fs::create_dir_all(&dest_dir).map_err(fs_error(&dest_dir))?;

        let conversion =
            self.exporter
                .convert_path(path)
                .map_err(|source| BuildError::Conversion {
                    path: path.display().to_string(),
                    source,
                })?;

        let css = chapter_css(&conversion.style_fragments, self.config.minify_css);

        let html = self.templates.render(
            CHAPTER_TEMPLATE,
            context! {
                nb => conversion.body_html,
                css => css,
                root => &self.config.root_marker,
            },
        )?;

        let page = dest_dir.join(PAGE_FILE);
        write_page(&page, &html)?;

        Ok(page)
    }

    /// Render a navigation page and write it to `dest`.
    fn render_index(
        &self,
        template: &str,
        dest: &Path,
        chapters: &[Chapter],
    ) -> Result<(), BuildError> {
        let html = self.templates.render(
            template,
            context! {
                chapters => chapters,
                root => &self.config.root_marker,
            },
        )?;

        write_page(dest, &html)
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fs_error(parent))?;
    }
    fs::write(path, html).map_err(fs_error(path))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
