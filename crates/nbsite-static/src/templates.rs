//! Template rendering for chapter and index pages.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{path_loader, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

/// Template for a single chapter page. Variables: `nb`, `css`, `root`.
pub const CHAPTER_TEMPLATE: &str = "chapter.html";
/// Template for the site home page. Variables: `chapters`, `root`.
pub const HOME_TEMPLATE: &str = "home.html";
/// Template for the chapter listing page. Variables: `chapters`, `root`.
pub const CHAPTERS_TEMPLATE: &str = "chapters.html";

/// Errors that can occur when rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template {name} not found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("Failed to render template {name}: {message}")]
    Render { name: String, message: String },
}

/// Renders named templates from a single directory.
///
/// Variables are resolved strictly: a template that references a variable
/// missing from the supplied context fails instead of printing nothing.
pub struct TemplateRenderer {
    env: Environment<'static>,
    dir: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer loading templates from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();

        let mut env = Environment::new();
        env.set_loader(path_loader(dir.clone()));
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        Self { env, dir }
    }

    /// Render the template `name` with the given variables.
    pub fn render<S: Serialize>(&self, name: &str, vars: S) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound {
                name: name.to_string(),
                dir: self.dir.clone(),
            },
            _ => TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            },
        })?;

        tmpl.render(vars).map_err(|e| TemplateError::Render {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// The built-in templates as `(file name, source)` pairs.
pub fn default_templates() -> [(&'static str, &'static str); 3] {
    [
        (CHAPTER_TEMPLATE, DEFAULT_CHAPTER),
        (HOME_TEMPLATE, DEFAULT_HOME),
        (CHAPTERS_TEMPLATE, DEFAULT_CHAPTERS),
    ]
}

/// Write the built-in templates into `dir`.
///
/// Existing files are left untouched unless `overwrite` is set. Returns the
/// paths that were written.
pub fn write_default_templates(dir: &Path, overwrite: bool) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (name, source) in default_templates() {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing template {}", path.display());
            continue;
        }
        fs::write(&path, source)?;
        written.push(path);
    }

    Ok(written)
}

const DEFAULT_CHAPTER: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Chapter</title>
  <style>
{{ css | safe }}
  </style>
</head>
<body>
  <nav class="site-nav">
    <a href="/{{ root }}/">Home</a>
    <a href="/{{ root }}/chapters/">Chapters</a>
  </nav>
  <main class="chapter">
{{ nb | safe }}
  </main>
</body>
</html>
"##;

const DEFAULT_HOME: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Home</title>
</head>
<body>
  <main class="home">
    <h1>Contents</h1>
    <ol class="chapter-list">
    {% for chapter in chapters %}
      <li><a href="/{{ root }}/chapters/{{ chapter.id }}/">{{ chapter.id }}{{ chapter.title }}</a></li>
    {% endfor %}
    </ol>
  </main>
</body>
</html>
"##;

const DEFAULT_CHAPTERS: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Chapters</title>
</head>
<body>
  <nav class="site-nav">
    <a href="/{{ root }}/">Home</a>
  </nav>
  <main class="chapters">
    <h1>Chapters</h1>
    <ul class="chapter-list">
    {% for chapter in chapters %}
      <li><a href="/{{ root }}/chapters/{{ chapter.id }}/">{{ chapter.title | trim }}</a></li>
    {% endfor %}
    </ul>
  </main>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::Chapter;
    use minijinja::context;
    use tempfile::tempdir;

    fn renderer_with_defaults() -> (tempfile::TempDir, TemplateRenderer) {
        let temp = tempdir().unwrap();
        write_default_templates(temp.path(), false).unwrap();
        let renderer = TemplateRenderer::new(temp.path());
        (temp, renderer)
    }

    #[test]
    fn renders_chapter_page() {
        let (_temp, renderer) = renderer_with_defaults();

        let html = renderer
            .render(
                CHAPTER_TEMPLATE,
                context! { nb => "<p>x</p>", css => "", root => "gt" },
            )
            .unwrap();

        assert!(html.contains("<p>x</p>"));
        assert!(html.contains("gt"));
    }

    #[test]
    fn renders_chapter_listing() {
        let (_temp, renderer) = renderer_with_defaults();
        let chapters = vec![Chapter {
            id: "01".to_string(),
            title: " intro".to_string(),
            source_path: "nbs/chapters/01-intro.ipynb".to_string(),
        }];

        let html = renderer
            .render(CHAPTERS_TEMPLATE, context! { chapters => chapters, root => "gt" })
            .unwrap();

        assert!(html.contains(r#"<a href="/gt/chapters/01/">intro</a>"#));
    }

    #[test]
    fn exposes_source_path_to_templates() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("list.txt"),
            "{% for c in chapters %}{{ c.sourcePath }}{% endfor %}",
        )
        .unwrap();
        let renderer = TemplateRenderer::new(temp.path());
        let chapters = vec![Chapter {
            id: "01".to_string(),
            title: " intro".to_string(),
            source_path: "a/01-intro.ipynb".to_string(),
        }];

        let out = renderer
            .render("list.txt", context! { chapters => chapters })
            .unwrap();

        assert_eq!(out, "a/01-intro.ipynb");
    }

    #[test]
    fn missing_template_is_not_found() {
        let (_temp, renderer) = renderer_with_defaults();

        let err = renderer
            .render("missing.html", context! { root => "gt" })
            .unwrap_err();

        assert!(matches!(err, TemplateError::NotFound { ref name, .. } if name == "missing.html"));
    }

    #[test]
    fn undefined_variable_is_render_error() {
        let (_temp, renderer) = renderer_with_defaults();

        let err = renderer
            .render(CHAPTER_TEMPLATE, context! { nb => "<p>x</p>", css => "" })
            .unwrap_err();

        assert!(matches!(err, TemplateError::Render { ref name, .. } if name == CHAPTER_TEMPLATE));
    }

    #[test]
    fn keeps_existing_templates_unless_overwriting() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(HOME_TEMPLATE), "custom").unwrap();

        let written = write_default_templates(temp.path(), false).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join(HOME_TEMPLATE)).unwrap(),
            "custom"
        );

        let written = write_default_templates(temp.path(), true).unwrap();
        assert_eq!(written.len(), 3);
        assert_ne!(
            fs::read_to_string(temp.path().join(HOME_TEMPLATE)).unwrap(),
            "custom"
        );
    }
}
