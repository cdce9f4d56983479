//! Notebook to HTML fragment exporter.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use pulldown_cmark::{html, Options, Parser};

use crate::notebook::{mime_text, Cell, MimeBundle, MultilineString, Notebook, Output};
use crate::styles::StyleBundle;
use crate::text::{escape_html, strip_ansi};

/// Output MIME types in order of preference.
pub const MIME_PRIORITY: [&str; 7] = [
    "text/html",
    "image/svg+xml",
    "image/png",
    "image/jpeg",
    "text/markdown",
    "text/latex",
    "text/plain",
];

/// Oldest notebook format major version the exporter reads.
pub const MIN_NBFORMAT: u32 = 4;

/// Result of converting one notebook.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Body markup, without any document wrapper
    pub body_html: String,

    /// CSS needed by the body markup, in inlining order
    pub style_fragments: Vec<String>,
}

/// Errors that can occur when converting a notebook.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read notebook: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid notebook JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported notebook format {major}.{minor} (need 4.x or newer)")]
    Unsupported { major: u32, minor: u32 },
}

/// Exports notebooks as HTML body fragments.
///
/// Only cell markup is produced; the page around it, including the
/// `<html>`/`<body>` wrapper, belongs to the caller's template.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    styles: StyleBundle,
}

impl HtmlExporter {
    /// Create an exporter with the built-in style bundle.
    pub fn new() -> Self {
        Self {
            styles: StyleBundle::new(),
        }
    }

    /// The full ordered style bundle.
    pub fn resources(&self) -> &StyleBundle {
        &self.styles
    }

    /// Read and convert the notebook at `path`.
    pub fn convert_path(&self, path: &Path) -> Result<Conversion, ConvertError> {
        let source = fs::read_to_string(path)?;
        self.convert_str(&source)
    }

    /// Convert notebook JSON text.
    pub fn convert_str(&self, source: &str) -> Result<Conversion, ConvertError> {
        let notebook = Notebook::parse(source)?;
        self.convert(&notebook)
    }

    /// Convert a parsed notebook.
    pub fn convert(&self, notebook: &Notebook) -> Result<Conversion, ConvertError> {
        if notebook.nbformat < MIN_NBFORMAT {
            return Err(ConvertError::Unsupported {
                major: notebook.nbformat,
                minor: notebook.nbformat_minor,
            });
        }

        let language = notebook.language();
        let mut body = String::from("<div class=\"nb-notebook\">\n");

        for cell in &notebook.cells {
            match cell {
                Cell::Markdown { source } => render_markdown_cell(&mut body, source),
                Cell::Code {
                    source,
                    execution_count,
                    outputs,
                } => render_code_cell(&mut body, language, source, *execution_count, outputs),
                Cell::Raw { source, metadata } => {
                    if metadata.mime_type() == Some("text/html") {
                        body.push_str(&source.text());
                        body.push('\n');
                    }
                }
                Cell::Unknown => {
                    tracing::warn!("Skipping cell of unknown type");
                }
            }
        }

        body.push_str("</div>\n");

        Ok(Conversion {
            body_html: body,
            style_fragments: self.styles.chapter_fragments(),
        })
    }
}

fn render_markdown_cell(out: &mut String, source: &MultilineString) {
    out.push_str("<div class=\"nb-cell nb-markdown-cell\">\n<div class=\"nb-markdown\">\n");
    out.push_str(&markdown_to_html(&source.text()));
    out.push_str("</div>\n</div>\n");
}

fn render_code_cell(
    out: &mut String,
    language: &str,
    source: &MultilineString,
    execution_count: Option<u32>,
    outputs: &[Output],
) {
    out.push_str("<div class=\"nb-cell nb-code-cell\">\n<div class=\"nb-input\">\n");
    let _ = writeln!(
        out,
        "<div class=\"nb-prompt nb-input-prompt\">In&nbsp;[{}]:</div>",
        prompt_number(execution_count)
    );
    let _ = writeln!(
        out,
        "<div class=\"nb-source\"><pre><code class=\"language-{}\">{}</code></pre></div>",
        escape_html(language),
        escape_html(&source.text())
    );
    out.push_str("</div>\n");

    if !outputs.is_empty() {
        out.push_str("<div class=\"nb-outputs\">\n");
        for output in outputs {
            render_output(out, output);
        }
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n");
}

fn render_output(out: &mut String, output: &Output) {
    match output {
        Output::Stream { name, text } => {
            let body = format!("<pre>{}</pre>", escape_html(&strip_ansi(&text.text())));
            let class = format!("nb-output-stream nb-stream-{}", escape_html(name));
            push_output(out, &class, "", &body);
        }
        Output::ExecuteResult {
            execution_count,
            data,
        } => {
            if let Some(body) = render_mime_bundle(data) {
                let prompt = format!("Out[{}]:", prompt_number(*execution_count));
                push_output(out, "nb-output-result", &prompt, &body);
            }
        }
        Output::DisplayData { data } => {
            if let Some(body) = render_mime_bundle(data) {
                push_output(out, "nb-output-display", "", &body);
            }
        }
        Output::Error {
            ename,
            evalue,
            traceback,
        } => {
            let mut body = format!(
                "<pre><span class=\"nb-error-name\">{}</span>: {}",
                escape_html(ename),
                escape_html(&strip_ansi(evalue))
            );
            for line in traceback {
                body.push('\n');
                body.push_str(&escape_html(&strip_ansi(line)));
            }
            body.push_str("</pre>");
            push_output(out, "nb-output-error", "", &body);
        }
        Output::Unknown => {
            tracing::debug!("Skipping output of unknown type");
        }
    }
}

fn push_output(out: &mut String, class: &str, prompt: &str, body: &str) {
    let _ = writeln!(
        out,
        "<div class=\"nb-output {class}\">\n<div class=\"nb-prompt nb-output-prompt\">{prompt}</div>\n<div class=\"nb-output-body\">{body}</div>\n</div>"
    );
}

/// Render the preferred representation in a MIME bundle.
fn render_mime_bundle(data: &MimeBundle) -> Option<String> {
    let (mime, value) = MIME_PRIORITY
        .iter()
        .find_map(|&mime| data.get(mime).map(|value| (mime, value)))?;
    let text = mime_text(value);

    let html = match mime {
        "text/html" | "image/svg+xml" => text.into_owned(),
        "image/png" | "image/jpeg" => {
            let encoded: String = text.split_whitespace().collect();
            format!("<img src=\"data:{mime};base64,{encoded}\" alt=\"output\">")
        }
        "text/markdown" => markdown_to_html(&text),
        "text/latex" => format!("<div class=\"nb-latex\">{}</div>", escape_html(&text)),
        _ => format!("<pre>{}</pre>", escape_html(&strip_ansi(&text))),
    };

    Some(html)
}

fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(source, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

fn prompt_number(execution_count: Option<u32>) -> String {
    execution_count.map_or_else(|| " ".to_string(), |n| n.to_string())
}
