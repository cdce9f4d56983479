//! Stylesheets bundled with the HTML exporter.
//!
//! The exporter carries its CSS as an ordered list of fragments. Chapter pages
//! only need the notebook-specific ones: the chapter template owns the page
//! base styles, and print rules are left out of the inlined CSS.

/// Index of the document-level base styles.
pub const BASE: usize = 0;
/// Index of the cell, prompt and output layout styles.
pub const CELL_LAYOUT: usize = 1;
/// Index of the code and output highlighting styles.
pub const HIGHLIGHT: usize = 2;
/// Index of the print media rules.
pub const PRINT: usize = 3;

/// Fragments inlined into every chapter page, in this order.
pub const CHAPTER_FRAGMENTS: [usize; 2] = [CELL_LAYOUT, HIGHLIGHT];

/// The exporter's ordered CSS resources.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBundle {
    fragments: Vec<String>,
}

impl StyleBundle {
    /// Bundle with the built-in stylesheets.
    pub fn new() -> Self {
        Self {
            fragments: [BASE_CSS, CELL_LAYOUT_CSS, HIGHLIGHT_CSS, PRINT_CSS]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// All fragments in bundle order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The fixed subset used by chapter pages: cell layout, then highlighting.
    pub fn chapter_fragments(&self) -> Vec<String> {
        CHAPTER_FRAGMENTS
            .iter()
            .filter_map(|&i| self.fragments.get(i).cloned())
            .collect()
    }
}

impl Default for StyleBundle {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_CSS: &str = r#"/* Notebook page base */
html {
  -webkit-text-size-adjust: 100%;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  font-size: 14px;
  line-height: 1.5;
  color: #1f2328;
  background: #ffffff;
}
"#;

const CELL_LAYOUT_CSS: &str = r#"/* Notebook cells */
.nb-notebook {
  --nb-prompt-width: 84px;
  --nb-border: #e0e0e0;
  --nb-muted: #616161;
  --nb-input-bg: #f7f7f7;
}

.nb-cell {
  display: flex;
  flex-direction: column;
  margin: 0 0 0.75rem 0;
}

.nb-input,
.nb-output {
  display: flex;
  flex-direction: row;
  align-items: flex-start;
}

.nb-prompt {
  flex: 0 0 var(--nb-prompt-width);
  padding: 0.4em 0.5em 0 0;
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  font-size: 13px;
  color: var(--nb-muted);
  text-align: right;
  white-space: nowrap;
}

.nb-input-prompt {
  color: #307fc1;
}

.nb-output-prompt {
  color: #bf5b3d;
}

.nb-source,
.nb-output-body {
  flex: 1 1 auto;
  min-width: 0;
  overflow-x: auto;
}

.nb-source pre {
  margin: 0;
  padding: 0.4em 0.6em;
  background: var(--nb-input-bg);
  border: 1px solid var(--nb-border);
  border-radius: 2px;
}

.nb-output-body pre {
  margin: 0;
  padding: 0.4em 0.6em;
}

.nb-output-body img {
  max-width: 100%;
  height: auto;
}

.nb-markdown {
  padding-left: var(--nb-prompt-width);
}

.nb-markdown table {
  border-collapse: collapse;
}

.nb-markdown th,
.nb-markdown td {
  border: 1px solid var(--nb-border);
  padding: 0.25em 0.6em;
}
"#;

const HIGHLIGHT_CSS: &str = r#"/* Code and output highlighting */
.nb-notebook pre,
.nb-notebook code {
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  font-size: 13px;
  line-height: 1.4;
}

.nb-source code {
  color: #24292f;
}

.nb-stream-stderr .nb-output-body {
  background: #fdd;
}

.nb-output-error .nb-output-body pre {
  color: #b22b31;
}

.nb-output-error .nb-error-name {
  font-weight: bold;
}

.nb-latex {
  overflow-x: auto;
}
"#;

const PRINT_CSS: &str = r#"/* Print */
@media print {
  .nb-prompt {
    display: none;
  }

  .nb-markdown {
    padding-left: 0;
  }

  .nb-cell {
    break-inside: avoid;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_has_fixed_order() {
        let bundle = StyleBundle::new();
        let fragments = bundle.fragments();

        assert_eq!(fragments.len(), 4);
        assert!(fragments[BASE].contains("Notebook page base"));
        assert!(fragments[CELL_LAYOUT].contains(".nb-cell"));
        assert!(fragments[HIGHLIGHT].contains("highlighting"));
        assert!(fragments[PRINT].contains("@media print"));
    }

    #[test]
    fn chapter_fragments_are_layout_then_highlight() {
        let bundle = StyleBundle::new();
        let chapter = bundle.chapter_fragments();

        assert_eq!(chapter.len(), 2);
        assert_eq!(chapter[0], bundle.fragments()[CELL_LAYOUT]);
        assert_eq!(chapter[1], bundle.fragments()[HIGHLIGHT]);
        assert!(!chapter.iter().any(|css| css.contains("@media print")));
    }
}
