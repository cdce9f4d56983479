//! Notebook document model (nbformat 4).

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;

/// Language used for code cells when the notebook does not declare one.
pub const DEFAULT_LANGUAGE: &str = "python";

/// A parsed notebook document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Notebook {
    /// Major format version
    pub nbformat: u32,

    /// Minor format version
    #[serde(default)]
    pub nbformat_minor: u32,

    /// Notebook-level metadata
    #[serde(default)]
    pub metadata: NotebookMetadata,

    /// Cells in document order
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Parse a notebook from its JSON text.
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Language of the notebook's code cells.
    pub fn language(&self) -> &str {
        self.metadata
            .language_info
            .as_ref()
            .map(|info| info.name.as_str())
            .or_else(|| {
                self.metadata
                    .kernelspec
                    .as_ref()
                    .and_then(|k| k.language.as_deref())
            })
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// Notebook-level metadata. Only the fields the exporter reads are modelled.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NotebookMetadata {
    #[serde(default)]
    pub language_info: Option<LanguageInfo>,

    #[serde(default)]
    pub kernelspec: Option<KernelSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LanguageInfo {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: Option<String>,
}

/// Text stored either as one string or as a list of lines.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MultilineString {
    Single(String),
    Lines(Vec<String>),
}

impl MultilineString {
    /// The full text with lines concatenated.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Single(s) => Cow::Borrowed(s),
            Self::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }
}

impl Default for MultilineString {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

/// A notebook cell.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Markdown {
        #[serde(default)]
        source: MultilineString,
    },

    Code {
        #[serde(default)]
        source: MultilineString,

        #[serde(default)]
        execution_count: Option<u32>,

        #[serde(default)]
        outputs: Vec<Output>,
    },

    Raw {
        #[serde(default)]
        source: MultilineString,

        #[serde(default)]
        metadata: RawCellMetadata,
    },

    /// Cell type this exporter does not know about
    #[serde(other)]
    Unknown,
}

/// Metadata of a raw cell, naming the format its content is written in.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawCellMetadata {
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub raw_mimetype: Option<String>,
}

impl RawCellMetadata {
    /// The declared MIME type, if any.
    pub fn mime_type(&self) -> Option<&str> {
        self.format.as_deref().or(self.raw_mimetype.as_deref())
    }
}

/// MIME type to payload. Text payloads may be split into lines.
pub type MimeBundle = BTreeMap<String, serde_json::Value>;

/// One output of a code cell.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        name: String,

        #[serde(default)]
        text: MultilineString,
    },

    ExecuteResult {
        #[serde(default)]
        execution_count: Option<u32>,

        #[serde(default)]
        data: MimeBundle,
    },

    DisplayData {
        #[serde(default)]
        data: MimeBundle,
    },

    Error {
        #[serde(default)]
        ename: String,

        #[serde(default)]
        evalue: String,

        #[serde(default)]
        traceback: Vec<String>,
    },

    #[serde(other)]
    Unknown,
}

/// Read a text payload out of a MIME bundle value.
///
/// Strings and lists of strings are joined; any other JSON value is
/// serialized back to compact JSON.
pub fn mime_text(value: &serde_json::Value) -> Cow<'_, str> {
    match value {
        serde_json::Value::String(s) => Cow::Borrowed(s),
        serde_json::Value::Array(items) if items.iter().all(|v| v.is_string()) => Cow::Owned(
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<String>(),
        ),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_cells_and_outputs() {
        let nb = Notebook::parse(
            r##"{
  "nbformat": 4,
  "nbformat_minor": 5,
  "metadata": {"language_info": {"name": "julia"}},
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Title\n", "Body"]},
    {"cell_type": "code", "execution_count": 3, "metadata": {}, "source": "1 + 1",
     "outputs": [
       {"output_type": "execute_result", "execution_count": 3, "metadata": {},
        "data": {"text/plain": ["2"]}},
       {"output_type": "stream", "name": "stdout", "text": "hi\n"}
     ]},
    {"cell_type": "raw", "metadata": {"format": "text/html"}, "source": "<b>raw</b>"}
  ]
}"##,
        )
        .unwrap();

        assert_eq!(nb.nbformat, 4);
        assert_eq!(nb.language(), "julia");
        assert_eq!(nb.cells.len(), 3);

        let Cell::Markdown { source } = &nb.cells[0] else {
            panic!("expected markdown cell");
        };
        assert_eq!(source.text(), "# Title\nBody");

        let Cell::Code {
            execution_count,
            outputs,
            ..
        } = &nb.cells[1]
        else {
            panic!("expected code cell");
        };
        assert_eq!(*execution_count, Some(3));
        assert_eq!(outputs.len(), 2);
        assert!(matches!(&outputs[1], Output::Stream { name, .. } if name == "stdout"));

        let Cell::Raw { metadata, .. } = &nb.cells[2] else {
            panic!("expected raw cell");
        };
        assert_eq!(metadata.mime_type(), Some("text/html"));
    }

    #[test]
    fn tolerates_unknown_cell_and_output_types() {
        let nb = Notebook::parse(
            r#"{"nbformat": 4, "nbformat_minor": 2, "metadata": {}, "cells": [
                {"cell_type": "heading", "source": "old"},
                {"cell_type": "code", "source": "", "execution_count": null,
                 "outputs": [{"output_type": "update_display_data"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(nb.cells[0], Cell::Unknown);
        let Cell::Code {
            outputs,
            execution_count,
            ..
        } = &nb.cells[1]
        else {
            panic!("expected code cell");
        };
        assert_eq!(*execution_count, None);
        assert_eq!(outputs[0], Output::Unknown);
    }

    #[test]
    fn language_defaults_to_python() {
        let nb = Notebook::parse(r#"{"nbformat": 4, "cells": []}"#).unwrap();
        assert_eq!(nb.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn mime_text_joins_lines() {
        let value = serde_json::json!(["a\n", "b"]);
        assert_eq!(mime_text(&value), "a\nb");

        let value = serde_json::json!({"k": 1});
        assert_eq!(mime_text(&value), r#"{"k":1}"#);
    }
}
