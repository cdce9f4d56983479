//! Chapter identity derived from source filenames.
//!
//! Chapter notebooks are named `<id>-<title-words>.ipynb`. The id is everything
//! before the first separator; the title is the rest of the stem, starting at
//! that separator, with every separator turned into a space. The title keeps
//! the leading space produced by the first separator (`01-intro` has the
//! title `" intro"`), and templates are expected to trim it if they care.
//!
//! Parsing is purely textual: an empty id (`-intro`) parses fine here, and it
//! is the site builder that rejects ids unusable as a directory name.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Character separating the id from the title words.
pub const SEPARATOR: char = '-';

/// Id and title parsed from a filename stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub id: String,
    pub title: String,
}

/// Errors that can occur when parsing a chapter filename.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("filename stem {stem:?} has no '-' separating id and title")]
    MissingSeparator { stem: String },

    #[error("path {} has no UTF-8 file stem", .0.display())]
    InvalidStem(PathBuf),
}

/// Parse a filename stem into its id and title.
pub fn parse_identifier(stem: &str) -> Result<Identifier, IdentifierError> {
    let Some(index) = stem.find(SEPARATOR) else {
        return Err(IdentifierError::MissingSeparator {
            stem: stem.to_string(),
        });
    };

    Ok(Identifier {
        id: stem[..index].to_string(),
        title: stem[index..].replace(SEPARATOR, " "),
    })
}

/// One navigable chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// Short identifier, also the output directory name
    pub id: String,

    /// Display title
    pub title: String,

    /// Notebook the chapter was built from
    #[serde(rename = "sourcePath")]
    pub source_path: String,
}

impl Chapter {
    /// Build a chapter record from a notebook path.
    pub fn from_path(path: &Path) -> Result<Self, IdentifierError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| IdentifierError::InvalidStem(path.to_path_buf()))?;

        let Identifier { id, title } = parse_identifier(stem)?;

        Ok(Self {
            id,
            title,
            source_path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_id_and_title() {
        let ident = parse_identifier("01-intro-basics").unwrap();
        assert_eq!(ident.id, "01");
        assert_eq!(ident.title, " intro basics");
    }

    #[test]
    fn id_stops_at_first_separator() {
        let ident = parse_identifier("02-setup-guide").unwrap();
        assert_eq!(ident.id, "02");
        assert_eq!(ident.title, " setup guide");

        let ident = parse_identifier("-untitled").unwrap();
        assert_eq!(ident.id, "");
        assert_eq!(ident.title, " untitled");
    }

    #[test]
    fn rejects_stem_without_separator() {
        let err = parse_identifier("chapter1").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::MissingSeparator {
                stem: "chapter1".to_string()
            }
        );
    }

    #[test]
    fn chapter_from_path_uses_stem_only() {
        let chapter = Chapter::from_path(Path::new("nbs/chapters/01-intro-basics.ipynb")).unwrap();

        assert_eq!(chapter.id, "01");
        assert_eq!(chapter.title, " intro basics");
        assert_eq!(
            chapter.source_path,
            Path::new("nbs/chapters/01-intro-basics.ipynb")
                .display()
                .to_string()
        );
    }

    #[test]
    fn chapter_from_path_without_separator_fails() {
        let err = Chapter::from_path(Path::new("nbs/chapters/chapter1.ipynb")).unwrap_err();
        assert!(matches!(err, IdentifierError::MissingSeparator { .. }));
    }
}
