//! Static site generator for notebook chapters.
//!
//! Turns a directory of `<id>-<title>.ipynb` notebooks into one page per
//! chapter plus a home page and a chapter listing.

pub mod assets;
pub mod builder;
pub mod chapter;
pub mod templates;

pub use builder::{build_navigation, BuildError, BuildResult, SiteConfig, StaticBuilder};
pub use chapter::{parse_identifier, Chapter, Identifier, IdentifierError};
pub use templates::{write_default_templates, TemplateError, TemplateRenderer};
