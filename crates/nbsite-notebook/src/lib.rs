//! Jupyter notebook to HTML conversion.
//!
//! Parses nbformat 4 notebooks and exports them as HTML body fragments,
//! together with the CSS those fragments need.

pub mod exporter;
pub mod notebook;
pub mod styles;
mod text;

pub use exporter::{Conversion, ConvertError, HtmlExporter};
pub use notebook::{Cell, Notebook, Output};
pub use styles::StyleBundle;
