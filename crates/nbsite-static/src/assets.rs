//! Stylesheet handling for chapter pages.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Join style fragments into the CSS inlined into a chapter page.
pub fn concat_css(fragments: &[String]) -> String {
    fragments.concat()
}

/// Minify CSS using lightningcss.
pub fn minify_css(css: &str) -> Result<String, String> {
    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| format!("CSS parse error: {}", e))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| format!("CSS minify error: {}", e))?;

    Ok(minified.code)
}

/// Produce the chapter CSS, minified when requested.
///
/// CSS that fails to minify is used as-is.
pub fn chapter_css(fragments: &[String], minify: bool) -> String {
    let css = concat_css(fragments);
    if !minify {
        return css;
    }

    match minify_css(&css) {
        Ok(minified) => minified,
        Err(e) => {
            tracing::warn!("Using unminified chapter CSS: {}", e);
            css
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbsite_notebook::StyleBundle;

    #[test]
    fn concatenates_in_order() {
        let fragments = vec![".a{}\n".to_string(), ".b{}\n".to_string()];
        assert_eq!(concat_css(&fragments), ".a{}\n.b{}\n");
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn minifies_bundled_chapter_styles() {
        let fragments = StyleBundle::new().chapter_fragments();

        let plain = chapter_css(&fragments, false);
        let minified = chapter_css(&fragments, true);

        assert!(minified.len() < plain.len());
        assert!(minified.contains(".nb-cell"));
    }
}
