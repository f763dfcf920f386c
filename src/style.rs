use std::io::Write;

use crate::config::Config;
use crate::error::{Error, Result};

use serde::Serialize;
use tinytemplate::TinyTemplate;
use v_htmlescape::escape;

// Built-in copy of the github markdown light stylesheet
// (https://github.com/sindresorhus/github-markdown-css).
pub const GITHUB_MARKDOWN_LIGHT_CSS: &str = include_str!("github-markdown-light.css");

// Closes the tags opened by the preamble.
pub const SUFFIX: &str = "
</article>
</body>
</html>";

// html document preamble, 'css' goes into a style context and is inserted as is,
// all other values are escaped before rendering.
const PREAMBLE_TEMPLATE_NAME: &str = "preamble";
const PREAMBLE_TEMPLATE: &str = r#"<html>
<head>
{{ if title }}<title>{title}</title>
{{ endif }}{{ if css_href }}<link rel="stylesheet" type="text/css" href="{css_href}">
{{ endif }}<style>
{css}
</style>
</head>
<body>
<article class="{article_class}">
"#;

#[derive(Serialize)]
struct PreambleContext<'preamble_context> {
    css: &'preamble_context str,
    title: String,
    css_href: String,
    article_class: String,
}

// StyleWrapper wraps the converted markdown into a complete html page.
pub struct StyleWrapper {
    preamble: String,
}

impl StyleWrapper {
    // Build the preamble up front, so a broken template fails before anything is written.
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut tt = TinyTemplate::new();
        tt.add_template(PREAMBLE_TEMPLATE_NAME, PREAMBLE_TEMPLATE)?;
        tt.set_default_formatter(&tinytemplate::format_unescaped);

        let ctx = PreambleContext {
            css: GITHUB_MARKDOWN_LIGHT_CSS,
            title: escape(&cfg.title).to_string(),
            css_href: escape(&cfg.css_href).to_string(),
            article_class: escape(&cfg.article_class).to_string(),
        };
        let preamble = tt.render(PREAMBLE_TEMPLATE_NAME, &ctx)?;
        Ok(StyleWrapper { preamble })
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn write_preamble(&self, sink: &mut dyn Write) -> Result<()> {
        sink.write_all(self.preamble.as_bytes())
            .map_err(Error::Render)
    }

    pub fn write_suffix(&self, sink: &mut dyn Write) -> Result<()> {
        sink.write_all(SUFFIX.as_bytes()).map_err(Error::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_preamble() {
        let w = StyleWrapper::new(&Config::default()).unwrap();
        let expected = format!(
            "<html>\n<head>\n<style>\n{}\n</style>\n</head>\n<body>\n<article class=\"markdown-body\">\n",
            GITHUB_MARKDOWN_LIGHT_CSS
        );
        assert_eq!(w.preamble(), expected);
    }

    #[test]
    fn test_css_is_not_escaped() {
        // the stylesheet embeds quoted svg urls and child selectors
        assert!(GITHUB_MARKDOWN_LIGHT_CSS.contains('"'));
        assert!(GITHUB_MARKDOWN_LIGHT_CSS.contains('>'));

        let w = StyleWrapper::new(&Config::default()).unwrap();
        assert!(w.preamble().contains(GITHUB_MARKDOWN_LIGHT_CSS));
    }

    #[test]
    fn test_text_values_are_escaped() {
        let cfg = Config {
            title: String::from("<script>alert('x')</script>"),
            css_href: String::from("a.css\" onload=\"x"),
            article_class: String::from("markdown-body <b>"),
        };
        let w = StyleWrapper::new(&cfg).unwrap();
        let p = w.preamble();
        assert!(!p.contains("<script>"), "{}", p);
        assert!(p.contains("<title>&lt;script&gt;"), "{}", p);
        assert!(!p.contains("\" onload=\""), "{}", p);
        assert!(p.contains("class=\"markdown-body &lt;b&gt;\""), "{}", p);
    }

    #[test]
    fn test_optional_head_lines() {
        let cfg = Config {
            title: String::from("Notes"),
            css_href: String::from("https://cdn.example.com/a.css"),
            ..Config::default()
        };
        let w = StyleWrapper::new(&cfg).unwrap();
        assert!(w.preamble().starts_with("<html>\n<head>\n<title>Notes</title>\n<link rel=\"stylesheet\""));
        assert!(w.preamble().contains("<style>\n"));
    }

    #[test]
    fn test_wrap_order() {
        let w = StyleWrapper::new(&Config::default()).unwrap();
        let mut out: Vec<u8> = Vec::new();
        w.write_preamble(&mut out).unwrap();
        out.extend_from_slice(b"<p>body</p>\n");
        w.write_suffix(&mut out).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("<html>\n<head>\n<style>"));
        assert!(s.ends_with("<p>body</p>\n\n</article>\n</body>\n</html>"));
    }
}
