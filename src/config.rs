use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

// The class the github markdown stylesheet expects on the content container.
pub const DEFAULT_ARTICLE_CLASS: &str = "markdown-body";

// Config customizes the styled html document, every field is optional in the json file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub css_href: String,
    pub article_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: String::new(),
            css_href: String::new(),
            article_class: String::from(DEFAULT_ARTICLE_CLASS),
        }
    }
}

impl Config {
    // Turn a local 'css_href' into an absolute file url, relative paths are resolved against 'base_dir'.
    // The html document may be rendered into a temporary directory, so a relative href would not resolve.
    pub fn resolve_css_href(&mut self, base_dir: &Path) -> Result<()> {
        if self.css_href.is_empty() || is_url(&self.css_href) {
            return Ok(());
        }
        let path = base_dir.join(&self.css_href);
        let abs = path.canonicalize().map_err(|e| {
            Error::ConfigValue(format!(
                "css_href \"{}\" is neither a url nor an existing file: {}",
                self.css_href, e
            ))
        })?;
        let href = Url::from_file_path(&abs).map_err(|_| {
            Error::ConfigValue(format!(
                "css_href \"{}\" can't be converted to a file url",
                abs.display()
            ))
        })?;
        self.css_href = href.to_string();
        Ok(())
    }
}

pub fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

// Read the json config file, a local css_href in it is resolved relative to the file's directory.
pub fn read_config(path: &str) -> Result<Config> {
    let mut buf = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut buf))
        .map_err(|source| Error::ConfigRead {
            path: path.to_string(),
            source,
        })?;

    let mut cfg: Config = serde_json::from_str(&buf).map_err(|source| Error::ConfigParse {
        path: path.to_string(),
        source,
    })?;

    let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
    cfg.resolve_css_href(base_dir)?;
    log::debug!("loaded config \"{}\": {:?}", path, cfg);
    Ok(cfg)
}
