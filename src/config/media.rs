use std::env;
use std::path::PathBuf;

/// Where uploaded blobs live and the URL prefix they are served under.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub url: String,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".to_string());
        let url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media".to_string());
        Self::new(root, &url)
    }

    pub fn new(root: impl Into<PathBuf>, url: &str) -> Self {
        let trimmed = url.trim_end_matches('/');
        let url = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self {
            root: root.into(),
            url,
        }
    }

    /// Public URL for a stored relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}
