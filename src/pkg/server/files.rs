use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

use crate::prelude::Result;

pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Resolves a request target to the bytes and content type of an asset
/// under a document root. `None` means not found.
#[async_trait]
pub trait ResolveAsset {
    async fn resolve(&self, target: &str) -> Result<Option<Asset>>;
}

#[derive(Clone, Debug)]
pub struct DirRoot {
    root: PathBuf,
}

impl DirRoot {
    pub fn new(root: impl Into<PathBuf>) -> DirRoot {
        DirRoot { root: root.into() }
    }

    /// Maps a raw request target onto a path under the root. Query strings
    /// are dropped, percent-escapes decoded, and any `..` component makes
    /// the whole target unresolvable.
    fn sanitize(&self, target: &str) -> Option<PathBuf> {
        let path = target.split('?').next().unwrap_or("");
        let path = percent_decode(path);
        let mut full = self.root.clone();
        for part in path.split('/') {
            match part {
                "" | "." => continue,
                ".." => return None,
                part => full.push(part),
            }
        }
        Some(full)
    }
}

#[async_trait]
impl ResolveAsset for DirRoot {
    async fn resolve(&self, target: &str) -> Result<Option<Asset>> {
        let Some(mut path) = self.sanitize(target) else {
            tracing::warn!("rejected traversal attempt: {}", target);
            return Ok(None);
        };
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => {
                let index = path.join("index.html");
                if fs::metadata(&index).await.is_ok() {
                    path = index;
                } else {
                    return Ok(Some(Asset {
                        bytes: listing(&path).await?,
                        content_type: "text/html",
                    }));
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(None),
        }
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(Asset {
                bytes,
                content_type: content_type_for(&path),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "text/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("wasm") => "application/wasm",
        Some("mp3") => "audio/mpeg",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
            if let Ok(b) = u8::from_str_radix(hex, 16) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

async fn listing(dir: &Path) -> Result<Vec<u8>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();
    let items: String = names
        .iter()
        .map(|name| format!("<li><a href=\"{}\">{}</a></li>\n", name, name))
        .collect();
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<h1>Directory listing</h1>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        items
    )
    .into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_traversal() {
        let root = DirRoot::new("/srv/site");
        assert!(root.sanitize("/../etc/passwd").is_none());
        assert!(root.sanitize("/a/../../b").is_none());
    }

    #[test]
    fn test_sanitize_drops_query_and_decodes() {
        let root = DirRoot::new("/srv/site");
        let path = root.sanitize("/img/logo%20new.png?v=2").unwrap();
        assert_eq!(path, PathBuf::from("/srv/site/img/logo new.png"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("logo.SVG")), "image/svg+xml");
        assert_eq!(
            content_type_for(Path::new("blob")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_resolve_directory_prefers_index() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("index.html"), "<h1>home</h1>")?;
        let root = DirRoot::new(dir.path());

        let asset = root.resolve("/").await?.unwrap();
        assert_eq!(asset.bytes, b"<h1>home</h1>");
        assert_eq!(asset.content_type, "text/html");
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_directory_without_index_lists_entries() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("words.json"), "[]")?;
        let root = DirRoot::new(dir.path());

        let asset = root.resolve("/").await?.unwrap();
        let listing = String::from_utf8_lossy(&asset.bytes).into_owned();
        assert!(listing.contains("words.json"));
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_missing_file_is_none() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = DirRoot::new(dir.path());
        assert!(root.resolve("/nope.html").await?.is_none());
        Ok(())
    }
}
