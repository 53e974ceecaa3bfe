use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Static asset loader rooted at a fixed public directory.
///
/// Only the server's own hardcoded logical file names are ever passed in,
/// never raw request paths; the component check is belt-and-braces against
/// traversal all the same.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    fn map_path(&self, name: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(name.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html; charset=utf-8",
            "css" => "text/css; charset=utf-8",
            "js" => "application/javascript; charset=utf-8",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "text/plain; charset=utf-8",
        }
    }

    /// Read a file fully into memory and pair it with its content type.
    ///
    /// A missing file surfaces as `ErrorKind::NotFound` so the caller can
    /// answer 404; any other I/O failure is passed through for a 500.
    pub fn load(&self, name: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}
