use crate::error::Result;
pub use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// File system friendly name for a page url, e.g.
/// `https://www.vrt.be/vrtnws/nl/a/` becomes `www.vrt.be_vrtnws_nl_a`.
pub fn slug_for_url(url: &str) -> String {
    let raw = match Url::parse(url) {
        Ok(parsed) => {
            let mut parts = vec![parsed.host_str().unwrap_or("page").to_string()];
            if let Some(segments) = parsed.path_segments() {
                parts.extend(segments.filter(|s| !s.is_empty()).map(str::to_string));
            }
            parts.join("_")
        }
        Err(_) => url.to_string(),
    };

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

pub fn save_html(dir: impl AsRef<Path>, url: &str, content: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_directory(dir)?;

    let path = dir.join(format!("{}.html", slug_for_url(url)));
    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;

    log_info!("[utils] Saved HTML content to {:?}", path);
    Ok(path)
}

/// All `*.html` files directly under `dir`, sorted by path.
pub fn read_html_files(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, String)>> {
    let dir = dir.as_ref();
    ensure_directory(dir)?;

    let pattern = format!(
        "{}/*.html",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let paths = glob::glob(&pattern).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(glob::GlobError::into_error)?;
        let content = fs::read_to_string(&path)?;
        files.push((path, content));
    }

    files.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(files)
}

pub fn save_json(data: &impl serde::Serialize, path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let json_string = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}
