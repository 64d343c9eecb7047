use anyhow::Result;
use fs_err as fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `markdown` to `path` through a sibling temp file so readers never
/// see a half-written document. Returns the number of bytes written.
pub fn write_document(path: &Path, markdown: &str) -> Result<u64> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(markdown.as_bytes())?;
    if !markdown.ends_with('\n') {
        tmp.write_all(b"\n")?;
    }
    tmp.flush()?;
    let file = tmp.persist(path)?;
    Ok(file.metadata()?.len())
}
