//! Lists the image files sitting directly in the photo directory.

use std::path::Path;
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

/// Lower-cased extensions, dot included, that count as photos.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

#[derive(Debug, Clone)]
pub struct ScannedPhoto {
    pub name: String,
    pub modified: SystemTime,
}

/// Returns the photos in `dir` in directory enumeration order.
///
/// A missing directory yields no photos. Entries that vanish or cannot be
/// stat'ed mid-scan are skipped; failing to read `dir` itself is an error.
pub fn scan_photos(dir: &Path) -> Result<Vec<ScannedPhoto>, walkdir::Error> {
    let mut photos = Vec::new();
    if !dir.exists() {
        debug!("photo directory {:?} does not exist", dir);
        return Ok(photos);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e),
            Err(e) => {
                debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !has_allowed_extension(name) {
            continue;
        }
        let modified = match entry.metadata().map(|m| m.modified()) {
            Ok(Ok(t)) => t,
            Ok(Err(e)) => {
                debug!("skipping {:?}: {}", entry.path(), e);
                continue;
            }
            Err(e) => {
                debug!("skipping {:?}: {}", entry.path(), e);
                continue;
            }
        };
        photos.push(ScannedPhoto {
            name: name.to_string(),
            modified,
        });
    }
    Ok(photos)
}

pub fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_allowed_extension("a.JPG"));
        assert!(has_allowed_extension("b.Jpeg"));
        assert!(has_allowed_extension("c.png"));
        assert!(has_allowed_extension("d.gif"));
        assert!(!has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("jpg"));
        assert!(!has_allowed_extension(".jpg"));
        assert!(!has_allowed_extension("archive.jpg.zip"));
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let photos = scan_photos(&temp.path().join("absent")).unwrap();
        assert!(photos.is_empty());
    }

    #[test]
    fn skips_directories_and_other_files() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("album.jpg")).unwrap();
        std::fs::write(temp.path().join("album.jpg").join("inner.jpg"), b"x").unwrap();
        std::fs::write(temp.path().join("readme.txt"), b"x").unwrap();
        std::fs::write(temp.path().join("cat.png"), b"x").unwrap();

        let photos = scan_photos(temp.path()).unwrap();
        let names: Vec<&str> = photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cat.png"]);
    }
}
