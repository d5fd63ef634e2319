use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub photos: PhotoConfig,
    pub comments: CommentConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            photos: PhotoConfig {
                dir: "photos".to_string(),
            },
            comments: CommentConfig {
                path: "comments.json".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
        }
    }
}

/// Defaults, then `config/default` (or `path`), then `GALLERY_*` env vars.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let mut settings = config::Config::builder()
        .set_default("photos.dir", defaults.photos.dir)?
        .set_default("comments.path", defaults.comments.path)?
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("GALLERY")
            .prefix_separator("_")
            .separator("__"),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("gallery.toml");
        fs::write(&file, "[photos]\ndir = \"/srv/pictures\"\n").unwrap();

        let cfg = load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(cfg.photos.dir, "/srv/pictures");
        assert_eq!(cfg.comments.path, "comments.json");
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(load(Some(missing.to_str().unwrap())).is_err());
    }
}
