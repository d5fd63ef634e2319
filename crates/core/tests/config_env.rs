use gallery_core::config;

// Single test in its own binary: environment variables are process-wide.
#[test]
fn env_vars_override_file_and_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("gallery.toml");
    std::fs::write(&file, "[photos]\ndir = \"/from/file\"\n").unwrap();

    std::env::set_var("GALLERY_PHOTOS__DIR", "/from/env");
    std::env::set_var("GALLERY_SERVER__PORT", "6001");
    let cfg = config::load(Some(file.to_str().unwrap())).unwrap();
    std::env::remove_var("GALLERY_PHOTOS__DIR");
    std::env::remove_var("GALLERY_SERVER__PORT");

    assert_eq!(cfg.photos.dir, "/from/env");
    assert_eq!(cfg.server.port, 6001);
    assert_eq!(cfg.comments.path, "comments.json");
}
