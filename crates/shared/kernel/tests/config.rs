use rhub_domain::config::ApiConfig;
use rhub_kernel::config::load_config;
use std::io::Write;

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg: ApiConfig = load_config(Some("/nonexistent/server")).expect("defaults");
    assert_eq!(cfg.server.port, 4710);
}

#[test]
fn file_settings_are_applied() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(file, "[server]\nport = 9040").expect("write config");

    let cfg: ApiConfig = load_config(Some(path.with_extension(""))).expect("load");
    assert_eq!(cfg.server.port, 9040);
}
