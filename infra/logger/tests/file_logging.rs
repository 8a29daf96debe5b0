use rhub_logger::{LevelFilter, Logger, Rotation};

#[test]
fn file_logging_creates_a_log_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    let guard = Logger::builder()
        .name("file-test")
        .console(false)
        .level(LevelFilter::INFO)
        .directory(dir.path())
        .rotation(Rotation::NEVER)
        .max_files(2)
        .init()
        .expect("logger init");

    tracing::info!("hello from the file logger");
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
    assert!(!entries.is_empty(), "expected a log file in the temp directory");
}
