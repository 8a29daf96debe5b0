use rhub_logger::{LevelFilter, Logger};

#[test]
fn console_only_init_succeeds_once() {
    let guard = Logger::builder().name("console-test").level(LevelFilter::DEBUG).init();
    assert!(guard.is_ok());

    tracing::info!("console logging works");
}
