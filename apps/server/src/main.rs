use anyhow::Context;
use rhub::domain::config::ApiConfig;
use rhub::kernel::config::load_config;
use rhub_logger::Logger;
use rhub_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let mut logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).env_filter(cfg.logging.level.clone());
    if let Some(directory) = &cfg.logging.directory {
        logger = logger.directory(directory);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
