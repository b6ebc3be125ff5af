use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use commerce_rs::{init_observability, server, Config, Metrics, ServiceKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::for_service(ServiceKind::Product).context("loading configuration")?;
    init_observability(&config.observability)?;

    info!(
        "Starting {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let metrics = Arc::new(Metrics::new()?);
    let app = server::product_app(&config, metrics)
        .await
        .context("building product service")?;

    server::serve(app, &config.server).await?;
    Ok(())
}
