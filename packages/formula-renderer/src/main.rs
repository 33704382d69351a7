use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formula_core::SharedHistory;

mod compiler;
mod config;
mod handler;
mod host;
mod render;

use compiler::{FormulaCompiler, TypstCli};
use config::Config;
use host::ImageHostClient;
use render::RenderSettings;

/// リクエスト間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub compiler: Arc<dyn FormulaCompiler>,
    pub history: Arc<SharedHistory>,
    pub image_host: Option<ImageHostClient>,
    pub settings: RenderSettings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formula_renderer=info,formula_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    tracing::info!(
        typst = %config.typst_bin,
        ppi = config.render_ppi,
        max_dimension = config.normalizer.max_dimension,
        max_tracked_users = config.max_tracked_users,
        image_host = config.image_host.is_some(),
        "starting formula renderer v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState {
        compiler: Arc::new(TypstCli::new(&config.typst_bin, config.render_ppi)),
        history: Arc::new(SharedHistory::new(config.max_tracked_users)),
        image_host: config.image_host.as_ref().map(ImageHostClient::new),
        settings: RenderSettings {
            normalizer: config.normalizer,
            output_format: config.output_format,
            timeout: config.render_timeout,
        },
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");

    axum::serve(listener, handler::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
