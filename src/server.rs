use crate::cli::ServeArgs;
use tracing::info;
use user_management_mock::config::AppConfig;
use user_management_mock::emails::{email_router, ALLOWED_DOMAINS};
use user_management_mock::error::AppError;
use user_management_mock::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let app = email_router();

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, allowed_domains = ?ALLOWED_DOMAINS, "user management mock ready");

    axum::serve(listener, app).await?;
    Ok(())
}
