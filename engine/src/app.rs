use axum::Router;
use axum::response::Response;
use error_stack::{Report, ResultExt};
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, warn};

/// How an app is exposed. The listener binds every interface on `port`.
#[derive(Debug, Clone)]
pub struct AppProperties {
    pub name: &'static str,
    pub port: u16,
}

impl AppProperties {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("the app exited with an error")]
pub struct AppError;

pub type AppResult<T> = Result<T, Report<AppError>>;

/// Serves `routes` until the process receives ctrl-c or SIGTERM.
pub async fn run(routes: Router, properties: AppProperties) -> AppResult<()> {
    let address = properties.address();
    let listener = TcpListener::bind(address)
        .await
        .change_context(AppError)
        .attach_with(|| format!("could not bind {} to {address}", properties.name))?;

    serve_until(listener, routes, properties.name, shutdown_signal()).await
}

/// Serves `routes` on `listener`, letting in-flight requests finish once `shutdown` resolves.
pub async fn serve_until<F>(
    listener: TcpListener,
    routes: Router,
    name: &'static str,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr().change_context(AppError)?;
    info!("{name} listening on {address}");

    axum::serve(listener, log_responses(routes))
        .with_graceful_shutdown(shutdown)
        .await
        .change_context(AppError)
        .attach_with(|| format!("{name} stopped serving on {address}"))?;

    info!("{name} stopped");
    Ok(())
}

fn log_responses(routes: Router) -> Router {
    routes.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http().on_response(
        |res: &Response, latency: Duration, _span: &Span| {
            info!("returned {} in {}ms", res.status(), latency.as_millis());
        },
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("ctrl-c handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
