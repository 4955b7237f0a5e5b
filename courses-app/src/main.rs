use axum::Router;
use config::Config;
use courses_routes::state::CourseAppState;
use dotenv::dotenv;
use engine::app::{AppError, AppProperties, AppResult};
use error_stack::ResultExt;
use repositories::ConnectionDetails;
use repositories::mongo::courses::CourseRepo;
use tracing::{debug, error, info, instrument, warn};

mod config;

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("course service shutting down"),
        Err(e) => {
            error!("course service exited with error: {e:?}");
        }
    }
}

async fn try_main() -> AppResult<()> {
    engine::logging::init("COURSES_LOG");

    if let Err(e) = dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let config = Config::from_env()?;
    debug!("loaded config: {config:?}");

    let routes = build_routes(&config).await?;

    let properties = AppProperties {
        name: "course service",
        port: config.port,
    };

    engine::app::run(routes, properties).await
}

async fn build_routes(config: &Config) -> AppResult<Router> {
    let repo = build_repo(config).await?;

    debug!("building routes..");
    let state = if config.metrics_enabled {
        CourseAppState::new_with_metrics(repo).change_context(AppError)?
    } else {
        CourseAppState::new_without_metrics(repo)
    };

    Ok(courses_routes::routes::build(state)).inspect(|_| debug!("routes built"))
}

#[instrument(skip_all)]
async fn build_repo(config: &Config) -> AppResult<CourseRepo> {
    debug!("initializing mongodb repository");
    let repo = CourseRepo::init(
        ConnectionDetails::Url(config.database_url.clone()),
        config.db_name.clone(),
    )
    .await
    .change_context(AppError)?;

    match repo.ping().await {
        Ok(()) => info!("connected to database '{}'", repo.database_name()),
        Err(e) => warn!(
            "database '{}' is not reachable yet, requests will fail until it is: {e:?}",
            repo.database_name()
        ),
    }

    Ok(repo)
}
