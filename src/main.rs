use std::{process, sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

use vetrina::{
    application::{
        admin::{
            careers::CareersService, categories::AdminCategoriesService, inbox::InboxService,
            products::AdminProductsService, statistics::AdminStatisticsService,
            testimonials::AdminTestimonialsService,
        },
        error::AppError,
        reads::CachedReads,
        repos::{
            ApplicationsRepo, CategoriesRepo, CategoriesWriteRepo, JobsRepo, JobsWriteRepo,
            MessagesRepo, ProductsRepo, ProductsWriteRepo, StatisticsRepo, StatisticsWriteRepo,
            TestimonialsRepo, TestimonialsWriteRepo,
        },
    },
    cache::{
        CacheConfig, PathCache, PathInvalidator, ResponseCacheState, Revalidator, TagInvalidator,
        TaggedStore,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AppState},
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let (state, cache) = build_application_context(repositories, &settings);

    serve_http(&settings, http::build_router(state, cache)).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let database_url = require_database_url(&settings)?;
    let pool = PostgresRepositories::connect(database_url, 1)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    info!(target = "vetrina::migrate", "migrations applied");
    Ok(())
}

fn require_database_url(settings: &config::Settings) -> Result<&str, AppError> {
    settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| AppError::from(InfraError::configuration("database url is not configured")))
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = require_database_url(settings)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_application_context(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> (AppState, ResponseCacheState) {
    let categories_repo: Arc<dyn CategoriesRepo> = repositories.clone();
    let categories_write_repo: Arc<dyn CategoriesWriteRepo> = repositories.clone();
    let products_repo: Arc<dyn ProductsRepo> = repositories.clone();
    let products_write_repo: Arc<dyn ProductsWriteRepo> = repositories.clone();
    let jobs_repo: Arc<dyn JobsRepo> = repositories.clone();
    let jobs_write_repo: Arc<dyn JobsWriteRepo> = repositories.clone();
    let testimonials_repo: Arc<dyn TestimonialsRepo> = repositories.clone();
    let testimonials_write_repo: Arc<dyn TestimonialsWriteRepo> = repositories.clone();
    let statistics_repo: Arc<dyn StatisticsRepo> = repositories.clone();
    let statistics_write_repo: Arc<dyn StatisticsWriteRepo> = repositories.clone();
    let messages_repo: Arc<dyn MessagesRepo> = repositories.clone();
    let applications_repo: Arc<dyn ApplicationsRepo> = repositories.clone();

    let cache_config = CacheConfig::from(&settings.cache);
    let store = Arc::new(TaggedStore::new());
    let admin_paths = Arc::new(PathCache::new(&cache_config));
    let public_paths = Arc::new(PathCache::new(&cache_config));

    let revalidator = Arc::new(Revalidator::new(
        store.clone() as Arc<dyn TagInvalidator>,
        admin_paths as Arc<dyn PathInvalidator>,
        public_paths.clone() as Arc<dyn PathInvalidator>,
    ));

    let reads = CachedReads::new(
        store,
        cache_config.enable_object_cache,
        categories_repo.clone(),
        products_repo.clone(),
        jobs_repo.clone(),
        testimonials_repo.clone(),
        statistics_repo.clone(),
    );

    let state = AppState {
        reads,
        products: AdminProductsService::new(
            products_repo.clone(),
            categories_repo.clone(),
            products_write_repo,
            revalidator.clone(),
        ),
        categories: AdminCategoriesService::new(
            categories_repo,
            products_repo,
            categories_write_repo,
            revalidator.clone(),
        ),
        careers: CareersService::new(
            jobs_repo,
            jobs_write_repo,
            applications_repo,
            revalidator.clone(),
        ),
        testimonials: AdminTestimonialsService::new(
            testimonials_repo,
            testimonials_write_repo,
            revalidator.clone(),
        ),
        statistics: AdminStatisticsService::new(
            statistics_repo,
            statistics_write_repo,
            revalidator.clone(),
        ),
        inbox: InboxService::new(messages_repo, revalidator),
        repos: (*repositories).clone(),
    };

    let cache = ResponseCacheState {
        config: cache_config,
        paths: public_paths,
    };

    (state, cache)
}

async fn serve_http(settings: &config::Settings, router: axum::Router) -> Result<(), AppError> {
    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "vetrina::http",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal(drain_deadline: Duration) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => warn!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!(deadline = ?drain_deadline, "shutdown signal received; draining connections");

    // Hard stop if draining outlives the configured deadline.
    tokio::spawn(async move {
        tokio::time::sleep(drain_deadline).await;
        warn!("graceful shutdown deadline exceeded; exiting");
        process::exit(0);
    });
}
