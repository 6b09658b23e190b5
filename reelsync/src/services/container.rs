//! Service container for dependency injection.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use arr_api::{RadarrClient, SonarrClient};
use jellyfin_api::JellyfinClient;
use tmdb_api::TmdbClient;
use trakt_api::TraktClient;

use crate::acquisition::{
    AcquisitionDispatcher, RadarrManager, ResolvedArrSettings, SonarrManager, TagCache,
};
use crate::catalog::{ProviderRegistry, TmdbProvider, TraktProvider};
use crate::collection::{CollectionBuilder, Reconciler};
use crate::config::AppConfig;
use crate::domain::ProviderKind;
use crate::library::{JellyfinLibrary, LibraryService};
use crate::notification::{NotificationService, Notifier};
use crate::runner::{CollectionPipeline, Runner};
use crate::scheduler::Scheduler;
use crate::utils::http_client::build_client;
use crate::{Error, Result};

const DEFAULT_MOVIE_ROOT: &str = "/movies";
const DEFAULT_SERIES_ROOT: &str = "/tv";

/// Service container holding all application services.
pub struct ServiceContainer {
    pub config: AppConfig,
    pub library: Arc<dyn LibraryService>,
    pub notifications: Arc<NotificationService>,
    pub runner: Arc<Runner>,
    cancellation_token: CancellationToken,
}

impl ServiceContainer {
    /// Build every service. Acquisition managers whose server cannot be
    /// reached are disabled with a warning rather than failing startup.
    pub async fn initialize(config: AppConfig, dry_run: bool) -> Result<Self> {
        let dry_run = dry_run || config.runner.dry_run;
        let http = build_client(Duration::from_secs(config.runner.http_timeout_secs))?;
        let fetches = config.runner.max_concurrent_fetches;

        let tmdb = TmdbClient::new(http.clone(), &config.tmdb.api_key)
            .with_language(config.tmdb.language.clone())
            .with_region(config.tmdb.region.clone());
        let mut registry = ProviderRegistry::new().with(
            ProviderKind::Tmdb,
            Arc::new(TmdbProvider::new(tmdb, fetches)),
        );
        if let Some(trakt) = &config.trakt {
            let client = TraktClient::new(
                http.clone(),
                &trakt.client_id,
                trakt.access_token.as_deref(),
            )
            .map_err(|e| Error::config(format!("Invalid Trakt settings: {}", e)))?;
            registry.register(ProviderKind::Trakt, Arc::new(TraktProvider::new(client)));
        }
        let registry = Arc::new(registry);

        let library: Arc<dyn LibraryService> = Arc::new(JellyfinLibrary::new(JellyfinClient::new(
            http.clone(),
            &config.jellyfin.url,
            &config.jellyfin.api_key,
        )));

        let notifications = Arc::new(NotificationService::with_config(&config.notifications)?);
        let notifier: Arc<dyn Notifier> = notifications.clone();

        let mut dispatcher = AcquisitionDispatcher::new(notifier.clone());
        if let Some(settings) = &config.radarr {
            let client = RadarrClient::new(http.clone(), &settings.url, &settings.api_key);
            match ResolvedArrSettings::resolve(&client, settings, DEFAULT_MOVIE_ROOT).await {
                Ok(resolved) => {
                    dispatcher = dispatcher.with_manager(Arc::new(RadarrManager::new(
                        client,
                        resolved,
                        TagCache::new(),
                    )));
                }
                Err(e) => warn!(error = %e, "Radarr disabled"),
            }
        }
        if let Some(settings) = &config.sonarr {
            let client = SonarrClient::new(http.clone(), &settings.url, &settings.api_key);
            match ResolvedArrSettings::resolve(&client, settings, DEFAULT_SERIES_ROOT).await {
                Ok(resolved) => {
                    dispatcher = dispatcher.with_manager(Arc::new(SonarrManager::new(
                        client,
                        resolved,
                        TagCache::new(),
                    )));
                }
                Err(e) => warn!(error = %e, "Sonarr disabled"),
            }
        }

        let pipeline = CollectionPipeline::new(
            CollectionBuilder::with_concurrency(registry, library.clone(), fetches),
            Reconciler::new(library.clone()),
            dispatcher,
        )
        .with_dry_run(dry_run);
        let runner = Runner::new(config.libraries.clone(), library.clone(), pipeline, notifier)
            .with_max_concurrent_collections(config.runner.max_concurrent_collections);

        info!(
            dry_run,
            libraries = config.libraries.len(),
            trakt = config.trakt.is_some(),
            "Services initialized"
        );

        Ok(Self {
            config,
            library,
            notifications,
            runner: Arc::new(runner),
            cancellation_token: CancellationToken::new(),
        })
    }

    pub fn scheduler(&self) -> Result<Scheduler> {
        Ok(Scheduler::new(
            self.runner.clone(),
            self.config.scheduler.schedule()?,
            self.cancellation_token.clone(),
        ))
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn shutdown(&self) {
        info!("Shutting down");
        self.cancellation_token.cancel();
    }
}
