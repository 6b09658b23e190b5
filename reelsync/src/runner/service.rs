use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::stats::RunStats;
use crate::acquisition::{AcquisitionDispatcher, AcquisitionReport};
use crate::collection::{CollectionBuilder, Reconciler};
use crate::domain::{CollectionDefinition, LibraryDefinition, RunTrigger, SyncReport};
use crate::library::{LibraryInfo, LibraryService, LibraryTarget};
use crate::notification::Notifier;
use crate::{Error, Result};

/// What to process in one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Library names to process; empty means all.
    pub libraries: Vec<String>,
    /// Collection names to process; empty means all.
    pub collections: Vec<String>,
    pub trigger: RunTrigger,
    /// Reference date for the schedule gate.
    pub today: NaiveDate,
}

impl RunRequest {
    pub fn new(trigger: RunTrigger, today: NaiveDate) -> Self {
        Self {
            libraries: Vec::new(),
            collections: Vec::new(),
            trigger,
            today,
        }
    }

    pub fn with_libraries(mut self, libraries: Vec<String>) -> Self {
        self.libraries = libraries;
        self
    }

    pub fn with_collections(mut self, collections: Vec<String>) -> Self {
        self.collections = collections;
        self
    }

    fn wants_library(&self, name: &str) -> bool {
        self.libraries.is_empty() || self.libraries.iter().any(|l| l == name)
    }

    fn wants_collection(&self, name: &str) -> bool {
        self.collections.is_empty() || self.collections.iter().any(|c| c == name)
    }
}

/// Build, sync and acquire for a single collection.
///
/// Dry-run is decided here once: a dry run builds the collection and stops
/// before any library write or acquisition request.
pub struct CollectionPipeline {
    builder: CollectionBuilder,
    reconciler: Reconciler,
    dispatcher: AcquisitionDispatcher,
    dry_run: bool,
}

/// Outcome of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionOutcome {
    pub report: SyncReport,
    pub acquisition: AcquisitionReport,
}

impl CollectionPipeline {
    pub fn new(builder: CollectionBuilder, reconciler: Reconciler, dispatcher: AcquisitionDispatcher) -> Self {
        Self {
            builder,
            reconciler,
            dispatcher,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn process(
        &self,
        definition: &CollectionDefinition,
        target: &LibraryTarget,
    ) -> Result<CollectionOutcome> {
        let collection = self.builder.build(definition, target).await?;
        if self.dry_run {
            info!(
                collection = %collection.name(),
                target = collection.target_ids().len(),
                missing = collection.missing(),
                "Dry run, skipping sync and acquisition"
            );
            return Ok(CollectionOutcome::default());
        }

        let report = self.reconciler.sync(&collection).await?;
        let acquisition = self.dispatcher.dispatch(&collection).await;
        Ok(CollectionOutcome {
            report,
            acquisition,
        })
    }
}

pub struct Runner {
    libraries: Vec<LibraryDefinition>,
    library: Arc<dyn LibraryService>,
    pipeline: Arc<CollectionPipeline>,
    notifier: Arc<dyn Notifier>,
    max_concurrent_collections: usize,
}

impl Runner {
    pub fn new(
        libraries: Vec<LibraryDefinition>,
        library: Arc<dyn LibraryService>,
        pipeline: CollectionPipeline,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            libraries,
            library,
            pipeline: Arc::new(pipeline),
            notifier,
            max_concurrent_collections: 1,
        }
    }

    pub fn with_max_concurrent_collections(mut self, max: usize) -> Self {
        self.max_concurrent_collections = max.max(1);
        self
    }

    /// Run every selected collection. Always completes with a summary;
    /// per-collection failures are counted in `errors`.
    pub async fn run(&self, request: &RunRequest) -> RunStats {
        let started = Instant::now();
        let mut stats = RunStats::default();

        let selected: Vec<&LibraryDefinition> = self
            .libraries
            .iter()
            .filter(|l| request.wants_library(&l.name))
            .collect();
        let names: Vec<String> = selected.iter().map(|l| l.name.clone()).collect();

        info!(
            trigger = %request.trigger,
            libraries = selected.len(),
            dry_run = self.pipeline.is_dry_run(),
            "Starting collection update run"
        );
        self.notifier.send_run_start(&names, request.trigger).await;

        match self.library.list_libraries().await {
            Ok(available) => {
                for definition in selected {
                    match resolve_library(definition, &available) {
                        Some(target) => {
                            let library_stats = self.process_library(definition, &target, request).await;
                            stats.merge(&library_stats);
                        }
                        None => {
                            warn!(library = %definition.name, "{}", Error::LibraryResolution(definition.name.clone()));
                            stats.record_error();
                        }
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to list libraries");
                for _ in &selected {
                    stats.record_error();
                }
                self.notifier
                    .send_error("Library Error", &e.to_string())
                    .await;
            }
        }

        stats.duration = started.elapsed();
        self.notifier.send_run_end(&stats).await;

        info!(
            duration = ?stats.duration,
            collections = stats.collections_updated,
            added = stats.items_added,
            removed = stats.items_removed,
            errors = stats.errors,
            "Run completed"
        );
        stats
    }

    async fn process_library(
        &self,
        definition: &LibraryDefinition,
        target: &LibraryTarget,
        request: &RunRequest,
    ) -> RunStats {
        info!(library = %target.name, kind = %target.kind, "Processing library");

        let due: Vec<&CollectionDefinition> = definition
            .collections
            .iter()
            .filter(|c| request.wants_collection(&c.name))
            .filter(|c| {
                let due = c.schedule.is_due(request.trigger, request.today);
                if !due {
                    debug!(collection = %c.name, schedule = %c.schedule, "Not scheduled for today, skipping");
                }
                due
            })
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_collections));
        let mut tasks = JoinSet::new();
        let mut task_index = HashMap::new();

        for (index, collection) in due.iter().enumerate() {
            // Permits are taken in declaration order so collections start in order.
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(error = %e, "Collection semaphore closed");
                    break;
                }
            };
            let pipeline = self.pipeline.clone();
            let collection = (*collection).clone();
            let target = target.clone();
            let handle = tasks.spawn(async move {
                let _permit = permit;
                pipeline.process(&collection, &target).await
            });
            task_index.insert(handle.id(), index);
        }

        let mut outcomes: Vec<Option<Result<CollectionOutcome>>> =
            due.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    if let Some(&index) = task_index.get(&id) {
                        outcomes[index] = Some(outcome);
                    }
                }
                Err(e) => {
                    if let Some(&index) = task_index.get(&e.id()) {
                        outcomes[index] = Some(Err(Error::Other(format!("collection task failed: {}", e))));
                    }
                }
            }
        }

        let mut stats = RunStats::default();
        for (collection, outcome) in due.iter().zip(outcomes) {
            match outcome {
                Some(Ok(outcome)) => {
                    let (added, removed) = outcome.report.counts();
                    stats.record_sync(added, removed);
                    debug!(
                        collection = %collection.name,
                        requested = outcome.acquisition.requested,
                        "Collection processed"
                    );
                    if outcome.report.has_changes() {
                        let added: Vec<String> =
                            outcome.report.added.iter().map(|m| m.title.clone()).collect();
                        let removed: Vec<String> =
                            outcome.report.removed.iter().map(|m| m.title.clone()).collect();
                        self.notifier
                            .send_collection_change(&collection.name, &target.name, &added, &removed)
                            .await;
                    }
                }
                Some(Err(e)) => {
                    error!(collection = %collection.name, error = %e, "Error processing collection");
                    stats.record_error();
                    self.notifier
                        .send_error(&format!("Collection Error: {}", collection.name), &e.to_string())
                        .await;
                }
                None => {
                    error!(collection = %collection.name, "Collection was not processed");
                    stats.record_error();
                }
            }
        }
        stats
    }
}

/// Match a configured library to the server's list by name.
fn resolve_library(definition: &LibraryDefinition, available: &[LibraryInfo]) -> Option<LibraryTarget> {
    available
        .iter()
        .find(|l| l.name == definition.name)
        .or_else(|| {
            available
                .iter()
                .find(|l| l.name.eq_ignore_ascii_case(&definition.name))
        })
        .map(|l| LibraryTarget {
            name: definition.name.clone(),
            id: l.id.clone(),
            kind: definition.media_kind(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(name: &str) -> LibraryDefinition {
        LibraryDefinition {
            name: name.to_string(),
            kind: None,
            collections: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_library_exact_then_case_insensitive() {
        let available = vec![
            LibraryInfo {
                name: "films".to_string(),
                id: "1".to_string(),
            },
            LibraryInfo {
                name: "Films".to_string(),
                id: "2".to_string(),
            },
            LibraryInfo {
                name: "Séries".to_string(),
                id: "3".to_string(),
            },
        ];
        assert_eq!(resolve_library(&library("Films"), &available).map(|t| t.id), Some("2".to_string()));
        let series = resolve_library(&library("séries"), &available).unwrap();
        assert_eq!(series.id, "3");
        assert_eq!(series.kind, crate::domain::MediaKind::Series);
        assert!(resolve_library(&library("Music"), &available).is_none());
    }

    #[test]
    fn test_request_filters() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let request = RunRequest::new(RunTrigger::Manual, today)
            .with_libraries(vec!["Films".to_string()]);
        assert!(request.wants_library("Films"));
        assert!(!request.wants_library("Séries"));
        assert!(request.wants_collection("anything"));
    }
}
