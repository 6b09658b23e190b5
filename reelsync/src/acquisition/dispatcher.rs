use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AcquisitionManager, AcquisitionReport};
use crate::domain::{Collection, CollectionItem, MediaKind};
use crate::notification::{MediaRequest, Notifier};

/// Hands titles missing from the library to the manager for their kind.
///
/// Acquisition is best-effort: failures are counted and logged, never
/// returned to the caller.
pub struct AcquisitionDispatcher {
    managers: HashMap<MediaKind, Arc<dyn AcquisitionManager>>,
    notifier: Arc<dyn Notifier>,
}

impl AcquisitionDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            managers: HashMap::new(),
            notifier,
        }
    }

    pub fn with_manager(mut self, manager: Arc<dyn AcquisitionManager>) -> Self {
        self.managers.insert(manager.kind(), manager);
        self
    }

    pub async fn dispatch(&self, collection: &Collection) -> AcquisitionReport {
        let mut report = AcquisitionReport::default();
        let tags: Vec<String> = collection.definition.tag.iter().cloned().collect();
        for item in collection.missing_items() {
            self.request(collection, item, &tags, &mut report).await;
        }

        if report != AcquisitionReport::default() {
            info!(
                collection = %collection.name(),
                requested = report.requested,
                already_present = report.already_present,
                skipped = report.skipped,
                failed = report.failed,
                "Acquisition finished"
            );
        }
        report
    }

    async fn request(
        &self,
        collection: &Collection,
        item: &CollectionItem,
        tags: &[String],
        report: &mut AcquisitionReport,
    ) {
        let media = &item.media;
        let Some(manager) = self.managers.get(&media.kind) else {
            report.skipped += 1;
            return;
        };
        let Some(key) = manager.lookup_key(&media.ids) else {
            debug!(title = %media.display_title(), manager = manager.name(), "No usable id, skipping");
            report.skipped += 1;
            return;
        };

        match manager.exists(&key).await {
            Ok(true) => {
                report.already_present += 1;
                return;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(title = %media.display_title(), error = %e, "Acquisition lookup failed");
                report.failed += 1;
                return;
            }
        }

        match manager.add(&key, tags).await {
            Ok(Some(record)) => {
                report.requested += 1;
                self.notifier
                    .send_media_requested(&MediaRequest {
                        title: record.title,
                        year: record.year.or(media.year),
                        kind: media.kind,
                        manager: manager.name().to_string(),
                        collection: collection.name().to_string(),
                    })
                    .await;
            }
            Ok(None) => {
                warn!(title = %media.display_title(), %key, manager = manager.name(), "Title not found by manager");
                report.skipped += 1;
            }
            Err(e) => {
                warn!(title = %media.display_title(), error = %e, "Acquisition request failed");
                report.failed += 1;
            }
        }
    }
}
