//! Build, sync and acquisition against in-memory collaborators.

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::*;
use reelsync::acquisition::{AcquisitionDispatcher, AcquisitionReport};
use reelsync::catalog::ProviderRegistry;
use reelsync::collection::{CollectionBuilder, Reconciler};
use reelsync::domain::{CollectionMember, ExternalId, MediaKind, ProviderKind};
use reelsync::library::{LibraryService, LibraryTarget};
use reelsync::runner::{CollectionOutcome, CollectionPipeline};
use reelsync::notification::Notifier;

fn movies_target() -> LibraryTarget {
    LibraryTarget {
        name: "Films".to_string(),
        id: "lib-1".to_string(),
        kind: MediaKind::Movie,
    }
}

fn builder(registry: ProviderRegistry, library: Arc<dyn LibraryService>) -> CollectionBuilder {
    CollectionBuilder::with_concurrency(Arc::new(registry), library, 4)
}

#[tokio::test]
async fn overlapping_sources_keep_first_occurrence() {
    let tmdb = shared(FakeProvider::new(
        "TMDb",
        vec![movie("Dune", 438631), movie("Wicked", 402431)],
    ));
    let trakt = shared(FakeProvider::new(
        "Trakt",
        vec![movie("Wicked (Trakt)", 402431), movie("Gladiator II", 558449)],
    ));
    let registry = ProviderRegistry::new()
        .with(ProviderKind::Tmdb, tmdb.clone())
        .with(ProviderKind::Trakt, trakt.clone());
    let library = shared(FakeLibrary::new().with_item(402431, "j-wicked", "Wicked"));

    let definition = definition(
        "Trending",
        vec![popular(ProviderKind::Tmdb), popular(ProviderKind::Trakt)],
    );
    let collection = builder(registry, library)
        .build(&definition, &movies_target())
        .await
        .unwrap();

    let titles: Vec<&str> = collection
        .items
        .iter()
        .map(|i| i.media.title.as_str())
        .collect();
    assert_eq!(titles, ["Dune", "Wicked", "Gladiator II"]);
    assert_eq!(collection.total(), 3);
    assert_eq!(collection.matched(), 1);
    assert_eq!(collection.missing(), 2);
    assert_eq!(
        collection.target_ids().into_iter().collect::<Vec<_>>(),
        ["j-wicked"]
    );
}

#[tokio::test]
async fn unconfigured_provider_is_skipped() {
    let registry = ProviderRegistry::new()
        .with(ProviderKind::Tmdb, shared(FakeProvider::new("TMDb", vec![movie("Dune", 1)])));
    let library = shared(FakeLibrary::new());

    let definition = definition(
        "Mixed",
        vec![popular(ProviderKind::Trakt), popular(ProviderKind::Tmdb)],
    );
    let collection = builder(registry, library)
        .build(&definition, &movies_target())
        .await
        .unwrap();

    assert_eq!(collection.total(), 1);
}

#[tokio::test]
async fn failing_source_aborts_the_build() {
    let registry = ProviderRegistry::new()
        .with(ProviderKind::Tmdb, shared(FakeProvider::new("TMDb", vec![movie("Dune", 1)])))
        .with(ProviderKind::Trakt, shared(FakeProvider::failing("Trakt")));
    let library = shared(FakeLibrary::new());

    let definition = definition(
        "Broken",
        vec![popular(ProviderKind::Tmdb), popular(ProviderKind::Trakt)],
    );
    let err = builder(registry, library)
        .build(&definition, &movies_target())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Trakt"), "{err}");
}

#[tokio::test]
async fn filters_and_limit_apply_before_matching() {
    let mut old = movie("Old", 1);
    old.year = Some(1990);
    let mut new = movie("New", 2);
    new.year = Some(2024);
    let mut newer = movie("Newer", 3);
    newer.year = Some(2025);

    let registry = ProviderRegistry::new()
        .with(ProviderKind::Tmdb, shared(FakeProvider::new("TMDb", vec![old, new, newer])));
    let library = shared(FakeLibrary::new());

    let mut definition = definition("Recent", vec![popular(ProviderKind::Tmdb)]);
    definition.filters.year_gte = Some(2000);
    definition.limit = Some(1);

    let collection = builder(registry, library)
        .build(&definition, &movies_target())
        .await
        .unwrap();

    assert_eq!(collection.items.len(), 1);
    assert_eq!(collection.items[0].media.title, "New");
}

async fn build_with(library: &Arc<FakeLibrary>, items: Vec<reelsync::domain::MediaItem>) -> reelsync::domain::Collection {
    let registry = ProviderRegistry::new()
        .with(ProviderKind::Tmdb, shared(FakeProvider::new("TMDb", items)));
    let definition = definition("Trending", vec![popular(ProviderKind::Tmdb)]);
    builder(registry, library.clone())
        .build(&definition, &movies_target())
        .await
        .unwrap()
}

#[tokio::test]
async fn sync_adds_and_removes_against_existing_collection() {
    let library = shared(
        FakeLibrary::new()
            .with_item(2, "Y", "Movie Y")
            .with_item(3, "Z", "Movie Z")
            .with_collection("c-1", "Trending", &[("X", "Movie X"), ("Y", "Movie Y")]),
    );
    let collection = build_with(&library, vec![movie("Movie Y", 2), movie("Movie Z", 3)]).await;

    let report = Reconciler::new(library.clone())
        .sync(&collection)
        .await
        .unwrap();

    assert_eq!(report.counts(), (1, 1));
    assert_eq!(
        report.added,
        [CollectionMember {
            id: "Z".to_string(),
            title: "Movie Z".to_string()
        }]
    );
    assert_eq!(report.removed[0].title, "Movie X");
    assert_eq!(library.members_of("Trending"), ["Y", "Z"]);
    assert_eq!(
        *library.writes.lock(),
        [
            LibraryWrite::Add("c-1".to_string(), vec!["Z".to_string()]),
            LibraryWrite::Remove("c-1".to_string(), vec!["X".to_string()]),
            LibraryWrite::Metadata("c-1".to_string(), Default::default()),
        ]
    );
}

#[tokio::test]
async fn sync_creates_missing_collection() {
    let library = shared(FakeLibrary::new().with_item(1, "A", "Movie A"));
    let collection = build_with(&library, vec![movie("Movie A", 1)]).await;

    let report = Reconciler::new(library.clone())
        .sync(&collection)
        .await
        .unwrap();

    assert_eq!(report.counts(), (1, 0));
    assert_eq!(library.writes.lock()[0], LibraryWrite::Create("Trending".to_string()));
    assert_eq!(library.members_of("Trending"), ["A"]);
}

#[tokio::test]
async fn second_sync_is_a_no_op() {
    let library = shared(
        FakeLibrary::new()
            .with_item(1, "A", "Movie A")
            .with_item(2, "B", "Movie B"),
    );
    let collection = build_with(&library, vec![movie("Movie A", 1), movie("Movie B", 2)]).await;
    let reconciler = Reconciler::new(library.clone());

    reconciler.sync(&collection).await.unwrap();
    let second = reconciler.sync(&collection).await.unwrap();

    assert!(!second.has_changes());
    assert_eq!(library.members_of("Trending"), ["A", "B"]);
}

#[tokio::test]
async fn empty_target_clears_collection() {
    let library = shared(
        FakeLibrary::new().with_collection("c-1", "Trending", &[("X", "Movie X")]),
    );
    let collection = build_with(&library, Vec::new()).await;

    let report = Reconciler::new(library.clone())
        .sync(&collection)
        .await
        .unwrap();

    assert_eq!(report.counts(), (0, 1));
    assert!(library.members_of("Trending").is_empty());
}

#[tokio::test]
async fn dry_run_performs_no_writes() {
    let library = shared(
        FakeLibrary::new()
            .with_item(2, "Y", "Movie Y")
            .with_collection("c-1", "Trending", &[("X", "Movie X")]),
    );
    let registry = ProviderRegistry::new().with(
        ProviderKind::Tmdb,
        shared(FakeProvider::new("TMDb", vec![movie("Movie Y", 2), movie("Missing", 9)])),
    );
    let manager = shared(FakeManager::new(MediaKind::Movie));
    let notifier = shared(RecordingNotifier::default());
    let pipeline = CollectionPipeline::new(
        builder(registry, library.clone()),
        Reconciler::new(library.clone()),
        dispatcher(notifier.clone(), vec![manager.clone()]),
    )
    .with_dry_run(true);

    let outcome = pipeline
        .process(
            &definition("Trending", vec![popular(ProviderKind::Tmdb)]),
            &movies_target(),
        )
        .await
        .unwrap();

    assert!(pipeline.is_dry_run());
    assert_eq!(outcome, CollectionOutcome::default());
    assert_eq!(library.write_count(), 0);
    assert_eq!(library.members_of("Trending"), ["X"]);
    assert!(manager.added.lock().is_empty());
    assert!(notifier.sent.lock().is_empty());
}

#[tokio::test]
async fn pipeline_syncs_then_acquires() {
    let library = shared(
        FakeLibrary::new()
            .with_item(2, "Y", "Movie Y")
            .with_collection("c-1", "Trending", &[("X", "Movie X")]),
    );
    let registry = ProviderRegistry::new().with(
        ProviderKind::Tmdb,
        shared(FakeProvider::new("TMDb", vec![movie("Movie Y", 2), movie("Missing", 9)])),
    );
    let manager = shared(FakeManager::new(MediaKind::Movie));
    let notifier = shared(RecordingNotifier::default());
    let pipeline = CollectionPipeline::new(
        builder(registry, library.clone()),
        Reconciler::new(library.clone()),
        dispatcher(notifier.clone(), vec![manager.clone()]),
    );

    let outcome = pipeline
        .process(
            &definition("Trending", vec![popular(ProviderKind::Tmdb)]),
            &movies_target(),
        )
        .await
        .unwrap();

    assert!(!pipeline.is_dry_run());
    assert_eq!(outcome.report.counts(), (1, 1));
    assert_eq!(outcome.acquisition.requested, 1);
    assert_eq!(library.members_of("Trending"), ["Y"]);
    assert_eq!(manager.added.lock().len(), 1);
}

#[tokio::test]
async fn failed_write_is_attributed_to_collection() {
    let library = shared(
        FakeLibrary::new()
            .with_item(1, "A", "Movie A")
            .with_collection("c-1", "Trending", &[])
            .failing_writes_for("Trending"),
    );
    let collection = build_with(&library, vec![movie("Movie A", 1)]).await;

    let err = Reconciler::new(library.clone())
        .sync(&collection)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Trending"), "{err}");
}

fn dispatcher(notifier: Arc<RecordingNotifier>, managers: Vec<Arc<FakeManager>>) -> AcquisitionDispatcher {
    managers.into_iter().fold(
        AcquisitionDispatcher::new(notifier as Arc<dyn Notifier>),
        |d, m| d.with_manager(m),
    )
}

#[tokio::test]
async fn missing_titles_are_routed_by_kind() {
    let library = shared(FakeLibrary::new().with_item(1, "A", "Movie A"));
    let mut collection = build_with(
        &library,
        vec![movie("Movie A", 1), movie("Wanted", 2), movie("Owned", 3)],
    )
    .await;
    collection.definition.tag = Some("trending".to_string());

    let radarr = shared(FakeManager::new(MediaKind::Movie).with_existing(3));
    let notifier = shared(RecordingNotifier::default());

    let report = dispatcher(notifier.clone(), vec![radarr.clone()])
        .dispatch(&collection)
        .await;

    assert_eq!(
        report,
        AcquisitionReport {
            requested: 1,
            already_present: 1,
            skipped: 0,
            failed: 0,
        }
    );
    assert_eq!(
        *radarr.added.lock(),
        [(ExternalId::Tmdb(2), vec!["trending".to_string()])]
    );
    let sent = notifier.sent.lock();
    assert!(matches!(
        &sent[..],
        [Sent::MediaRequested(request)] if request.collection == "Trending" && request.manager == "Radarr"
    ));
}

#[rstest]
#[case::no_manager_for_kind(None, 0, 0, 1, 0)]
#[case::manager_fails(Some(FakeManager::new(MediaKind::Movie).failing()), 0, 0, 0, 1)]
#[case::manager_does_not_know_title(Some(FakeManager::new(MediaKind::Movie).with_unknown(2)), 0, 0, 1, 0)]
#[tokio::test]
async fn acquisition_outcomes_are_counted(
    #[case] manager: Option<FakeManager>,
    #[case] requested: usize,
    #[case] already_present: usize,
    #[case] skipped: usize,
    #[case] failed: usize,
) {
    let library = shared(FakeLibrary::new());
    let collection = build_with(&library, vec![movie("Wanted", 2)]).await;
    let notifier = shared(RecordingNotifier::default());

    let report = dispatcher(notifier.clone(), manager.into_iter().map(Arc::new).collect())
        .dispatch(&collection)
        .await;

    assert_eq!(
        report,
        AcquisitionReport {
            requested,
            already_present,
            skipped,
            failed,
        }
    );
    assert!(notifier.sent.lock().is_empty());
}

#[tokio::test]
async fn series_without_tvdb_id_is_skipped() {
    let library = shared(FakeLibrary::new());
    let registry = ProviderRegistry::new().with(
        ProviderKind::Tmdb,
        shared(FakeProvider::new(
            "TMDb",
            vec![series("Severance", 95396, Some(371980)), series("Unknown", 7, None)],
        )),
    );
    let target = LibraryTarget {
        name: "Séries".to_string(),
        id: "lib-2".to_string(),
        kind: MediaKind::Series,
    };
    let collection = builder(registry, library)
        .build(&definition("Shows", vec![popular(ProviderKind::Tmdb)]), &target)
        .await
        .unwrap();
    let sonarr = shared(FakeManager::new(MediaKind::Series));

    let report = dispatcher(shared(RecordingNotifier::default()), vec![sonarr.clone()])
        .dispatch(&collection)
        .await;

    assert_eq!(report.requested, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(sonarr.added.lock()[0].0, ExternalId::Tvdb(371980));
}
