use async_trait::async_trait;
use folio::client::mock::MockFetcher;
use folio::client::{FetchCause, FetchError, ResourceFetcher};
use folio::coordinator::{load_portfolio, CoordinatorError, LoadCoordinator, LoadProgress, SlotStatus};
use folio::model::{Profile, Project, Technology};
use folio::resource::{ResourceKind, ResourcePayload};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn payload_for(kind: ResourceKind) -> ResourcePayload {
    match kind {
        ResourceKind::Profile => ResourcePayload::Profile(Profile::new("Ada", "Engineer", "Builds things")),
        ResourceKind::Projects => ResourcePayload::Projects(vec![Project::new("folio", "This site")]),
        ResourceKind::Experiences => ResourcePayload::Experiences(vec![]),
        ResourceKind::Education => ResourcePayload::Education(vec![]),
        ResourceKind::Technologies => ResourcePayload::Technologies(vec![Technology::new("Rust", 1)]),
    }
}

fn all_ok(mock: &MockFetcher, delay: Duration) {
    for kind in ResourceKind::ALL {
        mock.expect(kind).after(delay).return_ok(payload_for(kind));
    }
}

/// Readiness depends only on how many kinds settled, never on which succeeded.
#[tokio::test]
async fn test_every_failure_subset_reaches_ready() {
    for mask in 0u32..32 {
        let mock = MockFetcher::new();
        for (bit, kind) in ResourceKind::ALL.into_iter().enumerate() {
            if mask & (1 << bit) != 0 {
                mock.expect(kind).return_err(FetchCause::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            } else {
                mock.expect(kind).return_ok(payload_for(kind));
            }
        }

        let handle = LoadCoordinator::start(Arc::new(mock.clone()));
        let data = handle.wait_ready().await.unwrap();
        assert!(handle.is_ready(), "mask {mask:05b} not ready");
        assert_eq!(handle.progress().fraction(), 1.0);

        let snapshot = handle.snapshot().await.unwrap();
        for (bit, kind) in ResourceKind::ALL.into_iter().enumerate() {
            let failed = mask & (1 << bit) != 0;
            let status = snapshot.status(kind).unwrap();
            assert_eq!(matches!(status, SlotStatus::Failed { .. }), failed, "{kind} in mask {mask:05b}");
            assert_eq!(data.has(kind), !failed && kind != ResourceKind::Experiences && kind != ResourceKind::Education);
        }

        handle.teardown().await.unwrap();
        mock.verify();
    }
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_monotonic_and_ready_flips_once() {
    let mock = MockFetcher::new();
    for (i, kind) in ResourceKind::ALL.into_iter().enumerate() {
        mock.expect(kind)
            .after(Duration::from_millis(10 * (i as u64 + 1)))
            .return_ok(payload_for(kind));
    }

    let (coordinator, handle) = LoadCoordinator::new(8);
    let mut progress = handle.subscribe();
    assert_eq!(handle.progress(), LoadProgress::new(5));
    assert!(!handle.is_ready());

    let observer = tokio::spawn(async move {
        let mut seen = vec![*progress.borrow_and_update()];
        while progress.changed().await.is_ok() {
            seen.push(*progress.borrow_and_update());
        }
        seen
    });

    tokio::spawn(coordinator.run(Arc::new(mock.clone())));
    handle.wait_ready().await.unwrap();
    handle.teardown().await.unwrap();
    let seen = observer.await.unwrap();

    assert!(seen.windows(2).all(|w| w[0].settled <= w[1].settled));
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(&p.fraction())));
    assert_eq!(seen.last().unwrap().fraction(), 1.0);

    let flips = seen.windows(2).filter(|w| !w[0].is_ready() && w[1].is_ready()).count();
    assert_eq!(flips, 1);
    assert_eq!(seen.iter().filter(|p| p.is_ready()).count(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_missing_profile_still_reaches_ready() {
    let mock = MockFetcher::new();
    mock.expect(ResourceKind::Profile).return_err(FetchCause::NotFound);
    for kind in ResourceKind::ALL.into_iter().filter(|k| !k.is_singleton()) {
        mock.expect(kind).return_ok(payload_for(kind));
    }

    let handle = LoadCoordinator::start(Arc::new(mock.clone()));
    let data = handle.wait_ready().await.unwrap();

    assert!(data.profile.is_none());
    assert_eq!(data.projects.len(), 1);
    assert_eq!(handle.progress().fraction(), 1.0);

    let snapshot = handle.snapshot().await.unwrap();
    assert!(matches!(
        snapshot.status(ResourceKind::Profile),
        Some(SlotStatus::Failed { .. })
    ));
    assert_eq!(snapshot.status(ResourceKind::Projects), Some(&SlotStatus::Resolved));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_fetches_start_together() {
    let mock = MockFetcher::new();
    all_ok(&mock, Duration::from_secs(1));

    let started = Instant::now();
    let data = load_portfolio(Arc::new(mock.clone())).await.unwrap();

    assert_eq!(mock.max_in_flight(), 5);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(data.profile.is_some());
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_timeout_settles_as_failed_and_counts() {
    let mock = MockFetcher::new();
    for kind in ResourceKind::ALL {
        if kind == ResourceKind::Education {
            mock.expect(kind)
                .after(Duration::from_secs(10))
                .return_err(FetchCause::Timeout);
        } else {
            mock.expect(kind).return_ok(payload_for(kind));
        }
    }

    let handle = LoadCoordinator::start(Arc::new(mock.clone()));
    let mut progress = handle.subscribe();
    progress.wait_for(|p| p.settled == 4).await.unwrap();
    assert!(!handle.is_ready());
    assert_eq!(handle.progress().percent(), 80);

    let started = Instant::now();
    handle.wait_ready().await.unwrap();
    assert!(started.elapsed() >= Duration::from_secs(9));

    let snapshot = handle.snapshot().await.unwrap();
    match snapshot.status(ResourceKind::Education) {
        Some(SlotStatus::Failed { cause }) => assert!(cause.contains("timed out"), "{cause}"),
        other => panic!("Expected failed education slot, got {other:?}"),
    }
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_late_result_after_teardown_is_discarded() {
    let mock = MockFetcher::new();
    for kind in ResourceKind::ALL {
        let delay = if kind == ResourceKind::Projects {
            Duration::from_secs(5)
        } else {
            Duration::ZERO
        };
        mock.expect(kind).after(delay).return_ok(payload_for(kind));
    }

    let handle = LoadCoordinator::start(Arc::new(mock.clone()));
    let observer = handle.clone();
    handle.subscribe().wait_for(|p| p.settled == 4).await.unwrap();

    handle.teardown().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(mock.completed(), 4);
    assert_eq!(observer.progress().settled, 4);
    assert!(!observer.is_ready());
    assert_eq!(observer.snapshot().await.unwrap_err(), CoordinatorError::ActorClosed);
    assert_eq!(observer.wait_ready().await.unwrap_err(), CoordinatorError::ActorClosed);
}

#[tokio::test]
async fn test_collections_keep_server_order() {
    let mut rust = Technology::new("Rust", 1);
    rust.id = 3;
    let mut go = Technology::new("Go", 2);
    go.id = 1;

    let mock = MockFetcher::new();
    for kind in ResourceKind::ALL {
        let payload = match kind {
            ResourceKind::Technologies => ResourcePayload::Technologies(vec![rust.clone(), go.clone()]),
            other => payload_for(other),
        };
        mock.expect(kind).return_ok(payload);
    }

    let data = load_portfolio(Arc::new(mock)).await.unwrap();
    let ids: Vec<i64> = data.technologies.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn test_mismatched_payload_settles_empty() {
    let mock = MockFetcher::new();
    for kind in ResourceKind::ALL {
        let payload = if kind == ResourceKind::Education {
            ResourcePayload::Experiences(vec![])
        } else {
            payload_for(kind)
        };
        mock.expect(kind).return_ok(payload);
    }

    let handle = LoadCoordinator::start(Arc::new(mock));
    handle.wait_ready().await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert!(matches!(
        snapshot.status(ResourceKind::Education),
        Some(SlotStatus::Failed { .. })
    ));
}

/// Fetcher whose technologies fetch panics.
struct PanickingFetcher;

#[async_trait]
impl ResourceFetcher for PanickingFetcher {
    async fn fetch_kind(&self, kind: ResourceKind) -> Result<ResourcePayload, FetchError> {
        if kind == ResourceKind::Technologies {
            panic!("fetch exploded");
        }
        Ok(payload_for(kind))
    }
}

#[tokio::test]
async fn test_panicking_fetch_still_settles() {
    let handle = LoadCoordinator::start(Arc::new(PanickingFetcher));
    let data = handle.wait_ready().await.unwrap();
    assert!(data.technologies.is_empty());
    assert!(data.profile.is_some());

    let snapshot = handle.snapshot().await.unwrap();
    assert!(matches!(
        snapshot.status(ResourceKind::Technologies),
        Some(SlotStatus::Failed { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_every_handle_stops_the_coordinator() {
    let mock = MockFetcher::new();
    for kind in ResourceKind::ALL {
        mock.expect(kind).hang();
    }

    let (coordinator, handle) = LoadCoordinator::new(8);
    let task = tokio::spawn(coordinator.run(Arc::new(mock.clone())));
    tokio::task::yield_now().await;
    drop(handle);

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("coordinator did not stop")
        .unwrap();
    assert_eq!(mock.completed(), 0);
}
