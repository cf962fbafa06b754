//! Optimistic reorder round trips: drag state machine against real
//! persistence (in-memory repositories behind the admin services).

mod support;

use std::sync::Arc;

use uuid::Uuid;

use support::InMemoryRepos;
use vetrina::application::admin::products::{AdminProductError, AdminProductsService};
use vetrina::application::repos::{ProductsRepo, RepoError};
use vetrina::cache::{CacheConfig, PathCache, PathInvalidator, Revalidator, TagInvalidator, TaggedStore};
use vetrina::domain::entities::ProductRecord;
use vetrina::sync::{DropOutcome, InflightTracker, ListSync, SyncState};

fn products_service(repos: &Arc<InMemoryRepos>) -> AdminProductsService {
    let config = CacheConfig::default();
    let revalidator = Arc::new(Revalidator::new(
        Arc::new(TaggedStore::new()) as Arc<dyn TagInvalidator>,
        Arc::new(PathCache::new(&config)) as Arc<dyn PathInvalidator>,
        Arc::new(PathCache::new(&config)) as Arc<dyn PathInvalidator>,
    ));
    AdminProductsService::new(repos.clone(), repos.clone(), repos.clone(), revalidator)
}

async fn category_rows(repos: &InMemoryRepos, category_id: Uuid) -> Vec<ProductRecord> {
    repos
        .list_products(Some(category_id), false)
        .await
        .expect("list products")
}

#[tokio::test]
async fn optimistic_reorder_round_trip() {
    let repos = Arc::new(InMemoryRepos::default());
    let service = products_service(&repos);
    let cat = repos.seed_category("alpha");
    repos.seed_product(cat.id, "first");
    repos.seed_product(cat.id, "second");
    repos.seed_product(cat.id, "third");

    let mut list = ListSync::seed(category_rows(&repos, cat.id).await);
    let ids = list.ordered_ids();

    // Move the last product to the front.
    assert!(list.begin_drag(ids[2]));
    let DropOutcome::Submit(submission) = list.drop_at(0) else {
        panic!("expected a submission");
    };
    assert_eq!(submission.partition, Some(cat.id));
    assert_eq!(submission.ordered_ids, vec![ids[2], ids[0], ids[1]]);
    assert_eq!(list.state(), SyncState::PersistingReorder);

    service
        .reorder(cat.id, &submission.ordered_ids)
        .await
        .expect("persist reorder");
    list.reorder_succeeded();

    // Server truth now matches the optimistic snapshot.
    let server = ListSync::seed(category_rows(&repos, cat.id).await);
    assert_eq!(server.ordered_ids(), list.ordered_ids());
    assert!(!list.needs_resync());
}

#[tokio::test]
async fn failed_reorder_resync_restores_server_truth() {
    let repos = Arc::new(InMemoryRepos::default());
    let service = products_service(&repos);
    let cat = repos.seed_category("alpha");
    repos.seed_product(cat.id, "first");
    repos.seed_product(cat.id, "second");

    let mut list = ListSync::seed(category_rows(&repos, cat.id).await);
    let server_ids = list.ordered_ids();

    assert!(list.begin_drag(server_ids[1]));
    let DropOutcome::Submit(submission) = list.drop_at(0) else {
        panic!("expected a submission");
    };

    repos.set_fail_writes(true);
    let result = service.reorder(cat.id, &submission.ordered_ids).await;
    assert!(result.is_err());
    repos.set_fail_writes(false);

    // The optimistic order stays on screen until resync.
    list.reorder_failed();
    assert!(list.needs_resync());
    assert_ne!(list.ordered_ids(), server_ids);

    list.resync(category_rows(&repos, cat.id).await);
    assert_eq!(list.ordered_ids(), server_ids);
    assert_eq!(list.state(), SyncState::Idle);
}

#[tokio::test]
async fn foreign_id_in_submission_is_an_integrity_error() {
    let repos = Arc::new(InMemoryRepos::default());
    let service = products_service(&repos);
    let cat_a = repos.seed_category("alpha");
    let cat_b = repos.seed_category("beta");
    let own = repos.seed_product(cat_a.id, "a-1");
    let foreign = repos.seed_product(cat_b.id, "b-1");

    let result = service.reorder(cat_a.id, &[foreign.id, own.id]).await;
    assert!(matches!(
        result,
        Err(AdminProductError::Repo(RepoError::Integrity { .. }))
    ));

    // The partial write never happened: both rows keep position 0.
    assert_eq!(category_rows(&repos, cat_a.id).await[0].sort_order, 0);
    assert_eq!(category_rows(&repos, cat_b.id).await[0].sort_order, 0);
}

#[tokio::test]
async fn stale_mutation_response_is_discarded() {
    let repos = Arc::new(InMemoryRepos::default());
    let cat = repos.seed_category("alpha");
    let row = repos.seed_product(cat.id, "widget");

    let mut list = ListSync::seed(category_rows(&repos, cat.id).await);
    let mut inflight = InflightTracker::new();

    // Two rapid edits to the same row; the first response arrives last.
    let first = inflight.begin_mutation(row.id);
    let second = inflight.begin_mutation(row.id);

    let mut fresh = row.clone();
    fresh.name = "Widget v2".to_string();
    assert!(inflight.complete_mutation(second));
    list.merge(fresh);

    let mut stale = row.clone();
    stale.name = "Widget v1".to_string();
    if inflight.complete_mutation(first) {
        list.merge(stale);
    }

    assert_eq!(list.items()[0].name, "Widget v2");
    assert!(!inflight.is_in_flight(row.id));
}
