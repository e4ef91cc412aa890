use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::error::SourceError;
use crate::products::{Product, Variant};
use crate::sources::CollectionSnapshot;

// -----------------------------------------------------------------------
// In-memory catalog
// -----------------------------------------------------------------------

#[derive(Default)]
struct FakeCatalog {
    sales: Vec<(String, u64)>,
    fail_sales: bool,
    collections: HashMap<String, CollectionSnapshot>,
    seasonal: HashMap<String, HashSet<String>>,
    reject_writes_for: HashSet<String>,
    writes: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCatalog {
    fn with_collection(mut self, id: &str, sort_order: &str, products: Vec<Product>) -> Self {
        self.collections.insert(
            id.to_owned(),
            CollectionSnapshot {
                title: format!("Title {id}"),
                sort_order: sort_order.to_owned(),
                products,
            },
        );
        self
    }

    fn with_sales(mut self, sales: &[(&str, u64)]) -> Self {
        self.sales = sales.iter().map(|(id, n)| ((*id).to_owned(), *n)).collect();
        self
    }

    fn writes(&self) -> Vec<(String, Vec<String>)> {
        self.writes.lock().unwrap().clone()
    }

    fn written(&self, collection_id: &str) -> Option<Vec<String>> {
        self.writes()
            .into_iter()
            .find(|(id, _)| id == collection_id)
            .map(|(_, ids)| ids)
    }
}

#[async_trait]
impl SalesFetcher for FakeCatalog {
    async fn fetch_sales(&self, _lookback_days: u32) -> Result<SalesIndex, SourceError> {
        if self.fail_sales {
            return Err(SourceError::DataFetch("orders query failed".to_owned()));
        }
        Ok(self.sales.iter().cloned().collect())
    }
}

#[async_trait]
impl CatalogFetcher for FakeCatalog {
    async fn fetch_collection(
        &self,
        collection_id: &str,
    ) -> Result<CollectionSnapshot, SourceError> {
        self.collections
            .get(collection_id)
            .cloned()
            .ok_or_else(|| SourceError::DataFetch(format!("collection not found: {collection_id}")))
    }
}

#[async_trait]
impl SeasonalSetFetcher for FakeCatalog {
    async fn fetch_product_ids(
        &self,
        collection_id: &str,
    ) -> Result<HashSet<String>, SourceError> {
        Ok(self.seasonal.get(collection_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ReorderSink for FakeCatalog {
    async fn apply(&self, collection_id: &str, ordered_ids: &[String]) -> Result<(), SourceError> {
        if self.reject_writes_for.contains(collection_id) {
            return Err(SourceError::Mutation("Position is invalid".to_owned()));
        }
        self.writes
            .lock()
            .unwrap()
            .push((collection_id.to_owned(), ordered_ids.to_vec()));
        Ok(())
    }
}

fn product(id: &str, tags: &[&str]) -> Product {
    Product {
        id: id.to_owned(),
        title: format!("Hoodie {id}"),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        total_inventory: 40,
        tracks_inventory: true,
        variants: ["S", "M", "L", "XL"]
            .iter()
            .map(|s| Variant {
                inventory_quantity: 10,
                size: Some((*s).to_owned()),
            })
            .collect(),
    }
}

fn plan(id: &str, window: usize) -> CollectionPlan {
    CollectionPlan {
        collection_id: id.to_owned(),
        sequence: SequenceConfig {
            visible_window_size: window,
            color_gap_window: 0,
            alternate_types: false,
            insert_special_at: None,
        },
    }
}

fn settings(collections: Vec<CollectionPlan>) -> RunSettings {
    RunSettings {
        sales_lookback_days: 1,
        seasonal_collection_id: None,
        classifier_rules: ClassifierRules::default(),
        collections,
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn product_in_first_window_is_kept_out_of_second_window() {
    let catalog = FakeCatalog::default()
        .with_sales(&[("shared", 50), ("a", 10), ("b", 5)])
        .with_collection("c1", "MANUAL", vec![product("a", &[]), product("shared", &[])])
        .with_collection("c2", "MANUAL", vec![product("shared", &[]), product("b", &[])]);

    let summary = run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("c1", 2), plan("c2", 2)]),
    )
    .await
    .expect("run should succeed");

    assert!(summary.success);
    assert_eq!(catalog.written("c1").unwrap(), ["shared", "a"]);
    assert_eq!(
        catalog.written("c2").unwrap(),
        ["b", "shared"],
        "shared product is already placed, so it falls to the tail"
    );
    assert_eq!(summary.unique_products, 3);
}

#[tokio::test]
async fn drop_group_placed_earlier_is_skipped_later() {
    let catalog = FakeCatalog::default()
        .with_sales(&[("x1", 9), ("x2", 8)])
        .with_collection("c1", "MANUAL", vec![product("x1", &["Group_Fall"])])
        .with_collection(
            "c2",
            "MANUAL",
            vec![product("x2", &["Group_Fall"]), product("y", &[])],
        );

    let summary = run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("c1", 4), plan("c2", 4)]),
    )
    .await
    .unwrap();

    assert_eq!(catalog.written("c2").unwrap(), ["y", "x2"]);
    assert_eq!(summary.results[1].window_len, 1);
    assert_eq!(summary.unique_groups, 1);
}

#[tokio::test]
async fn non_manual_collection_is_reported_and_run_continues() {
    let catalog = FakeCatalog::default()
        .with_collection("auto", "BEST_SELLING", vec![product("a", &[])])
        .with_collection("manual", "MANUAL", vec![product("b", &[])]);

    let summary = run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("auto", 4), plan("manual", 4)]),
    )
    .await
    .unwrap();

    assert!(!summary.success);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].collection_id, "auto");
    assert!(summary.failures[0].error.contains("MANUAL"));
    assert!(catalog.written("auto").is_none(), "nothing is written for a non-manual collection");
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].title, "Title manual");
}

#[tokio::test]
async fn missing_collection_and_rejected_write_are_recorded() {
    let mut catalog = FakeCatalog::default()
        .with_collection("bad-write", "MANUAL", vec![product("a", &[])])
        .with_collection("ok", "MANUAL", vec![product("b", &[])]);
    catalog.reject_writes_for.insert("bad-write".to_owned());

    let summary = run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("gone", 4), plan("bad-write", 4), plan("ok", 4)]),
    )
    .await
    .unwrap();

    let failed: Vec<&str> = summary
        .failures
        .iter()
        .map(|f| f.collection_id.as_str())
        .collect();
    assert_eq!(failed, ["gone", "bad-write"]);
    assert!(summary.failures[1].error.contains("rejected"));
    assert_eq!(catalog.written("ok").unwrap(), ["b"]);
}

#[tokio::test]
async fn sales_failure_aborts_before_any_collection() {
    let mut catalog =
        FakeCatalog::default().with_collection("c1", "MANUAL", vec![product("a", &[])]);
    catalog.fail_sales = true;

    let result = run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("c1", 4)]),
    )
    .await;

    assert!(matches!(result, Err(RunError::Sales(_))));
    assert!(catalog.writes().is_empty());
}

#[tokio::test]
async fn seasonal_products_are_moved_behind_eligible_ones() {
    let mut catalog = FakeCatalog::default()
        .with_sales(&[("summer", 100), ("winter", 1)])
        .with_collection(
            "c1",
            "MANUAL",
            vec![product("summer", &[]), product("winter", &[])],
        );
    catalog.seasonal.insert(
        "summer-ref".to_owned(),
        ["summer".to_owned()].into_iter().collect(),
    );
    let mut run = settings(vec![plan("c1", 4)]);
    run.seasonal_collection_id = Some("summer-ref".to_owned());

    run_all(Collaborators::from_sources(&catalog), &run)
        .await
        .unwrap();

    assert_eq!(catalog.written("c1").unwrap(), ["winter", "summer"]);
}

#[tokio::test]
async fn repeated_runs_with_fresh_state_write_identical_orderings() {
    let catalog = FakeCatalog::default()
        .with_sales(&[("a", 3), ("b", 3), ("c", 7), ("d", 1)])
        .with_collection(
            "c1",
            "MANUAL",
            vec![
                product("a", &["red", "Group_1"]),
                product("b", &["red"]),
                product("c", &["blue", "Group_1"]),
            ],
        )
        .with_collection(
            "c2",
            "MANUAL",
            vec![product("a", &[]), product("d", &["red"]), product("b", &[])],
        );
    let run = settings(vec![plan("c1", 2), plan("c2", 2)]);

    let first = run_all(Collaborators::from_sources(&catalog), &run)
        .await
        .unwrap();
    let first_writes = catalog.writes();
    catalog.writes.lock().unwrap().clear();
    let second = run_all(Collaborators::from_sources(&catalog), &run)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first_writes, catalog.writes());
}

#[tokio::test]
async fn every_written_ordering_is_a_permutation_of_the_collection() {
    let products: Vec<Product> = (0..30).map(|i| product(&format!("p{i}"), &[])).collect();
    let catalog = FakeCatalog::default().with_collection("big", "MANUAL", products.clone());

    run_all(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("big", 24)]),
    )
    .await
    .unwrap();

    let mut written = catalog.written("big").unwrap();
    let mut expected: Vec<String> = products.into_iter().map(|p| p.id).collect();
    written.sort();
    expected.sort();
    assert_eq!(written, expected);
}

#[tokio::test]
async fn seeded_state_is_honored_by_run_with_state() {
    let catalog = FakeCatalog::default()
        .with_sales(&[("a", 5)])
        .with_collection("c1", "MANUAL", vec![product("a", &[]), product("b", &[])]);
    let mut state = GlobalMerchState::new();
    state.commit(["a"], std::iter::empty::<String>());

    let summary = run_with_state(
        Collaborators::from_sources(&catalog),
        &settings(vec![plan("c1", 4)]),
        &mut state,
    )
    .await
    .unwrap();

    assert_eq!(catalog.written("c1").unwrap(), ["b", "a"]);
    assert_eq!(summary.unique_products, 2);
}
