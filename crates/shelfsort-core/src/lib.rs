//! Collection re-ranking for a product catalog.
//!
//! [`classify`] derives merchandising facets from raw products, [`sequence`]
//! orders one collection against the run's [`GlobalMerchState`], and
//! [`runner`] drives every configured collection through the platform
//! collaborators in [`sources`].

pub mod app_config;
pub mod classify;
pub mod config;
pub mod error;
pub mod facets;
pub mod products;
pub mod runner;
pub mod sequence;
pub mod sources;
pub mod state;

pub use app_config::{AppConfig, Environment};
pub use classify::{classify, classify_all, ClassifiedProduct, ClassifierRules, ProductFacets};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CollectionError, ConfigError, RunError, SourceError};
pub use facets::{Color, GarmentType};
pub use products::{Product, SalesIndex, Variant};
pub use runner::{
    run_all, run_with_state, CollectionFailure, CollectionOutcome, CollectionPlan,
    Collaborators, RunSettings, RunSummary,
};
pub use sequence::{sequence, CollectionPlacement, SequenceConfig, WindowEntry};
pub use sources::{
    CatalogFetcher, CollectionSnapshot, MerchSources, ReorderSink, SalesFetcher,
    SeasonalSetFetcher, MANUAL_SORT_ORDER,
};
pub use state::GlobalMerchState;
