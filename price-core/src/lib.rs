pub mod db;
pub mod models;
pub mod pricing;

pub use db::repository::{
    ForumStore, MarketStore, RepositoryError, UserStore, VehicleStore,
};
pub use models::*;
pub use pricing::{BikeEstimator, CarEstimator, EstimateError, PricingTables};
