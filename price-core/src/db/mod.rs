pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DbConfig, MemoryStoreFactory, StoreFactory, StoreRegistry};
pub use memory::MemoryStore;
pub use repository::{ForumStore, MarketStore, RepositoryError, UserStore, VehicleStore};
