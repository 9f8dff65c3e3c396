use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use price_core::db::factory::{DbConfig, StoreFactory};
use price_core::db::repository::{MarketStore, RepositoryError};

use crate::repository::SqliteStore;

/// Factory for the SQLite-backed [`SqliteStore`].
///
/// `create` opens (or creates) the database named by the config's
/// connection string, runs the bundled migrations and then applies the
/// seed files so a fresh database starts with the sample catalog.
pub struct SqliteStoreFactory;

impl SqliteStoreFactory {
    /// Locate the seed directory.
    ///
    /// Resolution order:
    /// 1. `PRICE_DB_SQLITE_SEEDS_DIR` environment variable.
    /// 2. `./seeds` relative to the working directory.
    /// 3. `seeds/` next to this crate's manifest (useful under `cargo run`).
    fn seeds_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("PRICE_DB_SQLITE_SEEDS_DIR") {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("seeds");
        if cwd.is_dir() {
            return Some(cwd);
        }

        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds");
        if manifest.is_dir() {
            return Some(manifest);
        }

        None
    }
}

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn MarketStore>, RepositoryError> {
        let store = SqliteStore::new(&config.connection_string).await?;
        store.run_migrations().await?;

        match Self::seeds_dir() {
            Some(dir) => {
                info!(seeds_dir = %dir.display(), "applying seed files");
                store.run_seeds(&dir).await?;
            }
            None => {
                info!("no seeds directory found, starting with an empty database");
            }
        }

        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use price_core::db::factory::StoreRegistry;
    use price_core::db::repository::VehicleStore;

    use super::*;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn create_runs_migrations_and_seeds() {
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let store = SqliteStoreFactory.create(&config).await.unwrap();
        let vehicles = store.list_vehicles().await.unwrap();

        assert_eq!(vehicles.len(), 5);
        assert_eq!(vehicles[0].make, "Toyota");
    }

    #[tokio::test]
    async fn registry_dispatches_to_sqlite_backend() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(SqliteStoreFactory));

        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let store = registry.create(&config).await.unwrap();
        assert_eq!(store.list_vehicles().await.unwrap().len(), 5);
    }
}
