use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use price_core::models::{
    Condition, Discussion, FuelType, NewDiscussion, NewReply, NewUser, NewVehicleListing, Reply,
    Transmission, User, VehicleListing,
};
use price_core::{ForumStore, RepositoryError, UserStore, VehicleStore};

#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?
            .create_if_missing(true);

        // Every pooled connection to ':memory:' gets its own database, so
        // an in-memory store must be pinned to a single connection or the
        // migrated schema is invisible to later queries.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            SqlitePool::connect_with(options).await
        }
        .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seeds directory '{}': {}",
                    seeds_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            sqlx::raw_sql(&sql).execute(&self.pool).await.map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to execute seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct VehicleRow {
    id: String,
    make: String,
    model: String,
    year: i32,
    price: String,
    mileage: i64,
    condition: String,
    fuel_type: String,
    transmission: String,
}

impl TryFrom<VehicleRow> for VehicleListing {
    type Error = RepositoryError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(VehicleListing {
            condition: Condition::parse(&row.condition).ok_or_else(|| {
                RepositoryError::Database(format!("Invalid condition: {}", row.condition))
            })?,
            fuel_type: FuelType::parse(&row.fuel_type).ok_or_else(|| {
                RepositoryError::Database(format!("Invalid fuel type: {}", row.fuel_type))
            })?,
            transmission: Transmission::parse(&row.transmission).ok_or_else(|| {
                RepositoryError::Database(format!("Invalid transmission: {}", row.transmission))
            })?,
            price: parse_decimal(&row.price)?,
            mileage: u64::try_from(row.mileage).map_err(|_| {
                RepositoryError::Database(format!("Negative mileage: {}", row.mileage))
            })?,
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
        })
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            created_at: parse_datetime(&row.created_at)?,
            id: row.id,
            name: row.name,
            email: row.email,
        })
    }
}

#[derive(FromRow)]
struct DiscussionRow {
    id: i64,
    title: String,
    author: String,
    content: String,
    likes: i64,
    created_at: String,
}

#[derive(FromRow)]
struct ReplyRow {
    id: i64,
    discussion_id: i64,
    author: String,
    content: String,
    likes: i64,
    created_at: String,
}

impl TryFrom<ReplyRow> for Reply {
    type Error = RepositoryError;

    fn try_from(row: ReplyRow) -> Result<Self, Self::Error> {
        Ok(Reply {
            created_at: parse_datetime(&row.created_at)?,
            id: row.id,
            author: row.author,
            content: row.content,
            likes: row.likes,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

fn now_text() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl VehicleStore for SqliteStore {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListing>, RepositoryError> {
        let rows: Vec<VehicleRow> = sqlx::query_as(
            "SELECT id, make, model, year, price, mileage, condition, fuel_type, transmission
             FROM vehicles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn get_vehicle(
        &self,
        id: &str,
    ) -> Result<VehicleListing, RepositoryError> {
        let row: VehicleRow = sqlx::query_as(
            "SELECT id, make, model, year, price, mileage, condition, fuel_type, transmission
             FROM vehicles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn insert_vehicle(
        &self,
        listing: NewVehicleListing,
    ) -> Result<VehicleListing, RepositoryError> {
        sqlx::query(
            "INSERT INTO vehicles (id, make, model, year, price, mileage, condition, fuel_type, transmission)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&listing.id)
        .bind(&listing.make)
        .bind(&listing.model)
        .bind(listing.year)
        .bind(listing.price.to_string())
        .bind(i64::try_from(listing.mileage).unwrap_or(i64::MAX))
        .bind(listing.condition.as_str())
        .bind(listing.fuel_type.as_str())
        .bind(listing.transmission.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.get_vehicle(&listing.id).await
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn register(
        &self,
        new_user: NewUser,
    ) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(now_text())
        .execute(&self.pool)
        .await;

        let result = match result {
            Err(e) if e.to_string().contains("UNIQUE constraint failed: users.email") => {
                return Err(RepositoryError::DuplicateEmail);
            }
            other => other.map_err(db_err)?,
        };

        let id = result.last_insert_rowid();
        let row: UserRow =
            sqlx::query_as("SELECT id, name, email, created_at FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;

        row.try_into()
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, created_at FROM users WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.ok_or(RepositoryError::InvalidCredentials)?.try_into()
    }
}

#[async_trait]
impl ForumStore for SqliteStore {
    async fn list_discussions(&self) -> Result<Vec<Discussion>, RepositoryError> {
        let discussion_rows: Vec<DiscussionRow> = sqlx::query_as(
            "SELECT id, title, author, content, likes, created_at FROM discussions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let reply_rows: Vec<ReplyRow> = sqlx::query_as(
            "SELECT id, discussion_id, author, content, likes, created_at
             FROM replies ORDER BY discussion_id, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut replies_by_discussion: HashMap<i64, Vec<Reply>> = HashMap::new();
        for row in reply_rows {
            let discussion_id = row.discussion_id;
            replies_by_discussion
                .entry(discussion_id)
                .or_default()
                .push(row.try_into()?);
        }

        discussion_rows
            .into_iter()
            .map(|row| {
                Ok(Discussion {
                    replies: replies_by_discussion.remove(&row.id).unwrap_or_default(),
                    created_at: parse_datetime(&row.created_at)?,
                    id: row.id,
                    title: row.title,
                    author: row.author,
                    content: row.content,
                    likes: row.likes,
                })
            })
            .collect()
    }

    async fn create_discussion(
        &self,
        new: NewDiscussion,
    ) -> Result<Discussion, RepositoryError> {
        let now = now_text();
        let result = sqlx::query(
            "INSERT INTO discussions (title, author, content, likes, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.content)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Discussion {
            id: result.last_insert_rowid(),
            title: new.title,
            author: new.author,
            content: new.content,
            likes: 0,
            created_at: parse_datetime(&now)?,
            replies: Vec::new(),
        })
    }

    async fn add_reply(
        &self,
        discussion_id: i64,
        new: NewReply,
    ) -> Result<Reply, RepositoryError> {
        // The foreign key is not enforced without a pragma, so check the
        // thread exists to give the caller a clean NotFound.
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM discussions WHERE id = ?")
            .bind(discussion_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let now = now_text();
        let result = sqlx::query(
            "INSERT INTO replies (discussion_id, author, content, likes, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(discussion_id)
        .bind(&new.author)
        .bind(&new.content)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Reply {
            id: result.last_insert_rowid(),
            author: new.author,
            content: new.content,
            likes: 0,
            created_at: parse_datetime(&now)?,
        })
    }

    async fn like_discussion(
        &self,
        discussion_id: i64,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query("UPDATE discussions SET likes = likes + 1 WHERE id = ?")
            .bind(discussion_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let (likes,): (i64,) = sqlx::query_as("SELECT likes FROM discussions WHERE id = ?")
            .bind(discussion_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(likes)
    }

    async fn like_reply(
        &self,
        discussion_id: i64,
        reply_id: i64,
    ) -> Result<i64, RepositoryError> {
        let result =
            sqlx::query("UPDATE replies SET likes = likes + 1 WHERE id = ? AND discussion_id = ?")
                .bind(reply_id)
                .bind(discussion_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let (likes,): (i64,) = sqlx::query_as("SELECT likes FROM replies WHERE id = ?")
            .bind(reply_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(likes)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use price_core::models::{NewDiscussion, NewReply, NewUser, NewVehicleListing};

    use super::*;

    async fn store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let store = SqliteStore::new_with_pool(pool);
        store.run_migrations().await.unwrap();
        store
    }

    async fn seeded_store() -> SqliteStore {
        let store = store().await;
        let seeds = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds");
        store.run_seeds(&seeds).await.unwrap();
        store
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "hunter2!".to_string(),
        }
    }

    // =========================================================================
    // vehicles
    // =========================================================================

    #[tokio::test]
    async fn seeds_load_the_sample_catalog() {
        let store = seeded_store().await;
        let vehicles = store.list_vehicles().await.unwrap();

        assert_eq!(vehicles.len(), 5);
        assert_eq!(vehicles[0].id, "car1");
        assert_eq!(vehicles[0].make, "Toyota");
        assert_eq!(vehicles[0].price, dec!(25000));
    }

    #[tokio::test]
    async fn seeds_are_idempotent() {
        let store = seeded_store().await;
        let seeds = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds");
        store.run_seeds(&seeds).await.unwrap();

        assert_eq!(store.list_vehicles().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn pool_is_usable_for_raw_queries() {
        let store = seeded_store().await;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(store.pool())
            .await
            .unwrap();

        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn unknown_vehicle_id_is_not_found() {
        let store = seeded_store().await;
        assert_eq!(
            store.get_vehicle("car99").await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn inserted_vehicle_round_trips() {
        let store = store().await;
        let inserted = store
            .insert_vehicle(NewVehicleListing {
                id: "car6".to_string(),
                make: "Nissan".to_string(),
                model: "Leaf".to_string(),
                year: 2024,
                price: dec!(28000),
                mileage: 2_000,
                condition: Condition::Excellent,
                fuel_type: FuelType::Electric,
                transmission: Transmission::Automatic,
            })
            .await
            .unwrap();

        assert_eq!(inserted.price, dec!(28000));
        assert_eq!(inserted.mileage, 2_000);

        let fetched = store.get_vehicle("car6").await.unwrap();
        assert_eq!(fetched, inserted);
    }

    // =========================================================================
    // users
    // =========================================================================

    #[tokio::test]
    async fn register_then_authenticate_round_trips() {
        let store = store().await;
        let registered = store.register(new_user("a@example.com")).await.unwrap();

        let logged_in = store
            .authenticate("a@example.com", "hunter2!")
            .await
            .unwrap();

        assert_eq!(logged_in, registered);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = store().await;
        store.register(new_user("a@example.com")).await.unwrap();

        assert_eq!(
            store.register(new_user("a@example.com")).await,
            Err(RepositoryError::DuplicateEmail)
        );
    }

    #[tokio::test]
    async fn bad_credentials_are_rejected() {
        let store = store().await;
        store.register(new_user("a@example.com")).await.unwrap();

        assert_eq!(
            store.authenticate("a@example.com", "wrong").await,
            Err(RepositoryError::InvalidCredentials)
        );
        assert_eq!(
            store.authenticate("b@example.com", "hunter2!").await,
            Err(RepositoryError::InvalidCredentials)
        );
    }

    // =========================================================================
    // forum
    // =========================================================================

    #[tokio::test]
    async fn discussions_start_empty_and_accumulate() {
        let store = store().await;
        assert!(store.list_discussions().await.unwrap().is_empty());

        let discussion = store
            .create_discussion(NewDiscussion {
                title: "Best first bike?".to_string(),
                author: "Newbie".to_string(),
                content: "Looking for something forgiving.".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(discussion.likes, 0);

        let reply = store
            .add_reply(
                discussion.id,
                NewReply {
                    author: "Veteran".to_string(),
                    content: "A 250cc standard.".to_string(),
                },
            )
            .await
            .unwrap();

        let listed = store.list_discussions().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].replies.len(), 1);
        assert_eq!(listed[0].replies[0].id, reply.id);
    }

    #[tokio::test]
    async fn reply_to_unknown_thread_is_not_found() {
        let store = store().await;
        let result = store
            .add_reply(
                99,
                NewReply {
                    author: "Ghost".to_string(),
                    content: "Hello?".to_string(),
                },
            )
            .await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn likes_increment_and_report_the_new_count() {
        let store = store().await;
        let discussion = store
            .create_discussion(NewDiscussion {
                title: "T".to_string(),
                author: "A".to_string(),
                content: "C".to_string(),
            })
            .await
            .unwrap();
        let reply = store
            .add_reply(
                discussion.id,
                NewReply {
                    author: "B".to_string(),
                    content: "R".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(store.like_discussion(discussion.id).await.unwrap(), 1);
        assert_eq!(store.like_discussion(discussion.id).await.unwrap(), 2);
        assert_eq!(store.like_reply(discussion.id, reply.id).await.unwrap(), 1);
        assert_eq!(
            store.like_discussion(99).await,
            Err(RepositoryError::NotFound)
        );
    }
}
