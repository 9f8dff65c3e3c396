use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Discussion, NewDiscussion, NewReply, NewUser, NewVehicleListing, Reply, User, VehicleListing,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("User already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Read/write access to the sample vehicle catalog.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListing>, RepositoryError>;

    /// # Errors
    /// [`RepositoryError::NotFound`] for an unknown id.
    async fn get_vehicle(&self, id: &str) -> Result<VehicleListing, RepositoryError>;

    async fn insert_vehicle(
        &self,
        listing: NewVehicleListing,
    ) -> Result<VehicleListing, RepositoryError>;
}

/// Registration and login. Deliberately minimal: this system's
/// authentication is a demo stand-in, but keeping it behind a trait means
/// a real implementation can be swapped in without touching call sites.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// # Errors
    /// [`RepositoryError::DuplicateEmail`] when the email is taken.
    async fn register(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// # Errors
    /// [`RepositoryError::InvalidCredentials`] when no user matches the
    /// email/password pair. Unknown email and wrong password are not
    /// distinguished.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, RepositoryError>;
}

/// The discussion board.
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Threads in creation order, replies included.
    async fn list_discussions(&self) -> Result<Vec<Discussion>, RepositoryError>;

    async fn create_discussion(
        &self,
        new: NewDiscussion,
    ) -> Result<Discussion, RepositoryError>;

    /// # Errors
    /// [`RepositoryError::NotFound`] for an unknown discussion id.
    async fn add_reply(
        &self,
        discussion_id: i64,
        new: NewReply,
    ) -> Result<Reply, RepositoryError>;

    /// Increments the thread's like counter and returns the new count.
    async fn like_discussion(&self, discussion_id: i64) -> Result<i64, RepositoryError>;

    /// Increments a reply's like counter and returns the new count.
    async fn like_reply(
        &self,
        discussion_id: i64,
        reply_id: i64,
    ) -> Result<i64, RepositoryError>;
}

/// Everything a serving process needs from storage.
pub trait MarketStore: VehicleStore + UserStore + ForumStore + std::fmt::Debug {}

impl<T: VehicleStore + UserStore + ForumStore + std::fmt::Debug> MarketStore for T {}
