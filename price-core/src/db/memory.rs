//! In-memory store.
//!
//! The reference [`MarketStore`] implementation: plain vectors behind a
//! mutex, nothing survives the process. Suitable for tests and for
//! running the server with the `memory` backend; real deployments use the
//! SQLite crate.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{
    Condition, Discussion, FuelType, NewDiscussion, NewReply, NewUser, NewVehicleListing, Reply,
    Transmission, User, VehicleListing,
};

use super::repository::{
    ForumStore, RepositoryError, UserStore, VehicleStore,
};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct Inner {
    vehicles: Vec<VehicleListing>,
    users: Vec<StoredUser>,
    discussions: Vec<Discussion>,
    next_user_id: i64,
    next_discussion_id: i64,
    next_reply_id: i64,
}

#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_user_id: 1,
                next_discussion_id: 1,
                next_reply_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// A store pre-loaded with the sample catalog and the two seeded
    /// discussion threads the demo front end ships with.
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            inner.vehicles = sample_catalog();
            inner.discussions = sample_discussions();
            inner.next_discussion_id = 3;
            inner.next_reply_id = 4;
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned mutex only means another thread panicked mid-write;
        // the data itself is still usable for this demo store.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListing>, RepositoryError> {
        Ok(self.lock().vehicles.clone())
    }

    async fn get_vehicle(
        &self,
        id: &str,
    ) -> Result<VehicleListing, RepositoryError> {
        self.lock()
            .vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn insert_vehicle(
        &self,
        listing: NewVehicleListing,
    ) -> Result<VehicleListing, RepositoryError> {
        let mut inner = self.lock();
        if inner.vehicles.iter().any(|v| v.id == listing.id) {
            return Err(RepositoryError::Database(format!(
                "vehicle id '{}' already exists",
                listing.id
            )));
        }
        let listing = listing.into_listing();
        inner.vehicles.push(listing.clone());
        Ok(listing)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn register(
        &self,
        new_user: NewUser,
    ) -> Result<User, RepositoryError> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.user.email == new_user.email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let user = User {
            id: inner.next_user_id,
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now(),
        };
        inner.next_user_id += 1;
        inner.users.push(StoredUser {
            user: user.clone(),
            password: new_user.password,
        });
        Ok(user)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        self.lock()
            .users
            .iter()
            .find(|u| u.user.email == email && u.password == password)
            .map(|u| u.user.clone())
            .ok_or(RepositoryError::InvalidCredentials)
    }
}

#[async_trait]
impl ForumStore for MemoryStore {
    async fn list_discussions(&self) -> Result<Vec<Discussion>, RepositoryError> {
        Ok(self.lock().discussions.clone())
    }

    async fn create_discussion(
        &self,
        new: NewDiscussion,
    ) -> Result<Discussion, RepositoryError> {
        let mut inner = self.lock();
        let discussion = Discussion {
            id: inner.next_discussion_id,
            title: new.title,
            author: new.author,
            content: new.content,
            likes: 0,
            created_at: Utc::now(),
            replies: Vec::new(),
        };
        inner.next_discussion_id += 1;
        inner.discussions.push(discussion.clone());
        Ok(discussion)
    }

    async fn add_reply(
        &self,
        discussion_id: i64,
        new: NewReply,
    ) -> Result<Reply, RepositoryError> {
        let mut inner = self.lock();
        let reply_id = inner.next_reply_id;
        let discussion = inner
            .discussions
            .iter_mut()
            .find(|d| d.id == discussion_id)
            .ok_or(RepositoryError::NotFound)?;

        let reply = Reply {
            id: reply_id,
            author: new.author,
            content: new.content,
            likes: 0,
            created_at: Utc::now(),
        };
        discussion.replies.push(reply.clone());
        inner.next_reply_id += 1;
        Ok(reply)
    }

    async fn like_discussion(
        &self,
        discussion_id: i64,
    ) -> Result<i64, RepositoryError> {
        let mut inner = self.lock();
        let discussion = inner
            .discussions
            .iter_mut()
            .find(|d| d.id == discussion_id)
            .ok_or(RepositoryError::NotFound)?;
        discussion.likes += 1;
        Ok(discussion.likes)
    }

    async fn like_reply(
        &self,
        discussion_id: i64,
        reply_id: i64,
    ) -> Result<i64, RepositoryError> {
        let mut inner = self.lock();
        let discussion = inner
            .discussions
            .iter_mut()
            .find(|d| d.id == discussion_id)
            .ok_or(RepositoryError::NotFound)?;
        let reply = discussion
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or(RepositoryError::NotFound)?;
        reply.likes += 1;
        Ok(reply.likes)
    }
}

fn sample_catalog() -> Vec<VehicleListing> {
    let car = |id: &str,
               make: &str,
               model: &str,
               year: i32,
               price: i64,
               mileage: u64,
               condition: Condition,
               fuel_type: FuelType| VehicleListing {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        price: Decimal::from(price),
        mileage,
        condition,
        fuel_type,
        transmission: Transmission::Automatic,
    };

    vec![
        car("car1", "Toyota", "Camry", 2022, 25_000, 15_000, Condition::Excellent, FuelType::Gasoline),
        car("car2", "Honda", "Civic", 2023, 23_000, 5_000, Condition::Excellent, FuelType::Gasoline),
        car("car3", "Ford", "F-150", 2021, 35_000, 20_000, Condition::Good, FuelType::Gasoline),
        car("car4", "Tesla", "Model 3", 2023, 45_000, 10_000, Condition::Excellent, FuelType::Electric),
        car("car5", "BMW", "3 Series", 2022, 42_000, 18_000, Condition::Good, FuelType::Gasoline),
    ]
}

fn sample_discussions() -> Vec<Discussion> {
    let now = Utc::now();
    vec![
        Discussion {
            id: 1,
            title: "What factors most affect car resale value?".to_string(),
            author: "CarExpert".to_string(),
            content: "Is it mileage, brand, condition, or something else?".to_string(),
            likes: 24,
            created_at: now,
            replies: vec![
                Reply {
                    id: 1,
                    author: "AutoEnthusiast".to_string(),
                    content: "Brand reputation and reliability history are huge factors."
                        .to_string(),
                    likes: 12,
                    created_at: now,
                },
                Reply {
                    id: 2,
                    author: "MechanicPro".to_string(),
                    content: "A well-documented service history can significantly increase \
                              resale value."
                        .to_string(),
                    likes: 8,
                    created_at: now,
                },
            ],
        },
        Discussion {
            id: 2,
            title: "Electric vs. Hybrid: Which is better for commuting?".to_string(),
            author: "GreenDriver".to_string(),
            content: "What are the pros and cons of each option for a 30-mile commute?"
                .to_string(),
            likes: 18,
            created_at: now,
            replies: vec![Reply {
                id: 3,
                author: "EVFanatic".to_string(),
                content: "If you have charging at home, go electric.".to_string(),
                likes: 7,
                created_at: now,
            }],
        },
    ]
}
