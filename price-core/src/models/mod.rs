mod bike;
mod condition;
mod estimate;
mod forum;
mod fuel_type;
mod query;
mod user;
mod vehicle;

pub use bike::{BikeCategory, EngineBand};
pub use condition::Condition;
pub use estimate::{Currency, PriceEstimate, PriceRange};
pub use forum::{Discussion, NewDiscussion, NewReply, Reply};
pub use fuel_type::{FuelType, Transmission};
pub use query::{BikeQuery, CarQuery};
pub use user::{Credentials, NewUser, User};
pub use vehicle::{NewVehicleListing, VehicleListing};
