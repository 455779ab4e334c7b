//! Wire messages of the `user_service` protobuf package.
//!
//! Each message is a prost message and doubles as the JSON body of the
//! matching REST endpoint.

mod branch;
mod customer;
mod seller;
mod shop;
mod system_user;

pub use branch::*;
pub use customer::*;
pub use seller::*;
pub use shop::*;
pub use system_user::*;
