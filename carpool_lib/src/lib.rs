pub mod location;
pub mod message;
pub mod trip;
pub mod user;
