pub mod admin;
pub mod client;
pub mod object_id;
pub mod package;
pub mod reservation;
pub mod review;
pub mod schema;
