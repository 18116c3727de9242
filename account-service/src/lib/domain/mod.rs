pub mod audit;
pub mod role;
pub mod user;
