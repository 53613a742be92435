pub mod auth;
pub mod club_event;
pub mod dashboard;
pub mod health;
pub mod image;
pub mod resource;
pub mod user;
pub mod v1;
pub mod workshop;
