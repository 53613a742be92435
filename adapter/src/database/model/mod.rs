pub mod auth;
pub mod club_event;
pub mod registration;
pub mod resource;
pub mod user;
pub mod workshop;
