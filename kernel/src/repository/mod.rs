pub mod auth;
pub mod club_event;
pub mod health;
pub mod image;
pub mod mail;
pub mod registration;
pub mod resource;
pub mod user;
pub mod workshop;
