pub mod auth;
pub mod club_event;
pub mod dashboard;
pub mod health;
pub mod id_card;
pub mod image;
pub mod registration;
pub mod resource;
pub mod user;
pub mod workshop;
