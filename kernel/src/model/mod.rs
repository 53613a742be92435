pub mod auth;
pub mod club_event;
pub mod id;
pub mod id_card;
pub mod image;
pub mod list;
pub mod mail;
pub mod registration;
pub mod resource;
pub mod role;
pub mod schedule;
pub mod user;
pub mod workshop;
