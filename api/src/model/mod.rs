pub mod auth;
pub mod club_event;
pub mod dashboard;
pub mod image;
pub mod list;
pub mod registration;
pub mod resource;
pub mod user;
pub mod workshop;

use serde::Serialize;

// 作成系のエンドポイントが返す新しい ID
#[derive(Serialize)]
pub struct CreatedResponse<T> {
    pub id: T,
}
