use chrono::{Duration, Local, NaiveTime};
use kernel::model::{
    club_event::event::CreateEvent,
    id::{EventId, UserId},
    schedule::EventSchedule,
    user::event::CreateUser,
};
use kernel::repository::{club_event::EventRepository, user::UserRepository};

use crate::{
    database::ConnectionPool,
    repository::{club_event::EventRepositoryImpl, user::UserRepositoryImpl},
};

pub(crate) async fn seed_user(pool: &sqlx::PgPool, email: &str) -> anyhow::Result<UserId> {
    let user = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()))
        .create(CreateUser {
            name: format!("member {email}"),
            email: email.into(),
            password: "seed-password".into(),
            student_id: None,
            major: None,
            year_level: None,
            semester: None,
        })
        .await?;
    Ok(user.id)
}

pub(crate) fn schedule_in(days_ahead: i64) -> EventSchedule {
    EventSchedule {
        date: (Local::now() + Duration::days(days_ahead)).date_naive(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        location: "213".into(),
    }
}

pub(crate) async fn seed_event(
    pool: &sqlx::PgPool,
    organizer: UserId,
    max_participants: i32,
) -> anyhow::Result<EventId> {
    let id = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()))
        .create(CreateEvent {
            title: "Club meetup".into(),
            description: "Monthly meetup".into(),
            schedule: schedule_in(1),
            category: "meetup".into(),
            max_participants,
            image_url: None,
            created_by: organizer,
        })
        .await?;
    Ok(id)
}
