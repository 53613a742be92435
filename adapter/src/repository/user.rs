use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    club_event::Event,
    id::UserId,
    list::{ListOptions, PaginatedList},
    role::Role,
    user::{
        event::{
            CreateUser, DeleteUser, ResetUserPassword, UpdateAttendance, UpdateProfileImage,
            UpdateUserPassword, UpdateUserProfile, UpdateUserRole,
        },
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    map_foreign_key_violation, map_serialization_failure,
    model::{club_event::EventRow, user::UserRow},
    set_transaction_serializable, ConnectionPool,
};

// registered_events は参加登録テーブルから登録順に集約する
const SELECT_USER: &str = r#"
    SELECT
        u.user_id,
        u.email,
        u.name,
        u.role,
        u.email_verified,
        u.student_id,
        u.major,
        u.year_level,
        u.semester,
        u.attendance_status,
        u.profile_image_url,
        u.created_at,
        ARRAY(
            SELECT r.event_id FROM event_registrations AS r
            WHERE r.user_id = u.user_id
            ORDER BY r.registered_at
        ) AS registered_events
    FROM users AS u
"#;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE u.user_id = $1"))
            .bind(current_user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(User::try_from).transpose()
    }

    async fn find_all(&self, options: ListOptions) -> AppResult<PaginatedList<User>> {
        let ListOptions { limit, offset } = options;
        let total = self.count().await?;

        let items = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} ORDER BY u.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(User::try_from)
        .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = hash_password(&event.password)?;
        sqlx::query(
            r#"
                INSERT INTO users
                (user_id, email, name, password_hash, role, student_id, major, year_level, semester)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);
            "#,
        )
        .bind(user_id)
        .bind(&event.email)
        .bind(&event.name)
        .bind(hashed_password)
        .bind(Role::Student.as_ref())
        .bind(&event.student_id)
        .bind(&event.major)
        .bind(event.year_level)
        .bind(&event.semester)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => AppError::UnprocessableEntity(format!(
                "メールアドレス（{}）は既に登録されています。",
                event.email
            )),
            _ => AppError::SpecificOperationError(e),
        })?;

        self.find_current_user(user_id)
            .await?
            .ok_or_else(|| AppError::NoRowsAffectedError("No user record has been created".into()))
    }

    async fn mark_email_verified(&self, user_id: UserId) -> AppResult<()> {
        let res = sqlx::query("UPDATE users SET email_verified = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), user_id)
    }

    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET name = $1, student_id = $2, major = $3, year_level = $4, semester = $5
                WHERE user_id = $6;
            "#,
        )
        .bind(&event.name)
        .bind(&event.student_id)
        .bind(&event.major)
        .bind(event.year_level)
        .bind(&event.semester)
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), event.user_id)
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original_password_hash =
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE user_id = $1")
                .bind(event.user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

        // 現在のパスワードが正しいか確認する
        if !bcrypt::verify(&event.current_password, &original_password_hash)? {
            return Err(AppError::UnauthenticatedError);
        }

        sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(hash_password(&event.new_password)?)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn reset_password(&self, event: ResetUserPassword) -> AppResult<()> {
        let res = sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(hash_password(&event.new_password)?)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), event.user_id)
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let res = sqlx::query("UPDATE users SET role = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(event.role.as_ref())
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), event.user_id)
    }

    async fn update_attendance(&self, event: UpdateAttendance) -> AppResult<()> {
        let res = sqlx::query("UPDATE users SET attendance_status = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(event.attendance_status.as_ref())
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), event.user_id)
    }

    async fn update_profile_image(&self, event: UpdateProfileImage) -> AppResult<()> {
        let res = sqlx::query("UPDATE users SET profile_image_url = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(&event.profile_image_url)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        ensure_found(res.rows_affected(), event.user_id)
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        // 参加登録はカスケードで消えるので、先に各イベントの参加者数を戻す
        sqlx::query(
            r#"
                UPDATE events
                SET current_participants = GREATEST(current_participants - 1, 0)
                WHERE event_id IN (
                    SELECT event_id FROM event_registrations WHERE user_id = $1
                );
            "#,
        )
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_foreign_key_violation(
                    e,
                    "このユーザーが作成したイベント・ワークショップ・資料が残っているため削除できません。",
                )
            })?;
        ensure_found(res.rows_affected(), event.user_id)?;

        tx.commit().await.map_err(map_serialization_failure)?;
        Ok(())
    }

    async fn find_registered_events(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    e.event_id, e.title, e.description, e.event_date, e.event_time,
                    e.location, e.category, e.max_participants, e.current_participants,
                    e.image_url, e.created_by, e.created_at
                FROM event_registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                WHERE r.user_id = $1
                ORDER BY e.event_date ASC, e.event_time ASC;
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

fn ensure_found(rows_affected: u64, user_id: UserId) -> AppResult<()> {
    if rows_affected < 1 {
        return Err(AppError::EntityNotFound(format!(
            "ユーザー（{user_id}）が見つかりませんでした。"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        club_event::EventRepositoryImpl,
        registration::RegistrationRepositoryImpl,
        test_support::{seed_event, seed_user},
    };
    use chrono::Utc;
    use kernel::model::{registration::event::CreateRegistration, user::AttendanceStatus};
    use kernel::repository::{
        club_event::EventRepository, registration::RegistrationRepository,
    };

    fn new_member(email: &str) -> CreateUser {
        CreateUser {
            name: "Test Member".into(),
            email: email.into(),
            password: "correct horse".into(),
            student_id: Some("S0001".into()),
            major: None,
            year_level: Some(1),
            semester: None,
        }
    }

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_create_and_update_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo.create(new_member("member@example.com")).await?;
        assert_eq!(user.role, Role::Student);
        assert!(!user.email_verified);
        assert!(user.registered_events.is_empty());

        // 同じメールアドレスでは登録できない
        assert!(matches!(
            repo.create(new_member("member@example.com")).await,
            Err(AppError::UnprocessableEntity(_))
        ));

        repo.mark_email_verified(user.id).await?;
        repo.update_role(UpdateUserRole {
            user_id: user.id,
            role: Role::Mentor,
        })
        .await?;
        repo.update_attendance(UpdateAttendance {
            user_id: user.id,
            attendance_status: AttendanceStatus::Present,
        })
        .await?;

        let found = repo.find_by_email("member@example.com").await?.unwrap();
        assert!(found.email_verified);
        assert_eq!(found.role, Role::Mentor);
        assert_eq!(found.profile.attendance_status, AttendanceStatus::Present);
        assert_eq!(repo.count().await?, 1);
        Ok(())
    }

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_delete_registered_member_frees_seat(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let organizer = seed_user(&pool, "organizer@example.com").await?;
        let leaving = seed_user(&pool, "leaving@example.com").await?;
        let next = seed_user(&pool, "next@example.com").await?;
        let event_id = seed_event(&pool, organizer, 1).await?;

        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let registrations = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let events = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        registrations
            .create(CreateRegistration::new(event_id, leaving, Utc::now()))
            .await?;
        repo.delete(DeleteUser { user_id: leaving }).await?;

        let event = events.find_by_id(event_id).await?.unwrap();
        assert_eq!(event.current_participants, 0);
        assert!(registrations.find_participants(event_id).await?.is_empty());

        // 空いた席にはほかのメンバーが登録できる
        registrations
            .create(CreateRegistration::new(event_id, next, Utc::now()))
            .await?;
        assert_eq!(
            events.find_by_id(event_id).await?.unwrap().current_participants,
            1
        );
        Ok(())
    }

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_update_password_checks_current(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));
        let user = repo.create(new_member("pw@example.com")).await?;

        let wrong = repo
            .update_password(UpdateUserPassword {
                user_id: user.id,
                current_password: "wrong".into(),
                new_password: "next password".into(),
            })
            .await;
        assert!(matches!(wrong, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateUserPassword {
            user_id: user.id,
            current_password: "correct horse".into(),
            new_password: "next password".into(),
        })
        .await?;
        Ok(())
    }
}
