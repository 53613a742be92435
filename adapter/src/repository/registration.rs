use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{
        event::{CancelRegistration, CreateRegistration},
        RegistrationAction, RegistrationLog,
    },
    user::Participant,
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    map_serialization_failure,
    model::{club_event::EventCapacityRow, registration::RegistrationLogRow, user::ParticipantRow},
    set_transaction_serializable, ConnectionPool,
};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    // 参加登録を行う
    async fn create(&self, event: CreateRegistration) -> AppResult<RegistrationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のイベント ID をもつイベントが存在するか
        // - 存在した場合、定員に空きがあるか
        //
        // イベント行はロックしておき、同時に来た登録を直列化する
        {
            let capacity = sqlx::query_as::<_, EventCapacityRow>(
                r#"
                    SELECT max_participants, current_participants
                    FROM events
                    WHERE event_id = $1
                    FOR UPDATE;
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_serialization_failure)?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "イベント（{}）が見つかりませんでした。",
                    event.event_id
                ))
            })?;

            if capacity.current_participants >= capacity.max_participants {
                return Err(AppError::UnprocessableEntity(format!(
                    "イベント（{}）は定員に達しています。",
                    event.event_id
                )));
            }
        }

        // 同じユーザーの二重登録は一意制約で防ぐ
        let registration_id = RegistrationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO event_registrations
                (registration_id, event_id, user_id, registered_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (event_id, user_id) DO NOTHING;
            "#,
        )
        .bind(registration_id)
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(event.registered_at)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if res.rows_affected() < 1 {
            return Err(AppError::UnprocessableEntity(format!(
                "イベント（{}）には既に参加登録済みです。",
                event.event_id
            )));
        }

        // 参加者数を増やす。定員チェックを WHERE 句でも重ねる
        let res = sqlx::query(
            r#"
                UPDATE events
                SET current_participants = current_participants + 1
                WHERE event_id = $1
                  AND current_participants < max_participants;
            "#,
        )
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if res.rows_affected() < 1 {
            return Err(AppError::UnprocessableEntity(format!(
                "イベント（{}）は定員に達しています。",
                event.event_id
            )));
        }

        insert_log(
            &mut tx,
            event.event_id,
            event.user_id,
            RegistrationAction::Register,
            event.registered_at,
        )
        .await?;

        tx.commit().await.map_err(map_serialization_failure)?;

        Ok(registration_id)
    }

    // 参加取り消しを行う
    async fn cancel(&self, event: CancelRegistration) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        set_transaction_serializable(&mut tx).await?;

        let res = sqlx::query(
            r#"
                DELETE FROM event_registrations
                WHERE event_id = $1 AND user_id = $2;
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）への参加登録が見つかりませんでした。",
                event.event_id
            )));
        }

        // 参加者数は 0 未満にしない
        sqlx::query(
            r#"
                UPDATE events
                SET current_participants = GREATEST(current_participants - 1, 0)
                WHERE event_id = $1;
            "#,
        )
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        insert_log(
            &mut tx,
            event.event_id,
            event.user_id,
            RegistrationAction::Cancel,
            event.cancelled_at,
        )
        .await?;

        tx.commit().await.map_err(map_serialization_failure)?;

        Ok(())
    }

    async fn find_participants(&self, event_id: EventId) -> AppResult<Vec<Participant>> {
        sqlx::query_as::<_, ParticipantRow>(
            r#"
                SELECT u.user_id, u.name, u.email, u.student_id, r.registered_at
                FROM event_registrations AS r
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.event_id = $1
                ORDER BY r.registered_at ASC;
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Participant::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_logs(&self, event_id: EventId) -> AppResult<Vec<RegistrationLog>> {
        sqlx::query_as::<_, RegistrationLogRow>(
            r#"
                SELECT log_id, event_id, user_id, action, logged_at
                FROM registration_logs
                WHERE event_id = $1
                ORDER BY logged_at DESC;
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(RegistrationLog::try_from)
        .collect()
    }
}

async fn insert_log(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: EventId,
    user_id: UserId,
    action: RegistrationAction,
    logged_at: chrono::DateTime<chrono::Utc>,
) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            INSERT INTO registration_logs (log_id, event_id, user_id, action, logged_at)
            VALUES ($1, $2, $3, $4, $5);
        "#,
    )
    .bind(RegistrationId::new())
    .bind(event_id)
    .bind(user_id)
    .bind(action.as_ref())
    .bind(logged_at)
    .execute(&mut **tx)
    .await
    .map_err(map_serialization_failure)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No registration log record has been created".into(),
        ));
    }
    Ok(())
}
