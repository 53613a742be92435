use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::{model::mail::OutgoingMail, repository::mail::MailRepository};
use reqwest::Client;
use shared::error::{AppError, AppResult};

const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

// Gmail API の raw 形式（RFC 822 を base64url でエンコードしたもの）
pub fn encode_raw_message(from: &str, mail: &OutgoingMail) -> String {
    let message_str = format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
        from,
        mail.to,
        encode_header(&mail.subject),
        mail.body
    );
    general_purpose::URL_SAFE_NO_PAD.encode(message_str.as_bytes())
}

// 件名に ASCII 以外が含まれるときは RFC 2047 の encoded-word にする
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", general_purpose::STANDARD.encode(value))
    }
}

pub struct GmailRepositoryImpl {
    client: Client,
    access_token: String,
    sender: String,
}

impl GmailRepositoryImpl {
    pub fn new(access_token: String, sender: String) -> Self {
        Self {
            client: Client::new(),
            access_token,
            sender,
        }
    }
}

#[async_trait]
impl MailRepository for GmailRepositoryImpl {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        let encoded_message = encode_raw_message(&self.sender, &mail);

        let res = self
            .client
            .post(GMAIL_SEND_URL)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "raw": encoded_message }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gmail error: {e}")))?;

        if res.status().is_success() {
            tracing::info!(to = %mail.to, subject = %mail.subject, "Mail sent");
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(AppError::ExternalServiceError(format!(
                "Gmail returned {status}: {body}"
            )))
        }
    }
}

// 送信設定が無い環境ではログに出すだけにする
#[derive(Default)]
pub struct LoggingMailRepositoryImpl;

#[async_trait]
impl MailRepository for LoggingMailRepositoryImpl {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        // 本文には確認・再設定用のリンクが含まれるので debug でだけ出す
        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail (not sent)");
        tracing::debug!(to = %mail.to, body = %mail.body, "Mail body (not sent)");
        Ok(())
    }
}
