use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    pub fn email_verification(to: &str, name: &str, link: &str) -> Self {
        Self::new(
            to.to_string(),
            "メールアドレスの確認".into(),
            format!("{name}さん\nクラブへの登録ありがとうございます。\n以下のリンクからメールアドレスを確認してください。\n{link}"),
        )
    }

    pub fn password_reset(to: &str, name: &str, link: &str) -> Self {
        Self::new(
            to.to_string(),
            "パスワードの再設定".into(),
            format!("{name}さん\nパスワード再設定の依頼を受け付けました。\n以下のリンクから新しいパスワードを設定してください。\n{link}\n心当たりがない場合はこのメールを破棄してください。"),
        )
    }
}
