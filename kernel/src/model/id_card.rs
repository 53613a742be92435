use crate::model::{role::Role, user::User};
use chrono::{Months, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCard {
    pub card_number: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
    pub photo_url: Option<String>,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
}

impl IdCard {
    pub fn issue(user: &User, today: NaiveDate) -> Self {
        let id = user.id.raw().simple().to_string().to_uppercase();
        Self {
            card_number: format!("CM-{}", &id[..8]),
            name: user.name.clone(),
            role: user.role,
            email: user.email.clone(),
            student_id: user.profile.student_id.clone(),
            major: user.profile.major.clone(),
            year_level: user.profile.year_level,
            semester: user.profile.semester.clone(),
            photo_url: user.profile.profile_image_url.clone(),
            issued_on: today,
            valid_until: today.checked_add_months(Months::new(12)).unwrap_or(today),
        }
    }

    pub fn render_svg(&self) -> String {
        let mut rows: Vec<(&str, String)> = vec![("Role", capitalize(self.role.as_ref()))];
        if let Some(v) = &self.student_id {
            rows.push(("Student ID", v.clone()));
        }
        if let Some(v) = &self.major {
            rows.push(("Major", v.clone()));
        }
        match (self.year_level, &self.semester) {
            (Some(y), Some(s)) => rows.push(("Year / Semester", format!("{y} / {s}"))),
            (Some(y), None) => rows.push(("Year", y.to_string())),
            (None, Some(s)) => rows.push(("Semester", s.clone())),
            (None, None) => {}
        }
        rows.push(("Email", self.email.clone()));
        rows.push(("Valid", format!("{} - {}", self.issued_on, self.valid_until)));

        let mut svg = String::with_capacity(2048);
        svg.push_str(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="540" height="340" viewBox="0 0 540 340">"##,
        );
        svg.push_str(r##"<rect x="0" y="0" width="540" height="340" rx="18" fill="#0f172a"/>"##);
        svg.push_str(r##"<rect x="0" y="0" width="540" height="64" rx="18" fill="#2563eb"/>"##);
        svg.push_str(
            r##"<text x="24" y="42" font-family="sans-serif" font-size="24" font-weight="bold" fill="#ffffff">CLUB MEMBER ID</text>"##,
        );
        svg.push_str(&format!(
            r##"<text x="516" y="42" text-anchor="end" font-family="monospace" font-size="16" fill="#dbeafe">{}</text>"##,
            escape_xml(&self.card_number)
        ));

        // 写真が無い場合はイニシャルで代用する
        match &self.photo_url {
            Some(url) => svg.push_str(&format!(
                r##"<image x="24" y="88" width="140" height="170" preserveAspectRatio="xMidYMid slice" href="{0}" xlink:href="{0}"/>"##,
                escape_xml(url)
            )),
            None => {
                svg.push_str(r##"<rect x="24" y="88" width="140" height="170" rx="8" fill="#334155"/>"##);
                svg.push_str(&format!(
                    r##"<text x="94" y="190" text-anchor="middle" font-family="sans-serif" font-size="48" fill="#e2e8f0">{}</text>"##,
                    escape_xml(&initials(&self.name))
                ));
            }
        }

        svg.push_str(&format!(
            r##"<text x="188" y="112" font-family="sans-serif" font-size="22" font-weight="bold" fill="#f8fafc">{}</text>"##,
            escape_xml(&self.name)
        ));
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = 144 + i as i32 * 26;
            svg.push_str(&format!(
                r##"<text x="188" y="{y}" font-family="sans-serif" font-size="14" fill="#94a3b8">{}</text>"##,
                escape_xml(label)
            ));
            svg.push_str(&format!(
                r##"<text x="318" y="{y}" font-family="sans-serif" font-size="14" fill="#e2e8f0">{}</text>"##,
                escape_xml(value)
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        id::UserId,
        user::{MemberProfile, User},
    };
    use chrono::Utc;

    fn member(name: &str, photo: Option<&str>) -> User {
        User {
            id: UserId::new(),
            email: "kana@example.com".into(),
            name: name.into(),
            role: Role::Student,
            email_verified: true,
            profile: MemberProfile {
                student_id: Some("S1234567".into()),
                major: Some("Computer Science".into()),
                year_level: Some(2),
                semester: Some("Fall".into()),
                profile_image_url: photo.map(str::to_string),
                ..Default::default()
            },
            registered_events: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_copies_profile_and_sets_one_year_validity() {
        let user = member("Kana Ito", None);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let card = IdCard::issue(&user, today);

        assert!(card.card_number.starts_with("CM-"));
        assert_eq!(card.card_number.len(), 11);
        assert_eq!(card.student_id.as_deref(), Some("S1234567"));
        assert_eq!(card.valid_until, NaiveDate::from_ymd_opt(2027, 10, 19).unwrap());
    }

    #[test]
    fn svg_uses_initials_without_photo() {
        let card = IdCard::issue(&member("Kana Ito", None), Utc::now().date_naive());
        let svg = card.render_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">KI</text>"));
        assert!(svg.contains("Year / Semester"));
    }

    #[test]
    fn svg_escapes_user_supplied_text() {
        let card = IdCard::issue(
            &member("<script>alert(1)</script>", Some("https://img.example/a.png?x=1&y=\"2\"")),
            Utc::now().date_naive(),
        );
        let svg = card.render_svg();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("x=1&amp;y=&quot;2&quot;"));
    }
}
