//! Submission rules for event dates, times and rooms.
//!
//! Everything takes the current local time as an argument so the rules can
//! be checked against a fixed clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::error::{AppError, AppResult};

pub const EARLIEST_START: (u32, u32) = (8, 30);
pub const LATEST_START: (u32, u32) = (15, 0);
// この時刻を過ぎたら当日のイベントは登録できない
pub const SAME_DAY_CUTOFF: (u32, u32) = (14, 0);

fn hm(t: (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(t.0, t.1, 0).unwrap_or(NaiveTime::MIN)
}

pub fn validate_location(location: &str) -> AppResult<()> {
    if location.len() == 3 && location.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::UnprocessableEntity(format!(
            "場所は3桁の部屋番号で指定してください: {location:?}"
        )))
    }
}

pub fn parse_event_time(time: &str) -> AppResult<NaiveTime> {
    let malformed =
        || AppError::UnprocessableEntity(format!("時刻は HH:MM 形式で指定してください: {time:?}"));

    let bytes = time.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !well_formed {
        return Err(malformed());
    }
    let parsed = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| malformed())?;

    if parsed < hm(EARLIEST_START) || parsed > hm(LATEST_START) {
        return Err(AppError::UnprocessableEntity(format!(
            "開始時刻は 08:30 から 15:00 の間で指定してください: {time}"
        )));
    }
    Ok(parsed)
}

pub fn validate_event_date(date: NaiveDate, now: NaiveDateTime) -> AppResult<()> {
    let today = now.date();
    if date < today {
        return Err(AppError::UnprocessableEntity(format!(
            "過去の日付は指定できません: {date}"
        )));
    }
    if date == today && now.time() > hm(SAME_DAY_CUTOFF) {
        return Err(AppError::UnprocessableEntity(
            "14:00 以降は当日のイベントを登録できません".into(),
        ));
    }
    Ok(())
}

pub fn validate_workshop_period(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::UnprocessableEntity(format!(
            "終了日（{end}）が開始日（{start}）より前になっています"
        )));
    }
    Ok(())
}

/// A date, start time and room that passed every submission rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
}

impl EventSchedule {
    pub fn parse(
        date: NaiveDate,
        time: &str,
        location: &str,
        now: NaiveDateTime,
    ) -> AppResult<Self> {
        validate_event_date(date, now)?;
        let time = parse_event_time(time)?;
        validate_location(location)?;
        Ok(Self {
            date,
            time,
            location: location.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[rstest]
    #[case("213", true)]
    #[case("000", true)]
    #[case("21", false)]
    #[case("21a", false)]
    #[case("2134", false)]
    #[case(" 213", false)]
    #[case("", false)]
    #[case("２１３", false)]
    fn location_must_be_three_digits(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(validate_location(input).is_ok(), ok);
    }

    #[rstest]
    #[case("08:30", true)]
    #[case("12:00", true)]
    #[case("15:00", true)]
    #[case("08:29", false)]
    #[case("15:01", false)]
    #[case("8:30", false)]
    #[case("08:30:00", false)]
    #[case("24:00", false)]
    #[case("ab:cd", false)]
    fn time_window_is_inclusive(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(parse_event_time(input).is_ok(), ok);
    }

    #[test]
    fn today_after_cutoff_is_rejected() {
        let now = at("2026-10-19", "14:30");
        assert!(validate_event_date(day("2026-10-19"), now).is_err());
        assert!(validate_event_date(day("2026-10-20"), now).is_ok());
    }

    #[test]
    fn today_before_cutoff_is_accepted() {
        let now = at("2026-10-19", "09:15");
        assert!(validate_event_date(day("2026-10-19"), now).is_ok());
        assert!(validate_event_date(day("2026-10-19"), at("2026-10-19", "14:00")).is_ok());
    }

    #[test]
    fn past_dates_are_rejected() {
        let now = at("2026-10-19", "09:00");
        assert!(validate_event_date(day("2026-10-18"), now).is_err());
    }

    #[test]
    fn schedule_parse_runs_every_rule() {
        let now = at("2026-10-19", "15:00");
        let ok = EventSchedule::parse(day("2026-10-20"), "10:00", "213", now).unwrap();
        assert_eq!(ok.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        assert!(EventSchedule::parse(day("2026-10-19"), "10:00", "213", now).is_err());
        assert!(EventSchedule::parse(day("2026-10-20"), "16:00", "213", now).is_err());
        assert!(EventSchedule::parse(day("2026-10-20"), "10:00", "21a", now).is_err());
    }

    #[test]
    fn workshop_period_must_not_end_before_start() {
        assert!(validate_workshop_period(day("2026-11-01"), day("2026-11-01")).is_ok());
        assert!(validate_workshop_period(day("2026-11-02"), day("2026-11-01")).is_err());
    }
}
