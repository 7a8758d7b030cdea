use chrono::{Datelike, Local, NaiveDate};

use crate::menu::Weekday;

/// Today's date in the process time zone. Deployments run with
/// `TZ=Europe/Zurich`.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Calendar dates of Monday to Friday in the week containing `today`.
pub fn week_dates(today: NaiveDate) -> [(Weekday, NaiveDate); 5] {
    let monday = week_start(today);
    Weekday::ALL.map(|weekday| {
        (
            weekday,
            monday + chrono::Duration::days(weekday.index() as i64),
        )
    })
}

pub fn date_for(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    week_start(today) + chrono::Duration::days(weekday.index() as i64)
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
