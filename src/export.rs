use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{date_for, format_date};
use crate::error::{MenuError, Result};
use crate::menu::{WeekMenu, Weekday};

/// One dish as a flat row, the shape of every JSON and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRecord {
    pub date: String,
    pub weekday: String,
    pub title: String,
    pub price_chf: Option<String>,
    pub source: String,
}

pub fn day_records(
    week: &WeekMenu,
    weekday: Weekday,
    date: NaiveDate,
    source: &str,
) -> Vec<MenuRecord> {
    week.day(weekday)
        .iter()
        .map(|item| MenuRecord {
            date: format_date(date),
            weekday: weekday.display_name().to_string(),
            title: item.title.clone(),
            price_chf: item.price.clone(),
            source: source.to_string(),
        })
        .collect()
}

/// Today's dishes; empty on Saturday and Sunday.
pub fn today_records(week: &WeekMenu, today: NaiveDate, source: &str) -> Vec<MenuRecord> {
    match Weekday::from_date(today) {
        Some(weekday) => day_records(week, weekday, today, source),
        None => Vec::new(),
    }
}

pub fn week_records(week: &WeekMenu, today: NaiveDate, source: &str) -> Vec<MenuRecord> {
    Weekday::ALL
        .into_iter()
        .flat_map(|weekday| day_records(week, weekday, date_for(today, weekday), source))
        .collect()
}

pub fn records_to_csv(records: &[MenuRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| MenuError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuItem;

    fn sample_week() -> WeekMenu {
        let mut week = WeekMenu::new();
        week.set_day(
            Weekday::Montag,
            vec![MenuItem::priced("Tagessuppe klein", "4.50")],
        );
        week.set_day(
            Weekday::Freitag,
            vec![
                MenuItem::priced("Fischknusperli, Tartar", "13.90"),
                MenuItem::title_only("Salatbuffet"),
            ],
        );
        week
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_on_monday() {
        let records = today_records(&sample_week(), date(2026, 10, 19), "https://x/menu.pdf");
        assert_eq!(
            records,
            vec![MenuRecord {
                date: "2026-10-19".into(),
                weekday: "Montag".into(),
                title: "Tagessuppe klein".into(),
                price_chf: Some("4.50".into()),
                source: "https://x/menu.pdf".into(),
            }]
        );
    }

    #[test]
    fn weekend_has_no_today_records() {
        assert!(today_records(&sample_week(), date(2026, 10, 24), "").is_empty());
    }

    #[test]
    fn week_records_follow_weekday_order_with_dates() {
        let records = week_records(&sample_week(), date(2026, 10, 21), "");
        let days: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.weekday.as_str(), r.date.as_str()))
            .collect();
        assert_eq!(
            days,
            vec![
                ("Montag", "2026-10-19"),
                ("Freitag", "2026-10-23"),
                ("Freitag", "2026-10-23"),
            ]
        );
    }

    #[test]
    fn csv_has_header_quotes_commas_and_blank_prices() {
        let records = week_records(&sample_week(), date(2026, 10, 19), "src");
        let csv = records_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,weekday,title,price_chf,source");
        assert_eq!(lines[1], "2026-10-19,Montag,Tagessuppe klein,4.50,src");
        assert_eq!(lines[2], "2026-10-23,Freitag,\"Fischknusperli, Tartar\",13.90,src");
        assert_eq!(lines[3], "2026-10-23,Freitag,Salatbuffet,,src");
    }
}
