use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The five days the cafeteria publishes a menu for, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
    ];

    /// Lowercase key used in JSON maps and for heading detection.
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Montag => "montag",
            Weekday::Dienstag => "dienstag",
            Weekday::Mittwoch => "mittwoch",
            Weekday::Donnerstag => "donnerstag",
            Weekday::Freitag => "freitag",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Weekday::Montag => "Montag",
            Weekday::Dienstag => "Dienstag",
            Weekday::Mittwoch => "Mittwoch",
            Weekday::Donnerstag => "Donnerstag",
            Weekday::Freitag => "Freitag",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Saturday and Sunday have no menu.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::from_index(date.weekday().num_days_from_monday() as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    #[serde(rename = "price_chf")]
    pub price: Option<String>,
}

impl MenuItem {
    pub fn priced(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: Some(price.into()),
        }
    }

    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
        }
    }
}

/// Dishes per weekday. Every weekday always has an entry, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekMenu {
    days: [Vec<MenuItem>; 5],
}

impl WeekMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, weekday: Weekday) -> &[MenuItem] {
        &self.days[weekday.index()]
    }

    pub fn set_day(&mut self, weekday: Weekday, items: Vec<MenuItem>) {
        self.days[weekday.index()] = items;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[MenuItem])> {
        Weekday::ALL
            .into_iter()
            .map(move |weekday| (weekday, self.day(weekday)))
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    pub fn total_items(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Replaces every day's list with the result of `f`.
    pub fn map_days(self, f: impl FnMut(Vec<MenuItem>) -> Vec<MenuItem>) -> Self {
        Self {
            days: self.days.map(f),
        }
    }
}

impl Serialize for WeekMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (weekday, items) in self.iter() {
            map.serialize_entry(weekday.key(), items)?;
        }
        map.end()
    }
}
