use std::fmt;

use tracing::{debug, info, warn};

use crate::items::{dedup_items, extract_items};
use crate::menu::WeekMenu;
use crate::normalize::{collapse_whitespace, normalize_lines};
use crate::segment::{segment_by_anchor, segment_by_weekday};

/// How the week was split into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Weekday headings were found and at least one day has dishes.
    WeekdayHeadings,
    /// Headings failed; the daily soup line served as the day separator.
    DailyAnchor,
    /// Neither worked. The week is empty.
    Unresolved,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::WeekdayHeadings => "weekday-headings",
            Strategy::DailyAnchor => "daily-anchor",
            Strategy::Unresolved => "unresolved",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub menu: WeekMenu,
    pub strategy: Strategy,
}

fn by_weekday_headings(lines: &[String]) -> WeekMenu {
    let mut menu = WeekMenu::new();
    let blob = lines.join("\n").to_lowercase();

    let segments = match segment_by_weekday(&blob) {
        Ok(segments) => segments,
        Err(err) => {
            debug!(reason = "weekday-headings-insufficient", found = err.found, "{err}");
            return menu;
        }
    };

    for segment in segments {
        let segment_lines: Vec<String> = segment
            .text
            .lines()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect();
        debug!(
            weekday = segment.weekday.key(),
            start = segment.start,
            end = segment.end,
            lines = segment_lines.len(),
            "weekday segment"
        );
        menu.set_day(segment.weekday, extract_items(&segment_lines));
    }
    menu
}

fn by_daily_anchor(lines: &[String]) -> Option<WeekMenu> {
    match segment_by_anchor(lines) {
        Ok(blocks) => {
            let mut menu = WeekMenu::new();
            for block in blocks {
                menu.set_day(block.weekday, extract_items(block.lines));
            }
            Some(menu)
        }
        Err(err) => {
            warn!(reason = "fallback-anchor-insufficient", found = err.found, "{err}");
            None
        }
    }
}

/// Parses the raw text lines of one weekly menu PDF.
///
/// Never fails: layouts the heuristics do not understand produce an empty or
/// partial week, and the returned [`Strategy`] says which path was taken.
pub fn parse_week_lines_with_strategy<S: AsRef<str>>(raw_lines: &[S]) -> ParseOutcome {
    let lines = normalize_lines(raw_lines);
    debug!(raw = raw_lines.len(), normalized = lines.len(), "normalized lines");

    let mut menu = by_weekday_headings(&lines);
    let mut strategy = Strategy::WeekdayHeadings;

    if menu.is_empty() {
        info!(
            reason = "primary-empty",
            "weekday headings produced no dishes, trying daily anchors"
        );
        match by_daily_anchor(&lines) {
            Some(anchored) => {
                menu = anchored;
                strategy = Strategy::DailyAnchor;
            }
            None => strategy = Strategy::Unresolved,
        }
    }

    let menu = menu.map_days(dedup_items);
    if menu.is_empty() {
        strategy = Strategy::Unresolved;
    }
    info!(%strategy, dishes = menu.total_items(), "parsed weekly menu");

    ParseOutcome { menu, strategy }
}

pub fn parse_week_lines<S: AsRef<str>>(raw_lines: &[S]) -> WeekMenu {
    parse_week_lines_with_strategy(raw_lines).menu
}
