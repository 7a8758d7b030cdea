//! Turning one weekday's text into dish entries.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::menu::MenuItem;
use crate::normalize::{collapse_whitespace, is_menu_letter};

/// Two or more comma-separated single capitals, e.g. `A, C, G`.
static ALLERGEN_CODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-ZÄÖÜ](?:\s*,\s*[A-ZÄÖÜ])+\b").expect("allergen pattern is valid")
});

/// Legend and footer text runs from one of these keywords to the end.
static LEGEND_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:allerg(?:ene|ien)|icon|info|bio)\b.*$").expect("legend pattern is valid")
});

static PRICE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)CHF\s*(\d{1,2}[.,]\d{2})").expect("price pattern is valid")
});

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zäöü])([A-ZÄÖÜ])").expect("camel pattern is valid"));

static REPEATED_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("space pattern is valid"));

/// Soup names the PDF glues to their portion size.
const WORD_MERGE_FIXES: [(&str, &str); 2] = [
    ("Tagessuppeklein", "Tagessuppe klein"),
    ("Tagessuppegross", "Tagessuppe gross"),
];

const TITLE_TRIM: &[char] = &[' ', ',', ';', ':', '-'];
const LINE_TRIM: &[char] = &[' ', ',', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PricedSpan<'a> {
    title: &'a str,
    price: &'a str,
}

/// A price only ends a dish when the next dish name, another `CHF` or the end
/// of the text follows. Anything else (digits, slashes) means the marker is
/// part of the current title.
fn closes_dish(rest: &str) -> bool {
    match rest.trim_start().chars().next() {
        None => true,
        Some(c) => is_menu_letter(c),
    }
}

/// Finds `<title> CHF <price>` spans left to right. Each title starts where
/// the previous span ended and reaches up to the first price marker that
/// closes a dish.
fn priced_spans(text: &str) -> Vec<PricedSpan<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    'spans: while pos < text.len() {
        let mut search_from = pos;
        loop {
            let Some(caps) = PRICE_MARKER.captures_at(text, search_from) else {
                break 'spans;
            };
            let (Some(marker), Some(price)) = (caps.get(0), caps.get(1)) else {
                break 'spans;
            };
            // The marker starts with an ASCII 'C', so +1 stays on a char boundary.
            search_from = marker.start() + 1;
            if marker.start() == pos || !closes_dish(&text[marker.end()..]) {
                continue;
            }
            spans.push(PricedSpan {
                title: &text[pos..marker.start()],
                price: price.as_str(),
            });
            pos = marker.end();
            continue 'spans;
        }
    }

    spans
}

fn clean_title(raw: &str) -> String {
    let mut title = raw.trim_matches(TITLE_TRIM).to_string();
    for (glued, fixed) in WORD_MERGE_FIXES {
        title = title.replace(glued, fixed);
    }
    let title = CAMEL_BOUNDARY.replace_all(&title, "$1 $2");
    REPEATED_SPACES.replace_all(&title, " ").into_owned()
}

/// Removes allergen codes and the trailing legend from a joined day text.
pub fn strip_decorations(text: &str) -> String {
    let text = ALLERGEN_CODES.replace_all(text, "");
    LEGEND_TAIL.replace_all(&text, "").into_owned()
}

/// Extracts the dishes of one weekday.
///
/// Lines are joined and split on price markers, since the PDF puts several
/// dishes with their prices on one line. When no price is found at all, every
/// non-empty line becomes one unpriced item.
pub fn extract_items<S: AsRef<str>>(lines: &[S]) -> Vec<MenuItem> {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let text = strip_decorations(&collapse_whitespace(&joined));

    let items: Vec<MenuItem> = priced_spans(&text)
        .into_iter()
        .filter_map(|span| {
            let title = clean_title(span.title);
            (!title.is_empty()).then(|| MenuItem::priced(title, span.price.replace(',', ".")))
        })
        .collect();
    if !items.is_empty() {
        return items;
    }

    lines
        .iter()
        .map(|line| collapse_whitespace(line.as_ref()))
        .map(|line| line.trim_matches(LINE_TRIM).to_string())
        .filter(|title| !title.is_empty())
        .map(MenuItem::title_only)
        .collect()
}

/// Drops repeated dishes, comparing titles case-insensitively together with
/// the price. The first occurrence keeps its position.
pub fn dedup_items(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.title.to_lowercase(), item.price.clone())))
        .collect()
}
