//! Splitting normalized menu text into one chunk per weekday.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::menu::Weekday;

/// Each weekday name, letter by letter with optional whitespace in between,
/// so headings rendered with letter spacing still match.
static WEEKDAY_PATTERNS: Lazy<Vec<(Weekday, Regex)>> = Lazy::new(|| {
    Weekday::ALL
        .into_iter()
        .map(|weekday| {
            let letters: Vec<String> = weekday.key().chars().map(|c| c.to_string()).collect();
            let pattern = format!(r"(?i){}", letters.join(r"\s*"));
            let regex = Regex::new(&pattern).expect("weekday pattern is valid");
            (weekday, regex)
        })
        .collect()
});

/// Minimum number of located headings for the heading strategy to apply.
pub const MIN_WEEKDAY_HITS: usize = 2;

/// The daily soup line appears once in every day's section.
const ANCHOR_PARTS: [&str; 2] = ["tagessuppe", "klein"];

pub const REQUIRED_ANCHORS: usize = Weekday::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayHit {
    pub weekday: Weekday,
    /// Byte offset of the first match in the blob.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSegment<'a> {
    pub weekday: Weekday,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSegment<'a> {
    pub weekday: Weekday,
    pub lines: &'a [String],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("found {found} weekday headings, need at least {min}", min = MIN_WEEKDAY_HITS)]
pub struct InsufficientHeadings {
    pub found: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("found {found} daily anchors, need at least {min}", min = REQUIRED_ANCHORS)]
pub struct InsufficientAnchors {
    pub found: usize,
}

/// First occurrence of every weekday name in `blob`, in canonical weekday
/// order. Weekdays that never appear are left out.
pub fn locate_weekdays(blob: &str) -> Vec<WeekdayHit> {
    WEEKDAY_PATTERNS
        .iter()
        .filter_map(|(weekday, regex)| {
            regex.find(blob).map(|m| WeekdayHit {
                weekday: *weekday,
                offset: m.start(),
            })
        })
        .collect()
}

/// Partitions `blob` at the located weekday headings.
///
/// Hits are ordered by offset, not by weekday, and each segment runs from its
/// heading up to the next heading (or the end of the blob). Text before the
/// first heading belongs to no weekday.
pub fn segment_by_weekday(blob: &str) -> Result<Vec<BlobSegment<'_>>, InsufficientHeadings> {
    let mut hits = locate_weekdays(blob);
    if hits.len() < MIN_WEEKDAY_HITS {
        return Err(InsufficientHeadings { found: hits.len() });
    }
    hits.sort_by_key(|hit| hit.offset);

    let ends = hits
        .iter()
        .skip(1)
        .map(|hit| hit.offset)
        .chain(std::iter::once(blob.len()));
    Ok(hits
        .iter()
        .zip(ends)
        .map(|(hit, end)| BlobSegment {
            weekday: hit.weekday,
            start: hit.offset,
            end,
            text: &blob[hit.offset..end],
        })
        .collect())
}

pub fn is_anchor_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ANCHOR_PARTS.iter().all(|part| lower.contains(part))
}

pub fn find_anchor_lines(lines: &[String]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_anchor_line(line))
        .map(|(index, _)| index)
        .collect()
}

/// Splits the lines into five blocks, each starting at a daily anchor line.
///
/// Block `i` runs from anchor `i` up to anchor `i + 1`, or to the last line
/// when there is no further anchor. Anchors past the fifth only close the
/// Friday block.
pub fn segment_by_anchor(lines: &[String]) -> Result<Vec<LineSegment<'_>>, InsufficientAnchors> {
    let anchors = find_anchor_lines(lines);
    if anchors.len() < REQUIRED_ANCHORS {
        return Err(InsufficientAnchors {
            found: anchors.len(),
        });
    }

    Ok(Weekday::ALL
        .into_iter()
        .enumerate()
        .map(|(i, weekday)| {
            let start = anchors[i];
            let end = anchors.get(i + 1).copied().unwrap_or(lines.len());
            LineSegment {
                weekday,
                lines: &lines[start..end],
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn locates_letter_spaced_and_plain_headings() {
        let blob = "montag\nsuppe\nd i e n s t a g\nfisch\nfreitag\npizza";
        let hits = locate_weekdays(blob);
        assert_eq!(
            hits,
            vec![
                WeekdayHit {
                    weekday: Weekday::Montag,
                    offset: 0
                },
                WeekdayHit {
                    weekday: Weekday::Dienstag,
                    offset: 13
                },
                WeekdayHit {
                    weekday: Weekday::Freitag,
                    offset: blob.find("freitag").unwrap()
                },
            ]
        );
    }

    #[test]
    fn only_first_occurrence_counts() {
        let blob = "montag a\nmontag b";
        let hits = locate_weekdays(blob);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].offset, 0);
    }

    #[test]
    fn segments_cover_blob_exactly_from_first_heading() {
        let blob = "kopf\nmittwoch\nrisotto\nmontag\nsalat\ndonnerstag\ncurry";
        let segments = segment_by_weekday(blob).unwrap();

        let order: Vec<Weekday> = segments.iter().map(|s| s.weekday).collect();
        assert_eq!(
            order,
            vec![Weekday::Mittwoch, Weekday::Montag, Weekday::Donnerstag]
        );
        assert_eq!(segments[0].text, "mittwoch\nrisotto\n");
        assert_eq!(segments[1].text, "montag\nsalat\n");
        assert_eq!(segments[2].text, "donnerstag\ncurry");

        assert_eq!(segments[0].start, blob.find("mittwoch").unwrap());
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(segments.last().unwrap().end, blob.len());
    }

    #[test]
    fn single_heading_is_insufficient() {
        assert_eq!(
            segment_by_weekday("montag\nsuppe"),
            Err(InsufficientHeadings { found: 1 })
        );
        assert_eq!(
            segment_by_weekday(""),
            Err(InsufficientHeadings { found: 0 })
        );
    }

    #[test]
    fn anchor_blocks_start_at_each_soup_line() {
        let input = lines(&[
            "Einleitung",
            "Tagessuppe klein CHF 4.50",
            "Pasta CHF 11.00",
            "TAGESSUPPE KLEIN CHF 4.50",
            "Curry CHF 12.00",
            "Tagessuppe klein CHF 4.50",
            "Tagessuppe klein CHF 4.50",
            "Fisch CHF 14.00",
            "Tagessuppe klein CHF 4.50",
            "Pizza CHF 13.00",
            "Dessert CHF 5.00",
        ]);
        let blocks = segment_by_anchor(&input).unwrap();
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0].weekday, Weekday::Montag);
        assert_eq!(blocks[0].lines, &input[1..3]);
        assert_eq!(blocks[2].lines, &input[5..6]);
        assert_eq!(blocks[4].weekday, Weekday::Freitag);
        assert_eq!(blocks[4].lines, &input[8..]);
    }

    #[test]
    fn sixth_anchor_closes_friday_block() {
        let mut raw = Vec::new();
        for dish in ["a", "b", "c", "d", "e", "f"] {
            raw.push("Tagessuppe klein");
            raw.push(dish);
        }
        let input = lines(&raw);
        let blocks = segment_by_anchor(&input).unwrap();
        assert_eq!(blocks[4].lines, &input[8..10]);
    }

    #[test]
    fn fewer_than_five_anchors_yield_nothing() {
        let input = lines(&["Tagessuppe klein", "Tagessuppe klein", "Tagessuppe gross"]);
        assert_eq!(
            segment_by_anchor(&input),
            Err(InsufficientAnchors { found: 2 })
        );
    }
}
