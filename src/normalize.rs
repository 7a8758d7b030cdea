//! Text cleanup applied to every line the PDF extractor hands us.

/// Lines whose lowercase form starts with one of these are page headers.
const BOILERPLATE_PREFIXES: &[&str] = &["menüplan"];

/// Week-number markers ("KW 43") show up in headers and footers.
const WEEK_NUMBER_MARKERS: &[&str] = &["kw"];

const MIN_SPACED_RUN: usize = 3;

pub(crate) fn is_menu_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'Ä' | 'Ö' | 'Ü' | 'ä' | 'ö' | 'ü')
}

fn is_spaced_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_menu_letter(c))
}

fn flush_run(run: &mut Vec<&str>, out: &mut Vec<String>) {
    if run.len() >= MIN_SPACED_RUN {
        out.push(run.concat());
    } else {
        out.extend(run.iter().map(|token| token.to_string()));
    }
    run.clear();
}

/// Joins letter-spaced words back together: `"M O N T A G"` becomes `"MONTAG"`.
///
/// Only maximal runs of three or more single-letter tokens are merged; every
/// other token is kept as is. Whitespace in the result is collapsed to single
/// spaces, which makes the function idempotent.
pub fn desquash(text: &str) -> String {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for token in text.split_whitespace() {
        if is_spaced_letter(token) {
            run.push(token);
            continue;
        }
        flush_run(&mut run, &mut out);
        out.push(token.to_string());
    }
    flush_run(&mut run, &mut out);
    out.join(" ")
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_boilerplate(lower: &str) -> bool {
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
        || WEEK_NUMBER_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
}

/// Desquashes and trims every raw line, dropping empty lines and page headers.
pub fn normalize_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<String> {
    raw_lines
        .iter()
        .map(|line| desquash(line.as_ref()))
        .filter(|line| !line.is_empty() && !is_boilerplate(&line.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desquash_joins_spaced_heading() {
        assert_eq!(desquash("M O N T A G"), "MONTAG");
        assert_eq!(desquash("  D I E N S T A G  12.10."), "DIENSTAG 12.10.");
    }

    #[test]
    fn desquash_keeps_short_runs_and_words() {
        assert_eq!(desquash("Menu A oder B"), "Menu A oder B");
        assert_eq!(desquash("Pasta a b"), "Pasta a b");
        assert_eq!(desquash("Rösti mit Ei"), "Rösti mit Ei");
    }

    #[test]
    fn desquash_handles_umlauts_and_multiple_runs() {
        assert_eq!(desquash("G E M Ü S E und R E I S"), "GEMÜSE und REIS");
    }

    #[test]
    fn desquash_is_idempotent_on_mixed_input() {
        let once = desquash("F R E I T A G  Fisch  a b  C H F");
        assert_eq!(desquash(&once), once);
    }

    #[test]
    fn normalize_drops_headers_and_week_numbers() {
        let raw = [
            "Menüplan Restaurant",
            "  Woche KW 43  ",
            "",
            "   ",
            "M I T T W O C H",
            "Pasta   al   Pomodoro   CHF 11.50",
        ];
        assert_eq!(
            normalize_lines(&raw),
            vec!["MITTWOCH", "Pasta al Pomodoro CHF 11.50"]
        );
    }
}
