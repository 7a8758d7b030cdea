use std::fs;

use unisg_menu::normalize::normalize_lines;
use unisg_menu::source::extract_pdf_lines;
use unisg_menu::{logging, parse_week_lines_with_strategy};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: dump-pdf <menu.pdf>"))?;
    logging::init_cli_logger(true);

    let bytes = fs::read(&path)?;
    let lines = extract_pdf_lines(&bytes)?;

    println!("=== NORMALIZED LINES ===");
    for (i, line) in normalize_lines(&lines).iter().enumerate() {
        println!("{}: {:?}", i, line);
    }

    let outcome = parse_week_lines_with_strategy(&lines);
    println!("\n=== STRATEGY: {} ===", outcome.strategy);
    println!("{}", serde_json::to_string_pretty(&outcome.menu)?);

    Ok(())
}
