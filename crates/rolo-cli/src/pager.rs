//! Paged result display
//!
//! Shows one page at a time with continuous numbering and accepts
//! `NEXT`/`PREV`/`BACK`. Stepping past either end stays on the edge page.

use crate::session::prompt;
use rolo_core::{paginate, Page, Record};
use std::io::{self, BufRead, Write};
use std::time::Duration;

const RULE: &str = "------------------------------------------------------------";

/// Page through `records` until the user goes back or input ends
pub(crate) fn page_through<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    records: &[&Record],
    label: &str,
    elapsed: Duration,
    page_size: usize,
) -> io::Result<()> {
    if records.is_empty() {
        writeln!(output, "\n{label} search | {:.6}s", elapsed.as_secs_f64())?;
        writeln!(output, "no matching contacts")?;
        return Ok(());
    }

    let mut page = paginate(records, 1, page_size);
    write!(output, "\n{label} search | {:.6}s", elapsed.as_secs_f64())?;
    show(output, &page)?;

    let hint = if page.total_pages > 1 {
        "NEXT | PREV | BACK > "
    } else {
        "BACK > "
    };

    loop {
        let Some(line) = prompt(input, output, hint)? else {
            return Ok(());
        };
        match line.to_uppercase().as_str() {
            "NEXT" => {
                page = paginate(records, page.page + 1, page_size);
                show(output, &page)?;
            }
            "PREV" => {
                page = paginate(records, page.page.saturating_sub(1), page_size);
                show(output, &page)?;
            }
            "BACK" => {
                writeln!(output, "back to main menu")?;
                return Ok(());
            }
            _ => writeln!(output, "invalid input, use NEXT, PREV or BACK")?,
        }
    }
}

fn show<W: Write>(output: &mut W, page: &Page<'_, &Record>) -> io::Result<()> {
    writeln!(
        output,
        "\npage {}/{} | {} total",
        page.page, page.total_pages, page.total_count
    )?;
    writeln!(output, "{RULE}")?;
    for (offset, record) in page.items.iter().enumerate() {
        writeln!(output, "  {}. {record}", page.first_ordinal() + offset)?;
    }
    writeln!(output, "{RULE}")
}
