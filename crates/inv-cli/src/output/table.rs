const MIN_WIDTH: usize = 4;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

#[derive(Debug)]
struct Column {
    width: usize,
    min_width: usize,
    numeric: bool,
}

/// Render an aligned table for string rows.
///
/// Columns whose every populated cell is numeric are right-aligned. With
/// `max_width` set, the widest columns give up space first but never shrink
/// below their header.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut columns = measure(headers, rows);
    shrink_to_fit(&mut columns, options.max_width);

    let header_line = headers
        .iter()
        .zip(&columns)
        .map(|(header, column)| {
            let text = clip(header, column.width);
            let visible = char_len(&text);
            pad(&text, visible, column.width, false)
        })
        .collect::<Vec<_>>()
        .join(GAP);

    let total_width =
        columns.iter().map(|c| c.width).sum::<usize>() + GAP.len() * columns.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(total_width));

    for row in rows {
        let line = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = clip(value, column.width);
                let visible = char_len(&text);
                let text = if options.color { paint(&text) } else { text };
                pad(&text, visible, column.width, column.numeric)
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn measure(headers: &[&str], rows: &[Vec<String>]) -> Vec<Column> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header_width = char_len(header).max(MIN_WIDTH);
            let mut width = header_width;
            let mut populated = false;
            let mut all_numeric = true;

            for cell in rows.iter().filter_map(|row| row.get(index)) {
                width = width.max(char_len(cell));
                if cell != "-" {
                    populated = true;
                    all_numeric &= looks_numeric(cell);
                }
            }

            Column {
                width,
                min_width: header_width,
                numeric: populated && all_numeric,
            }
        })
        .collect()
}

fn shrink_to_fit(columns: &mut [Column], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let gaps = GAP.len() * columns.len().saturating_sub(1);
    let mut total = columns.iter().map(|c| c.width).sum::<usize>() + gaps;

    while total > max_width {
        let Some(widest) = columns
            .iter_mut()
            .filter(|column| column.width > column.min_width)
            .max_by_key(|column| column.width)
        else {
            break;
        };
        widest.width -= 1;
        total -= 1;
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn clip(value: &str, width: usize) -> String {
    if char_len(value) <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Pad to `width` using the visible length, which excludes colour codes.
fn pad(text: &str, visible: usize, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(visible));
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn paint(value: &str) -> String {
    let code = match value {
        "in_stock" | "pass" | "completed" => "32",
        "qc_required" | "repair" | "quarantine" | "returned" | "return_in" | "open" => "33",
        "qc_failed" | "fail" => "31",
        "sold" | "sale" => "36",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}
