#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize(&truncated, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 4;

/// Shrink the widest columns one char at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap an already padded cell in the ANSI color for its status or severity.
fn colorize(value: &str, padded: String) -> String {
    let code = match value {
        "approved" | "action_taken" | "resolved" | "low" => Some("32"),
        "pending" | "reviewing" | "in_review" | "new" | "open" | "medium" => Some("33"),
        "escalated" | "high" => Some("35"),
        "removed" | "critical" => Some("31"),
        "no_action" | "duplicate" | "closed" => Some("90"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_across_rows() {
        let rows = vec![
            vec!["m1".to_string(), "pending".to_string()],
            vec!["r12".to_string(), "in_review".to_string()],
        ];
        let table = render_entity_table(&["id", "status"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let col = lines[0].find("status").unwrap();
        assert_eq!(lines[2].find("pending"), Some(col));
        assert_eq!(lines[3].find("in_review"), Some(col));
    }

    #[test]
    fn long_cells_are_truncated_to_fit() {
        let rows = vec![vec![
            "m1".to_string(),
            "a very long title that will not fit in a narrow terminal".to_string(),
        ]];
        let table = render_entity_table(
            &["id", "title"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        assert!(table.lines().all(|l| l.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn color_wraps_known_statuses_only() {
        let rows = vec![vec!["removed".to_string(), "m1".to_string()]];
        let table = render_entity_table(
            &["status", "id"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("\u{1b}[31mremoved"));
        assert!(row.ends_with("m1  "));
    }
}
