//! Plain-text rendering for terminal output

use shared::Paginated;
use shared::util::format_currency;
use tavola_client::views::PageControl;

/// Column-aligned table
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(render_line(self.headers.iter().copied(), &widths));
        out.push(render_line(separators.iter().map(String::as_str), &widths));
        for row in &self.rows {
            out.push(render_line(row.iter().map(String::as_str), &widths));
        }
        out.join("\n")
    }

    pub fn print(&self) {
        if self.is_empty() {
            println!("(no results)");
        } else {
            println!("{}", self.render());
        }
    }
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Page buttons shown in a footer
const PAGER_BUTTONS: u32 = 9;

/// Footer under a paginated list: `Page 2 of 3 (25 total)  [1] (2) [3]`
pub fn pager<T>(page: &Paginated<T>) -> String {
    let control = PageControl::from_page(page);
    let mut buttons: Vec<String> = control
        .window(PAGER_BUTTONS)
        .map(|b| {
            if b.current {
                format!("({})", b.page)
            } else {
                format!("[{}]", b.page)
            }
        })
        .collect();
    if control.total_pages > PAGER_BUTTONS {
        let first = control.window(PAGER_BUTTONS).next().map_or(1, |b| b.page);
        let last = control.window(PAGER_BUTTONS).last().map_or(1, |b| b.page);
        if first > 1 {
            buttons.insert(0, "…".into());
        }
        if last < control.total_pages {
            buttons.push("…".into());
        }
    }
    let buttons = buttons.join(" ");
    format!(
        "Page {} of {} ({} total)  {}",
        control.current,
        control.total_pages.max(1),
        page.total,
        buttons
    )
    .trim_end()
    .to_string()
}

pub fn money(amount: f64, currency: &str) -> String {
    format_currency(amount, currency)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
