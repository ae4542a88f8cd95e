//! Search results region.
//!
//! # Design
//! The table is kept as structured rows and rendered on demand: `to_html`
//! produces the markup for a page host, `Display` a plain-text grid for a
//! terminal host. Both list rows in the order the server returned them.

use std::fmt;

use crate::types::Recommendation;

const HEADERS: [&str; 5] = ["ID", "Product A", "Product B", "Recommendation Type", "Likes"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    rows: Vec<Recommendation>,
}

impl ResultsTable {
    pub fn new(rows: Vec<Recommendation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Recommendation] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<table class="table-striped" cellpadding="10">"#);
        html.push_str("<tr>");
        for header in HEADERS {
            html.push_str(r#"<th style="width:5%">"#);
            html.push_str(header);
            html.push_str("</th>");
        }
        html.push_str("</tr>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in cells(row) {
                html.push_str("<td>");
                html.push_str(&escape_html(cell));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = HEADERS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(cells(row)) {
                *width = (*width).max(cell.chars().count());
            }
        }
        write_line(f, HEADERS, &widths)?;
        for row in &self.rows {
            write_line(f, cells(row), &widths)?;
        }
        Ok(())
    }
}

fn cells(row: &Recommendation) -> [&str; 5] {
    [&row.id, &row.product_a, &row.product_b, &row.recom_type, &row.likes]
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: [&str; 5], widths: &[usize; 5]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(f, "{}", line.trim_end())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
