//! report.rs
//!
//! Plain-text profile cards for the CLI.
//!
//! ```text
//! Mochi -----------------------------------------------
//! Species: ........................................ Dog
//! Age: ........ 2 years 3 months (human age: about 24 years)
//! ```

const MIN_ALIGN_WIDTH: usize = 50;

pub enum Line {
    Header(String),
    Blank,
    Row { key: String, value: String },
}

impl Line {
    pub fn row(key: impl Into<String>, value: impl Into<String>) -> Self {
        Line::Row {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Splits a row into key, dot leader and value so every value ends in the
/// same column.
pub fn build_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count());
    format!("{base}{}", "-".repeat(dash_count))
}

pub fn render_card(lines: &[Line]) -> String {
    let align_width = lines
        .iter()
        .map(|line| match line {
            Line::Row { key, value } => key.chars().count() + 2 + value.chars().count() + 1,
            Line::Header(text) => text.chars().count() + 1,
            Line::Blank => 0,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_ALIGN_WIDTH);

    let mut out = String::new();
    for line in lines {
        match line {
            Line::Header(text) => out.push_str(&build_header_line(text, align_width)),
            Line::Blank => {}
            Line::Row { key, value } => {
                let (k, d, v) = build_row(key, value, align_width);
                out.push_str(&k);
                out.push_str(&d);
                out.push_str(&v);
            }
        }
        out.push('\n');
    }

    out
}
