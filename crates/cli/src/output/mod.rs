//! Output formatting module for Veranda
//!
//! Provides table formatting and display utilities for CLI output.

use veranda_db::Property;

/// Maximum width for the name column before truncation
const MAX_NAME_WIDTH: usize = 28;

/// Maximum width for the location column before truncation
const MAX_LOCATION_WIDTH: usize = 20;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
///
/// Width is measured in characters, so multi-byte names truncate cleanly.
fn truncate(s: &str, max_width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

/// Format a price in rupees for display.
///
/// Prices at lakh scale and above use the Indian L / Cr units;
/// smaller values get thousands grouping. Zero renders as "-" since
/// it stands for an unknown price.
pub fn format_price(price: u64) -> String {
    const LAKH: u64 = 100_000;
    const CRORE: u64 = 10_000_000;

    if price == 0 {
        "-".to_string()
    } else if price >= CRORE {
        format!("{:.2} Cr", price as f64 / CRORE as f64)
    } else if price >= LAKH {
        format!("{:.2} L", price as f64 / LAKH as f64)
    } else {
        group_thousands(price)
    }
}

/// Format a carpet area for display.
pub fn format_area(carpet_area: u32) -> String {
    if carpet_area == 0 {
        "-".to_string()
    } else {
        format!("{} sqft", carpet_area)
    }
}

/// Format a bedroom count for display.
pub fn format_bhk(bhk: u8) -> String {
    if bhk == 0 {
        "-".to_string()
    } else {
        format!("{} BHK", bhk)
    }
}

/// Insert comma separators every three digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format properties into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID       Name            Location     Type       Price    Area       BHK    Status
/// -------  --------------  -----------  ---------  -------  ---------  -----  ------
/// skyline  Skyline Towers  Baner, Pune  Apartment  72.00 L  1100 sqft  2 BHK  Ready
/// ```
///
/// # Arguments
///
/// * `properties` - Slice of properties to format
///
/// # Returns
///
/// A formatted string containing the table, or an empty result message
/// if there are no properties.
pub fn format_property_table(properties: &[Property]) -> String {
    if properties.is_empty() {
        return "No listings found.".to_string();
    }

    // Column headers
    let headers = [
        "ID", "Name", "Location", "Type", "Price", "Area", "BHK", "Status",
    ];

    // Pre-render the formatted cells so widths come from what is shown
    let rows: Vec<[String; 8]> = properties
        .iter()
        .map(|p| {
            [
                p.id.clone(),
                truncate(&p.name, MAX_NAME_WIDTH),
                truncate(&p.location, MAX_LOCATION_WIDTH),
                p.property_type.clone(),
                format_price(p.price),
                format_area(p.carpet_area),
                format_bhk(p.bhk()),
                p.status.label().to_string(),
            ]
        })
        .collect();

    // Calculate column widths based on content
    let mut widths = [0usize; 8];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = rows
            .iter()
            .map(|r| r[i].chars().count())
            .max()
            .unwrap_or(0)
            .max(header.len());
    }

    let mut output = String::new();

    // Header row
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            output.push_str("  ");
        }
        output.push_str(&format!("{:<w$}", header, w = widths[i]));
    }
    output.push('\n');

    // Separator row
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            output.push_str("  ");
        }
        output.push_str(&"-".repeat(*width));
    }
    output.push('\n');

    // Data rows
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                output.push_str("  ");
            }
            let pad = widths[i].saturating_sub(cell.chars().count());
            output.push_str(cell);
            output.push_str(&" ".repeat(pad));
        }
        // Trim the padding on the last column
        while output.ends_with(' ') {
            output.pop();
        }
        output.push('\n');
    }

    // Remove trailing newline
    output.pop();

    output
}
