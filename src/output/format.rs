use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

pub(super) fn format_number(n: i64) -> String {
    let (sign, digits) = if n < 0 {
        ("-", (-n).to_string())
    } else {
        ("", n.to_string())
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();
    format!("{sign}{formatted}")
}

/// Two-decimal USD amount; "N/A" when the value is unknown.
pub(super) fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => "N/A".to_string(),
    }
}

/// Four-decimal per-million-token price.
pub(super) fn format_rate(value: f64) -> String {
    format!("${value:.4}")
}

/// Six-decimal price for small per-unit amounts (image generation).
pub(super) fn format_unit_price(value: f64) -> String {
    format!("${value:.6}")
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_with_commas() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-1234), "-1,234");
    }

    #[test]
    fn format_usd_handles_unknown() {
        assert_eq!(format_usd(Some(1.234)), "$1.23");
        assert_eq!(format_usd(None), "N/A");
    }

    #[test]
    fn format_rate_four_decimals() {
        assert_eq!(format_rate(0.069), "$0.0690");
        assert_eq!(format_rate(0.138), "$0.1380");
    }

    #[test]
    fn format_unit_price_six_decimals() {
        assert_eq!(format_unit_price(0.0092), "$0.009200");
    }
}
