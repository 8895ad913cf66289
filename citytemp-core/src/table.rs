//! Bordered console table for the temperature rows.

use comfy_table::{
    Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, TableComponent, Width,
    presets,
};
use std::io::{self, Write};

use crate::model::CityWeatherRow;

pub const HEADERS: [&str; 4] = ["City", "Current Weather", "Max Temperature", "Min Temperature"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Upper bound for every column; longer cells wrap.
    pub max_col_width: u16,
    pub center_separator: char,
    pub column_separator: char,
    pub row_separator: char,
    pub header_alignment: CellAlignment,
    pub cell_alignment: CellAlignment,
    /// Draw a separator line between data rows.
    pub row_lines: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            max_col_width: 20,
            center_separator: '*',
            column_separator: '|',
            row_separator: '-',
            header_alignment: CellAlignment::Center,
            cell_alignment: CellAlignment::Left,
            row_lines: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    style: TableStyle,
}

impl TableRenderer {
    pub fn new(style: TableStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Render the full table, header included, as a string ending in a newline.
    pub fn render(&self, rows: &[CityWeatherRow]) -> String {
        let mut out = self.build(rows).to_string();
        out.push('\n');
        out
    }

    pub fn write_to<W: Write>(&self, rows: &[CityWeatherRow], mut out: W) -> io::Result<()> {
        out.write_all(self.render(rows).as_bytes())?;
        out.flush()
    }

    fn build(&self, rows: &[CityWeatherRow]) -> Table {
        let style = &self.style;
        let mut table = Table::new();

        table
            .load_preset(presets::ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(HEADERS.map(|title| {
                Cell::new(title).set_alignment(style.header_alignment)
            }));

        for component in [
            TableComponent::LeftBorder,
            TableComponent::RightBorder,
            TableComponent::VerticalLines,
        ] {
            table.set_style(component, style.column_separator);
        }
        for component in [
            TableComponent::TopBorder,
            TableComponent::BottomBorder,
            TableComponent::HeaderLines,
            TableComponent::HorizontalLines,
        ] {
            table.set_style(component, style.row_separator);
        }
        for component in [
            TableComponent::LeftHeaderIntersection,
            TableComponent::MiddleHeaderIntersections,
            TableComponent::RightHeaderIntersection,
            TableComponent::MiddleIntersections,
            TableComponent::LeftBorderIntersections,
            TableComponent::RightBorderIntersections,
            TableComponent::TopBorderIntersections,
            TableComponent::BottomBorderIntersections,
            TableComponent::TopLeftCorner,
            TableComponent::TopRightCorner,
            TableComponent::BottomLeftCorner,
            TableComponent::BottomRightCorner,
        ] {
            table.set_style(component, style.center_separator);
        }
        if !style.row_lines {
            table.remove_style(TableComponent::HorizontalLines);
        }

        for row in rows {
            table.add_row(row.cells());
        }

        let limit = style.max_col_width;
        for column in table.column_iter_mut() {
            column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(limit)));
            column.set_cell_alignment(style.cell_alignment);
        }

        table
    }
}
