use crate::core::grid::{Row, cell_text};
use crate::error::{AppError, DisplayError};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 100;

/// Formatter for grid views and render results.
pub struct GridRenderer {
    max_width: Option<usize>,
    use_colors: bool,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Detect terminal width, clamped for stability.
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render a grid view in table format.
    ///
    /// Headers show the column name capitalized. An absent cell displays as
    /// "undefined", the same string the grid uses for filter and sort.
    pub fn render_grid(&self, columns: &[String], rows: &[&Row]) -> Result<String, AppError> {
        if columns.is_empty() {
            return Err(AppError::Display(DisplayError::TableFormat(
                "no columns to display".to_string(),
            )));
        }
        if rows.is_empty() {
            return Ok("Report contains no matching rows.".to_string());
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        let headers: Vec<Cell> = columns
            .iter()
            .map(|name| {
                let header = Cell::new(capitalize(name)).add_attribute(Attribute::Bold);
                if self.use_colors {
                    header.fg(Color::Green)
                } else {
                    header
                }
            })
            .collect();
        table.set_header(headers);

        for row in rows {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|name| {
                    let cell = row.get(name.as_str());
                    let text = self.truncate_text(&cell_text(cell), MAX_CELL_WIDTH);
                    if self.use_colors && cell.is_none_or(|v| v.is_null()) {
                        Cell::new(text)
                            .fg(Color::DarkGrey)
                            .add_attribute(Attribute::Italic)
                    } else {
                        Cell::new(text)
                    }
                })
                .collect();
            table.add_row(cells);
        }

        Ok(table.to_string())
    }

    /// Summary line printed above a grid.
    pub fn render_grid_summary(
        &self,
        displayed: usize,
        total: usize,
        filter_text: &str,
        sort_key: Option<&str>,
    ) -> String {
        let mut summary = format!("📊 Showing {} of {} rows", displayed, total);
        if !filter_text.is_empty() {
            summary.push_str(&format!(" | 🔍 Filter: \"{}\"", filter_text));
        }
        if let Some(key) = sort_key {
            summary.push_str(&format!(" | Sorted by: {}", key));
        }
        summary
    }

    /// Pretty-print a render result with two-space indentation.
    pub fn render_json(&self, value: &serde_json::Value) -> Result<String, AppError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Display(DisplayError::TableFormat(e.to_string())))
    }

    /// Set table width to match the terminal size.
    fn configure_table_width(&self, table: &mut Table) {
        if let Some(terminal_width) = self.max_width {
            let available_width = if terminal_width > 20 {
                terminal_width - 6 // borders, padding, margins
            } else {
                terminal_width.max(40)
            };
            table.set_width(available_width as u16);
        } else {
            table.set_width(80);
        }
    }

    /// Truncate text to the given display width and add an ellipsis.
    fn truncate_text(&self, text: &str, max_width: usize) -> String {
        if text.width() <= max_width {
            return text.to_string();
        }

        let ellipsis = "...";
        let ellipsis_width = ellipsis.width();

        if max_width <= ellipsis_width {
            return ellipsis[..max_width].to_string();
        }

        let target_width = max_width - ellipsis_width;
        let mut result = String::new();
        let mut current_width = 0;

        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > target_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }

        result.push_str(ellipsis);
        result
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
