pub(crate) mod types;
pub use types::*;

use crate::config::{CalendarConfig, Canvas};
use crate::ir::WeekGrid;

const WEEKDAY_LABELS: [(usize, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];
const MONTH_LABEL_NUDGE: f32 = 2.0;
const MONTH_LABEL_RIGHT_MARGIN: f32 = 10.0;

pub fn layout_grid(
    cols: usize,
    rows: usize,
    start_x: f32,
    start_y: f32,
    cell_size: f32,
    gap: f32,
) -> Vec<(f32, f32)> {
    let step = cell_size + gap;
    let mut positions = Vec::with_capacity(cols * rows);
    for col in 0..cols {
        for row in 0..rows {
            positions.push((start_x + col as f32 * step, start_y + row as f32 * step));
        }
    }
    positions
}

/// One label per week whose first day starts a month different from the
/// last labelled one. Labels are pulled left so the last never overflows.
pub fn month_labels(grid: &WeekGrid, config: &CalendarConfig) -> Vec<MonthLabel> {
    let step = config.cell_size + config.gap;
    let max_x =
        config.start_x + grid.cols.saturating_sub(1) as f32 * step - MONTH_LABEL_RIGHT_MARGIN;
    let y = config.start_y - config.month_label_offset;

    let mut labels = Vec::new();
    let mut last_month: Option<String> = None;
    for (col, week) in grid.weeks.iter().enumerate() {
        let Some(date) = week.first().and_then(|cell| cell.date) else {
            continue;
        };
        let text = date.format("%b").to_string();
        if last_month.as_deref() == Some(text.as_str()) {
            continue;
        }
        let x = (config.start_x + col as f32 * step - MONTH_LABEL_NUDGE).min(max_x);
        labels.push(MonthLabel {
            col,
            x,
            y,
            text: text.clone(),
        });
        last_month = Some(text);
    }
    labels
}

pub fn weekday_labels(rows: usize, config: &CalendarConfig) -> Vec<WeekdayLabel> {
    let step = config.cell_size + config.gap;
    let x = config.start_x - config.weekday_label_offset;
    WEEKDAY_LABELS
        .iter()
        .filter(|(row, _)| *row < rows)
        .map(|(row, text)| WeekdayLabel {
            row: *row,
            x,
            y: config.start_y + *row as f32 * step + config.cell_size - 1.0,
            text: *text,
        })
        .collect()
}

pub fn compute_layout(grid: &WeekGrid, config: &CalendarConfig, canvas: Canvas) -> CalendarLayout {
    CalendarLayout {
        positions: layout_grid(
            grid.cols,
            grid.rows,
            config.start_x,
            config.start_y,
            config.cell_size,
            config.gap,
        ),
        month_labels: month_labels(grid, config),
        weekday_labels: weekday_labels(grid.rows, config),
        cell_size: config.cell_size,
        gap: config.gap,
        label_font_size: config.label_font_size,
        label_opacity: config.label_opacity,
        canvas,
    }
}
