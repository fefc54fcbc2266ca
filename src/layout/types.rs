use serde::Serialize;

use crate::config::Canvas;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLabel {
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayLabel {
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub text: &'static str,
}

/// Pixel placement for one rendered calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarLayout {
    /// Top-left corner of each cell, column-major like `WeekGrid::cells`.
    pub positions: Vec<(f32, f32)>,
    pub month_labels: Vec<MonthLabel>,
    pub weekday_labels: Vec<WeekdayLabel>,
    pub cell_size: f32,
    pub gap: f32,
    pub label_font_size: f32,
    pub label_opacity: f32,
    pub canvas: Canvas,
}
