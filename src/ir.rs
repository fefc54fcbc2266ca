use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Intensity of a rendered cell: `Some(0..=4)`, or `None` for a future cell.
pub type Level = Option<u8>;

pub const MAX_LEVEL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionDay {
    pub date: Option<NaiveDate>,
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count,
        }
    }

    pub fn empty() -> Self {
        Self {
            date: None,
            count: 0,
        }
    }

    /// Builds a day from loosely typed JSON. Never fails: an unreadable date
    /// becomes `None` and an unreadable or negative count becomes zero.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::empty();
        };
        let date = obj.get("date").and_then(Value::as_str).and_then(parse_date);
        let count = obj.get("count").map(count_from_value).unwrap_or(0);
        Self { date, count }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn count_from_value(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    raw.clamp(0, u32::MAX as i64) as u32
}

/// The JSON document handed over by the data-fetch layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub contributions: Vec<Value>,
    #[serde(default, alias = "contributionWeeks")]
    pub contribution_weeks: Option<Vec<Value>>,
}

impl ContributionInput {
    pub fn series(&self) -> Vec<ContributionDay> {
        self.contributions
            .iter()
            .map(ContributionDay::from_value)
            .collect()
    }

    pub fn weeks(&self) -> Option<Vec<Vec<ContributionDay>>> {
        let weeks = self.contribution_weeks.as_ref()?;
        Some(
            weeks
                .iter()
                .map(|week| match week.as_array() {
                    Some(days) => days.iter().map(ContributionDay::from_value).collect(),
                    None => Vec::new(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub is_future: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            date: None,
            count: 0,
            is_future: false,
        }
    }
}

/// `cols` weeks of `rows` weekdays each, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub cols: usize,
    pub rows: usize,
    pub weeks: Vec<Vec<Cell>>,
}

impl WeekGrid {
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            weeks: vec![vec![Cell::empty(); rows]; cols],
        }
    }

    /// Cells in column-major order: every row of week 0, then week 1, ...
    pub fn cells(&self) -> Vec<Cell> {
        self.weeks.iter().flatten().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    #[default]
    Default,
    Snake,
    Space,
    Marvel,
    Neural,
    Glass,
}

impl VisualMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "grid" => Some(Self::Default),
            "snake" | "gaming" => Some(Self::Snake),
            "space" => Some(Self::Space),
            "marvel" => Some(Self::Marvel),
            "neural" => Some(Self::Neural),
            "glass" => Some(Self::Glass),
            _ => None,
        }
    }

    /// Mode a theme renders with when no mode is requested explicitly.
    pub fn for_theme(theme_name: &str) -> Self {
        Self::from_name(theme_name).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Snake => "snake",
            Self::Space => "space",
            Self::Marvel => "marvel",
            Self::Neural => "neural",
            Self::Glass => "glass",
        }
    }
}
