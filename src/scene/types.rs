#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rx: f32,
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: f32,
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: String,
    pub opacity: Option<f32>,
    pub fill_opacity: Option<f32>,
    pub stroke: Option<String>,
    pub stroke_width: f32,
    pub filter: Option<String>,
    pub class: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub d: String,
    pub fill: String,
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: String,
    pub stroke_width: f32,
    pub opacity: Option<f32>,
    pub dasharray: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub fill: String,
    pub font_size: f32,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub anchor: Option<String>,
    pub letter_spacing: Option<f32>,
    pub opacity: Option<f32>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(Rect),
    Circle(Circle),
    Path(Path),
    Line(Line),
    Text(Text),
}

impl From<Rect> for DrawCommand {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<Circle> for DrawCommand {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Path> for DrawCommand {
    fn from(value: Path) -> Self {
        Self::Path(value)
    }
}

impl From<Line> for DrawCommand {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Text> for DrawCommand {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: String,
    pub opacity: f32,
}

/// Entries of the `<defs>` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Raw CSS placed in a `<style>` element.
    Style(String),
    /// Gaussian blur of the source graphic. `spread` enlarges the filter region.
    Blur {
        id: String,
        std_deviation: f32,
        spread: bool,
    },
    /// Colored halo behind the source graphic.
    Glow {
        id: String,
        color: String,
        std_deviation: f32,
    },
    /// Diagonal gradient from the top-left to the bottom-right corner.
    LinearGradient { id: String, stops: Vec<GradientStop> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub defs: Vec<Definition>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            defs: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: impl Into<DrawCommand>) {
        self.commands.push(command.into());
    }

    pub fn define(&mut self, definition: Definition) {
        self.defs.push(definition);
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }
}
