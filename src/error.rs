use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid grid dimensions: {cols} columns x {rows} rows")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(String),
}

impl RenderError {
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }
}

/// Rejects grids that cannot be laid out as calendar weeks.
pub fn check_dimensions(cols: usize, rows: usize) -> RenderResult<()> {
    if cols == 0 || rows == 0 || rows > 7 {
        return Err(RenderError::InvalidDimensions { cols, rows });
    }
    Ok(())
}
