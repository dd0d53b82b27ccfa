pub type ShadeResult<T> = Result<T, ShadeError>;

#[derive(thiserror::Error, Debug)]
pub enum ShadeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
