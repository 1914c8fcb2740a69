use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobeGenError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// The map text does not hold exactly `width * height` codes.
    #[error("biome map is {width}x{height} ({expected} cells) but has {actual} codes")]
    MapSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

impl GlobeGenError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
