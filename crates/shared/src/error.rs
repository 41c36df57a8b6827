use thiserror::Error;

/// Problems found while validating ingested geometry or layer configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The input names a layer the configuration does not know about.
    #[error("unknown layer \"{name}\"")]
    UnknownLayer {
        /// The offending layer name.
        name: String,
    },

    /// A triangle references a vertex that does not exist in its layer.
    #[error("layer \"{layer}\": triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        layer: String,
        triangle: usize,
        vertex: usize,
    },

    /// A triangle repeats one of its vertex indices.
    #[error("layer \"{layer}\": triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle { layer: String, triangle: usize },

    /// A vertex coordinate is NaN or infinite.
    #[error("layer \"{layer}\": vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { layer: String, vertex: usize },

    /// The layer configuration has no layers at all.
    #[error("layer configuration is empty")]
    EmptyLayerConfig,

    /// Every layer needs exactly one color.
    #[error("layer configuration has {names} names but {colors} colors")]
    PaletteMismatch { names: usize, colors: usize },
}
