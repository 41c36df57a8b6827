use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Terrain layers in render order (bottom first).
pub const TERRAIN_LAYER_NAMES: [&str; 11] = [
    "Sea-0", "Sea-1", "Sea-2", "Sea-3", "Land", "Grass", "Sand", "Shallows", "Snow", "Gravel",
    "Rock",
];

/// Base color of each terrain layer, parallel to [`TERRAIN_LAYER_NAMES`].
pub const TERRAIN_LAYER_COLORS: [[u8; 3]; 11] = [
    [0x32, 0x79, 0x86],
    [0x3D, 0x8E, 0x9F],
    [0x48, 0xA3, 0xB8],
    [0x53, 0xB9, 0xD1],
    [0xD0, 0xD0, 0xC6],
    [0xA4, 0xB8, 0x75],
    [0xE3, 0xD0, 0x8D],
    [0x53, 0xB9, 0xD1],
    [0xFF, 0xFF, 0xFF],
    [0x8B, 0x6E, 0x5C],
    [0x58, 0x3E, 0x2D],
];

/// Static description of the layer stack handed to the editor at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub names: Vec<String>,
    pub colors: Vec<[u8; 3]>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            names: TERRAIN_LAYER_NAMES.iter().map(|n| n.to_string()).collect(),
            colors: TERRAIN_LAYER_COLORS.to_vec(),
        }
    }
}

impl LayerConfig {
    pub fn layer_count(&self) -> usize {
        self.names.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Color of a layer; mid grey when the palette is short.
    pub fn color(&self, layer: usize) -> [u8; 3] {
        self.colors.get(layer).copied().unwrap_or([128, 128, 128])
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.names.is_empty() {
            return Err(GeometryError::EmptyLayerConfig);
        }
        if self.names.len() != self.colors.len() {
            return Err(GeometryError::PaletteMismatch {
                names: self.names.len(),
                colors: self.colors.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_eleven_layers() {
        let config = LayerConfig::default();
        assert_eq!(config.layer_count(), 11);
        assert!(config.validate().is_ok());
        assert_eq!(config.index_of("Sea-0"), Some(0));
        assert_eq!(config.index_of("Rock"), Some(10));
        assert_eq!(config.color(4), [208, 208, 198]);
    }

    #[test]
    fn test_palette_mismatch() {
        let config = LayerConfig {
            names: vec!["A".into(), "B".into()],
            colors: vec![[0, 0, 0]],
        };
        assert_eq!(
            config.validate(),
            Err(GeometryError::PaletteMismatch { names: 2, colors: 1 })
        );
        assert_eq!(config.color(1), [128, 128, 128]);
    }

    #[test]
    fn test_empty_config() {
        let config = LayerConfig {
            names: vec![],
            colors: vec![],
        };
        assert_eq!(config.validate(), Err(GeometryError::EmptyLayerConfig));
    }
}
