//! Map model: per-tile layer stacks and the grid that holds them.
//!
//! The grid arrives from the host page as nested arrays, `columns[tx][ty]`,
//! each cell an array of asset names with the base layer first. It is
//! validated once on assignment and then only read by the renderer.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::iso::TilePos;

/// Ordered asset names for one tile, bottom layer first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TileStack(Vec<String>);

impl TileStack {
    /// Stack with only a base layer.
    #[must_use]
    pub fn base(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Build a stack from layer names, base first.
    ///
    /// Returns `None` if `layers` is empty.
    #[must_use]
    pub fn from_layers<I, S>(layers: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layers: Vec<String> = layers.into_iter().map(Into::into).collect();
        if layers.is_empty() { None } else { Some(Self(layers)) }
    }

    /// Name of the base layer.
    #[must_use]
    pub fn base_layer(&self) -> &str {
        &self.0[0]
    }

    /// All layer names in draw order.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of layers, always at least one.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// The tile grid, indexed `columns[tx][ty]` with origin `(0, 0)`.
///
/// Columns may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TileMap {
    columns: Vec<Vec<TileStack>>,
}

impl TileMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw layer names, rejecting any empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyStack`] naming the first cell with no layers.
    pub fn from_columns(columns: Vec<Vec<Vec<String>>>) -> Result<Self, MapError> {
        let mut built = Vec::with_capacity(columns.len());
        for (tx, column) in columns.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(column.len());
            for (ty, layers) in column.into_iter().enumerate() {
                let stack = TileStack::from_layers(layers).ok_or(MapError::EmptyStack {
                    x: index_to_i32(tx),
                    y: index_to_i32(ty),
                })?;
                cells.push(stack);
            }
            built.push(cells);
        }
        Ok(Self { columns: built })
    }

    /// Decode a map from its JSON nested-array form.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Decode`] for malformed JSON or
    /// [`MapError::EmptyStack`] for an empty cell.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let raw: Vec<Vec<Vec<String>>> = serde_json::from_str(json)?;
        Self::from_columns(raw)
    }

    /// Encode the map back to its JSON nested-array form.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("[]"))
    }

    /// Stack at `pos`, if that cell exists.
    #[must_use]
    pub fn get(&self, pos: TilePos) -> Option<&TileStack> {
        let tx = usize::try_from(pos.x).ok()?;
        let ty = usize::try_from(pos.y).ok()?;
        self.columns.get(tx)?.get(ty)
    }

    /// All cells, columns outer and rows inner.
    ///
    /// Every tile comes after its back neighbours `(x - 1, y)` and
    /// `(x, y - 1)`, which is the painter's order for the projection.
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, &TileStack)> {
        self.columns.iter().enumerate().flat_map(|(tx, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(ty, stack)| (TilePos::new(index_to_i32(tx), index_to_i32(ty)), stack))
        })
    }

    /// Number of populated cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns (extent along `x`).
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column (extent along `y`).
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for TileMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<Vec<Vec<String>>>::deserialize(deserializer)?;
        Self::from_columns(raw).map_err(serde::de::Error::custom)
    }
}

fn index_to_i32(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}
