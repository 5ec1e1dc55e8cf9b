use crate::types::{FaceColors, Rgba};
use std::collections::BTreeMap;

/// Errors from palette lookups.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PaletteError {
    #[error("unknown color identifier: {0}")]
    UnknownColor(String),
    #[error("color {name} has a component outside [0, 1]: {value:?}")]
    OutOfRange { name: String, value: [f32; 4] },
}

/// Named colors used to build the face color buffers.
///
/// Uses BTreeMap so listing the palette is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: BTreeMap<String, Rgba>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        let colors = [
            ("white", Rgba::new(1.0, 1.0, 1.0, 1.0)),
            ("red", Rgba::new(1.0, 0.0, 0.0, 1.0)),
            ("green", Rgba::new(0.0, 1.0, 0.0, 1.0)),
            ("blue", Rgba::new(0.0, 0.0, 1.0, 1.0)),
            ("yellow", Rgba::new(1.0, 1.0, 0.0, 1.0)),
            ("orange", Rgba::new(1.0, 0.5, 0.0, 1.0)),
            ("black", Rgba::new(0.0, 0.0, 0.0, 1.0)),
        ]
        .into_iter()
        .map(|(name, rgba)| (name.to_string(), rgba))
        .collect();
        Self { colors }
    }
}

impl ColorPalette {
    /// The built-in seven-color palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in palette with `overrides` inserted on top.
    pub fn with_overrides(overrides: &BTreeMap<String, Rgba>) -> Result<Self, PaletteError> {
        let mut palette = Self::default();
        for (name, rgba) in overrides {
            palette.insert(name, *rgba)?;
        }
        Ok(palette)
    }

    /// Add or replace a named color.
    pub fn insert(&mut self, name: &str, rgba: Rgba) -> Result<(), PaletteError> {
        if !rgba.is_unit_range() {
            return Err(PaletteError::OutOfRange {
                name: name.to_string(),
                value: rgba.0,
            });
        }
        tracing::debug!("palette entry {name} = {:?}", rgba.0);
        self.colors.insert(name.to_string(), rgba);
        Ok(())
    }

    /// Look up a color by identifier.
    pub fn get(&self, name: &str) -> Result<Rgba, PaletteError> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| PaletteError::UnknownColor(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Resolve all six face identifiers, in mesh face order.
    ///
    /// Fails on the first identifier missing from the palette.
    pub fn resolve(&self, faces: &FaceColors) -> Result<[Rgba; 6], PaletteError> {
        let [a, b, c, d, e, f] = faces.in_order();
        Ok([
            self.get(a)?,
            self.get(b)?,
            self.get(c)?,
            self.get(d)?,
            self.get(e)?,
            self.get(f)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palette_has_seven_colors() {
        let palette = ColorPalette::new();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.get("orange").unwrap(), Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(palette.get("black").unwrap(), Rgba::BLACK);
    }

    #[test]
    fn unknown_color_is_error() {
        let palette = ColorPalette::new();
        assert_eq!(
            palette.get("magenta"),
            Err(PaletteError::UnknownColor("magenta".into()))
        );
    }

    #[test]
    fn resolve_default_faces() {
        let palette = ColorPalette::new();
        let colors = palette.resolve(&FaceColors::default()).unwrap();
        assert_eq!(colors[0], palette.get("blue").unwrap());
        assert_eq!(colors[5], palette.get("red").unwrap());
    }

    #[test]
    fn resolve_reports_bad_face() {
        let palette = ColorPalette::new();
        let faces = FaceColors {
            left: "purple".into(),
            ..FaceColors::default()
        };
        let err = palette.resolve(&faces).unwrap_err();
        assert_eq!(err, PaletteError::UnknownColor("purple".into()));
    }

    #[test]
    fn overrides_add_and_replace() {
        let mut overrides = BTreeMap::new();
        overrides.insert("purple".to_string(), Rgba::new(0.5, 0.0, 0.5, 1.0));
        overrides.insert("red".to_string(), Rgba::new(0.8, 0.0, 0.0, 1.0));
        let palette = ColorPalette::with_overrides(&overrides).unwrap();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.get("red").unwrap(), Rgba::new(0.8, 0.0, 0.0, 1.0));
    }

    #[test]
    fn override_out_of_range_rejected() {
        let mut palette = ColorPalette::new();
        let err = palette.insert("hot", Rgba::new(2.0, 0.0, 0.0, 1.0));
        assert!(matches!(err, Err(PaletteError::OutOfRange { .. })));
        assert!(!palette.contains("hot"));
    }
}
