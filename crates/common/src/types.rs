use serde::{Deserialize, Serialize};

/// An RGBA color with unit-range float components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    pub fn to_array(self) -> [f32; 4] {
        self.0
    }

    /// True when every component lies in `[0, 1]`.
    pub fn is_unit_range(&self) -> bool {
        self.0.iter().all(|c| (0.0..=1.0).contains(c))
    }
}

/// One of the six faces of a cube, in the order the mesh enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Right,
    Left,
}

impl Face {
    /// All faces in mesh order: front, back, top, bottom, right, left.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Right,
        Face::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Right => "right",
            Face::Left => "left",
        }
    }
}

/// Color identifiers assigned to the six faces of every small cube.
///
/// Names are resolved through a [`crate::ColorPalette`]; the assignment itself
/// carries no color values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceColors {
    pub front: String,
    pub back: String,
    pub top: String,
    pub bottom: String,
    pub right: String,
    pub left: String,
}

impl Default for FaceColors {
    fn default() -> Self {
        Self {
            front: "blue".into(),
            back: "green".into(),
            top: "white".into(),
            bottom: "yellow".into(),
            right: "orange".into(),
            left: "red".into(),
        }
    }
}

impl FaceColors {
    /// Color identifier for a face.
    pub fn get(&self, face: Face) -> &str {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
            Face::Top => &self.top,
            Face::Bottom => &self.bottom,
            Face::Right => &self.right,
            Face::Left => &self.left,
        }
    }

    /// Identifiers in mesh order (front, back, top, bottom, right, left).
    pub fn in_order(&self) -> [&str; 6] {
        Face::ALL.map(|face| self.get(face))
    }
}
