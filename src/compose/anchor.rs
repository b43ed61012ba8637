use std::str::FromStr;

use crate::foundation::core::{IntRect, PixelSize};
use crate::foundation::error::ForgeError;

/// Where a source is aligned inside a container ("gravity").
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Horizontal placement fraction of an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement fraction of an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::LeftCenter,
        Anchor::Center,
        Anchor::RightCenter,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    pub fn h_align(self) -> HAlign {
        match self {
            Anchor::TopLeft | Anchor::LeftCenter | Anchor::BottomLeft => HAlign::Left,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => HAlign::Center,
            Anchor::TopRight | Anchor::RightCenter | Anchor::BottomRight => HAlign::Right,
        }
    }

    pub fn v_align(self) -> VAlign {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => VAlign::Top,
            Anchor::LeftCenter | Anchor::Center | Anchor::RightCenter => VAlign::Middle,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => VAlign::Bottom,
        }
    }

    /// The anchor reflected across the vertical axis (left <-> right).
    pub fn mirrored_h(self) -> Self {
        match self {
            Anchor::TopLeft => Anchor::TopRight,
            Anchor::TopRight => Anchor::TopLeft,
            Anchor::LeftCenter => Anchor::RightCenter,
            Anchor::RightCenter => Anchor::LeftCenter,
            Anchor::BottomLeft => Anchor::BottomRight,
            Anchor::BottomRight => Anchor::BottomLeft,
            other => other,
        }
    }

    /// The anchor reflected across the horizontal axis (top <-> bottom).
    pub fn mirrored_v(self) -> Self {
        match self {
            Anchor::TopLeft => Anchor::BottomLeft,
            Anchor::BottomLeft => Anchor::TopLeft,
            Anchor::TopCenter => Anchor::BottomCenter,
            Anchor::BottomCenter => Anchor::TopCenter,
            Anchor::TopRight => Anchor::BottomRight,
            Anchor::BottomRight => Anchor::TopRight,
            other => other,
        }
    }
}

impl FromStr for Anchor {
    type Err = ForgeError;

    /// Accepts kebab-case names and the compass aliases (`north`, `south-east`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let anchor = match norm.as_str() {
            "top-left" | "north-west" | "northwest" => Anchor::TopLeft,
            "top-center" | "top" | "north" => Anchor::TopCenter,
            "top-right" | "north-east" | "northeast" => Anchor::TopRight,
            "left-center" | "left" | "west" => Anchor::LeftCenter,
            "center" => Anchor::Center,
            "right-center" | "right" | "east" => Anchor::RightCenter,
            "bottom-left" | "south-west" | "southwest" => Anchor::BottomLeft,
            "bottom-center" | "bottom" | "south" => Anchor::BottomCenter,
            "bottom-right" | "south-east" | "southeast" => Anchor::BottomRight,
            _ => return Err(ForgeError::contract(format!("unknown anchor '{s}'"))),
        };
        Ok(anchor)
    }
}

/// Top-left placement of a `source`-sized box aligned inside `container` per `anchor`,
/// shifted by `offset`.
///
/// Integer division truncates toward zero; a source larger than the container produces a
/// negative delta rather than an error.
pub fn resolve_position(
    container: IntRect,
    source: PixelSize,
    anchor: Anchor,
    offset: (i32, i32),
) -> (i32, i32) {
    let free_w = container.width - source.width as i32;
    let free_h = container.height - source.height as i32;

    let dx = match anchor.h_align() {
        HAlign::Left => 0,
        HAlign::Center => free_w / 2,
        HAlign::Right => free_w,
    };
    let dy = match anchor.v_align() {
        VAlign::Top => 0,
        VAlign::Middle => free_h / 2,
        VAlign::Bottom => free_h,
    };

    (container.x + dx + offset.0, container.y + dy + offset.1)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/anchor.rs"]
mod tests;
