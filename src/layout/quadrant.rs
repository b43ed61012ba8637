use crate::foundation::core::PixelSize;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::seed::{SeedTuple, derive_rng};

/// Axis captions of a quadrant chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadrantLabels {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
}

impl QuadrantLabels {
    pub fn new(
        top: impl Into<String>,
        bottom: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Build from exactly four labels in top, bottom, left, right order.
    pub fn from_slice<S: AsRef<str>>(labels: &[S]) -> ForgeResult<Self> {
        match labels {
            [t, b, l, r] => Ok(Self::new(t.as_ref(), b.as_ref(), l.as_ref(), r.as_ref())),
            _ => Err(ForgeError::configuration(format!(
                "quadrant chart needs exactly 4 labels, got {}",
                labels.len()
            ))),
        }
    }

    /// Lower-cased concatenation used as the stable seed component.
    pub fn seed_key(&self) -> String {
        format!("{}{}{}{}", self.top, self.bottom, self.left, self.right).to_lowercase()
    }
}

/// Free scatter over a square canvas; quadrants only partition the drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadrantLayout {
    size: u32,
    labels: QuadrantLabels,
    seed_key: String,
}

impl QuadrantLayout {
    pub fn new(size: u32, labels: QuadrantLabels) -> Self {
        let seed_key = labels.seed_key();
        Self {
            size,
            labels,
            seed_key,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn labels(&self) -> &QuadrantLabels {
        &self.labels
    }

    /// Top-left corner for an avatar of `avatar` size salted with `nonce`.
    pub fn place(&self, nonce: u64, avatar: PixelSize) -> (i32, i32) {
        let mut rng = derive_rng(&SeedTuple::new().with(self.seed_key.as_str()).with(nonce));
        let x = rng.below(self.size.saturating_sub(avatar.width));
        let y = rng.below(self.size.saturating_sub(avatar.height));
        (x as i32, y as i32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/quadrant.rs"]
mod tests;
