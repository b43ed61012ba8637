use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::text::FontFace;

/// Startup resources: one font file per logical face and named base images.
///
/// Paths are resolved against the directory holding the config file (or whatever root the
/// caller passes to [`crate::Studio::load`]).
///
/// ```json
/// {
///   "fonts": { "serif": "fonts/TimesNewRoman.ttf", "sans-bold": "fonts/ArialBold.ttf" },
///   "templates": { "angry": "img/angry.png", "updown": "img/updown.gif" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    #[serde(default)]
    pub fonts: BTreeMap<FontFace, PathBuf>,
    #[serde(default)]
    pub templates: BTreeMap<String, PathBuf>,
}

impl StudioConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> ForgeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ForgeError::resource(format!("parse studio config JSON: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ForgeError::resource(format!("open studio config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
