use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{AnimationFrame, decode_animation, decode_image};
use crate::compose::canvas::Canvas;
use crate::config::StudioConfig;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::text::Typesetter;
use crate::text::fonts::FontBook;

/// A named base image pipelines draw on top of.
#[derive(Clone, Debug)]
pub enum Template {
    Still(Canvas),
    Animated(Vec<AnimationFrame>),
}

impl Template {
    /// Decode `bytes` as an animation when it is a GIF, otherwise as a still image.
    pub fn decode(bytes: &[u8]) -> ForgeResult<Self> {
        if bytes.starts_with(b"GIF8") {
            Ok(Self::Animated(decode_animation(bytes)?))
        } else {
            Ok(Self::Still(decode_image(bytes)?))
        }
    }
}

/// Read-only resources shared by every pipeline invocation.
///
/// Built once at startup (fonts and templates loaded eagerly) and passed by reference to
/// pipeline constructors. Nothing here is mutated afterwards, so a `Studio` can be shared
/// across threads behind an `Arc`.
pub struct Studio {
    typesetter: Arc<dyn Typesetter>,
    templates: HashMap<String, Template>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("Studio")
            .field("templates", &names)
            .finish_non_exhaustive()
    }
}

impl Studio {
    pub fn new(typesetter: Arc<dyn Typesetter>) -> Self {
        Self {
            typesetter,
            templates: HashMap::new(),
        }
    }

    pub fn with_template(mut self, name: impl Into<String>, template: Template) -> Self {
        self.templates.insert(name.into(), template);
        self
    }

    /// Load every font and template named in `config`, resolving paths against `root`.
    #[tracing::instrument(skip(config, root), fields(root = %root.display()))]
    pub fn load(config: &StudioConfig, root: &Path) -> ForgeResult<Self> {
        let mut book = FontBook::new();
        for (face, rel) in &config.fonts {
            book.insert(*face, read_resource(root, rel)?);
        }
        Self::load_templates(config, root, Arc::new(book))
    }

    /// Like [`Studio::load`] but with a caller-supplied typesetter; `config.fonts` is ignored.
    #[tracing::instrument(skip(config, root, typesetter), fields(root = %root.display()))]
    pub fn load_templates(
        config: &StudioConfig,
        root: &Path,
        typesetter: Arc<dyn Typesetter>,
    ) -> ForgeResult<Self> {
        let mut studio = Self::new(typesetter);
        for (name, rel) in &config.templates {
            let bytes = read_resource(root, rel)?;
            let template = Template::decode(&bytes)
                .map_err(|e| ForgeError::resource(format!("template '{name}': {e}")))?;
            studio.templates.insert(name.clone(), template);
        }
        tracing::debug!(templates = studio.templates.len(), "studio loaded");
        Ok(studio)
    }

    pub fn typesetter(&self) -> &dyn Typesetter {
        self.typesetter.as_ref()
    }

    pub fn template(&self, name: &str) -> ForgeResult<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| ForgeError::contract(format!("unknown template '{name}'")))
    }

    pub fn still_template(&self, name: &str) -> ForgeResult<&Canvas> {
        match self.template(name)? {
            Template::Still(canvas) => Ok(canvas),
            Template::Animated(_) => Err(ForgeError::contract(format!(
                "template '{name}' is animated, expected a still image"
            ))),
        }
    }

    pub fn animated_template(&self, name: &str) -> ForgeResult<&[AnimationFrame]> {
        match self.template(name)? {
            Template::Animated(frames) => Ok(frames),
            Template::Still(_) => Err(ForgeError::contract(format!(
                "template '{name}' is a still image, expected an animation"
            ))),
        }
    }
}

fn read_resource(root: &Path, rel: &Path) -> ForgeResult<Vec<u8>> {
    let path = root.join(rel);
    std::fs::read(&path)
        .map_err(|e| ForgeError::resource(format!("read '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/studio.rs"]
mod tests;
