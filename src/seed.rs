//! Content-derived random generators.
//!
//! Layouts must place the same avatar in the same spot for the same request, yet let callers
//! vary placement by changing a nonce. Both needs are served by hashing an ordered tuple of
//! stable labels plus a caller nonce into a generator seed.
//!
//! Mixing function (externally observable, do not change casually): every part is rendered to
//! its string form (strings verbatim as UTF-8, integers in decimal), the pieces are
//! concatenated in order, the bytes are hashed with 64-bit FNV-1a, and the hash seeds
//! `rand::rngs::StdRng::seed_from_u64`.

use std::borrow::Cow;
use std::fmt::Write as _;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::math::Fnv1a64;

/// One tagged primitive value of a [`SeedTuple`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SeedPart<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    UInt(u64),
}

impl SeedPart<'_> {
    fn write_repr(&self, out: &mut String) {
        match self {
            SeedPart::Str(s) => out.push_str(s),
            SeedPart::Int(v) => {
                let _ = write!(out, "{v}");
            }
            SeedPart::UInt(v) => {
                let _ = write!(out, "{v}");
            }
        }
    }
}

impl<'a> From<&'a str> for SeedPart<'a> {
    fn from(s: &'a str) -> Self {
        SeedPart::Str(Cow::Borrowed(s))
    }
}

impl From<String> for SeedPart<'_> {
    fn from(s: String) -> Self {
        SeedPart::Str(Cow::Owned(s))
    }
}

impl From<i64> for SeedPart<'_> {
    fn from(v: i64) -> Self {
        SeedPart::Int(v)
    }
}

impl From<u64> for SeedPart<'_> {
    fn from(v: u64) -> Self {
        SeedPart::UInt(v)
    }
}

/// Ordered list of seed parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SeedTuple<'a> {
    parts: Vec<SeedPart<'a>>,
}

impl<'a> SeedTuple<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, part: impl Into<SeedPart<'a>>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn with_all<I, P>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<SeedPart<'a>>,
    {
        self.parts.extend(parts.into_iter().map(Into::into));
        self
    }

    /// The concatenated string form that gets hashed.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            part.write_repr(&mut out);
        }
        out
    }

    pub fn seed_u64(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(self.canonical_string().as_bytes());
        h.finish()
    }
}

/// Deterministic generator derived from a [`SeedTuple`].
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[0, bound)`; a zero bound yields 0.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.inner.random_range(0..bound)
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Hash `seed` into a fresh generator.
pub fn derive_rng(seed: &SeedTuple<'_>) -> SeededRng {
    SeededRng::from_seed_u64(seed.seed_u64())
}

#[cfg(test)]
#[path = "../tests/unit/seed.rs"]
mod tests;
