// src/application/ports/util.rs

/// Derives URL slugs from titles when a write does not name one explicitly.
/// The output is still validated as a `ContentSlug`.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
