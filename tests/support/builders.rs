// tests/support/builders.rs
use mokkan_sites::application::commands::content::{
    CreateContentCommand, CreateContentCommandBuilder, TranslationInput, UpdateContentCommand,
};
use mokkan_sites::domain::content::{ContentKind, ContentStatus};

/// Article translation with the required `body` field filled in.
pub fn article_text(locale: &str, title: &str) -> TranslationInput {
    TranslationInput::new(locale, title).field("body", format!("{title} body"))
}

/// Same as [`article_text`] with an explicit localized slug.
pub fn article_text_with_slug(locale: &str, title: &str, slug: &str) -> TranslationInput {
    article_text(locale, title).slug(slug)
}

/// Draft article with a single `en` translation.
pub fn draft_article(title: &str) -> CreateContentCommandBuilder {
    CreateContentCommand::builder(ContentKind::Article).translation(article_text("en", title))
}

pub fn published_article(title: &str) -> CreateContentCommandBuilder {
    draft_article(title).status(ContentStatus::Published)
}

pub fn service_text(locale: &str, title: &str) -> TranslationInput {
    TranslationInput::new(locale, title).field("body", format!("What {title} covers"))
}

/// Rename the `en` record of an article to `slug`.
pub fn rename_article(id: i64, version: i64, title: &str, slug: &str) -> UpdateContentCommand {
    UpdateContentCommand::new(ContentKind::Article, id, version)
        .with_translation(article_text_with_slug("en", title, slug))
}
