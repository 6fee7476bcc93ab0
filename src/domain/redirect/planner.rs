// src/domain/redirect/planner.rs
//! Which public paths an entity write retires, and where they should point.
use crate::domain::content::PublicPath;
use crate::domain::locale::{LocaleCode, LocaleSet};
use std::collections::{BTreeMap, BTreeSet};

/// Longest redirect chain followed while collapsing before it is treated as
/// a loop.
pub const MAX_REDIRECT_HOPS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetiredPath {
    pub from: PublicPath,
    pub to: PublicPath,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectPlan {
    pub retired: Vec<RetiredPath>,
    /// Paths that started resolving to content and must not redirect anymore.
    pub revived: Vec<PublicPath>,
}

impl RedirectPlan {
    /// Compare the public paths of an entity before and after a write.
    ///
    /// A retired path points to the entity's new path in the same locale,
    /// else its default-locale path, else the home page of the locale. A locale
    /// missing from `locales` (just removed) falls back to the default home.
    pub fn between(
        before: &BTreeMap<LocaleCode, PublicPath>,
        after: &BTreeMap<LocaleCode, PublicPath>,
        locales: &LocaleSet,
    ) -> Self {
        let still_live: BTreeSet<&PublicPath> = after.values().collect();
        let was_live: BTreeSet<&PublicPath> = before.values().collect();
        let default_locale = locales.default_locale();

        let retired = before
            .iter()
            .filter(|(_, path)| !still_live.contains(path))
            .map(|(code, path)| {
                let to = after
                    .get(code)
                    .or_else(|| after.get(&default_locale.code))
                    .cloned()
                    .unwrap_or_else(|| match locales.find(code) {
                        Some(locale) => PublicPath::home(locale),
                        None => PublicPath::home(default_locale),
                    });
                RetiredPath {
                    from: path.clone(),
                    to,
                }
            })
            .collect();

        let revived = after
            .values()
            .filter(|path| !was_live.contains(path))
            .cloned()
            .collect();

        Self { retired, revived }
    }

    pub fn is_empty(&self) -> bool {
        self.retired.is_empty() && self.revived.is_empty()
    }
}
