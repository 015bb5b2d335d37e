//! Menu Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use menu_tree::Menu;

impl Entity for Menu {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating a menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenu {
    pub name: String,
    /// Derived from `name` when absent
    pub slug: Option<String>,
}

impl NewMenu {
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.trim().is_empty() => slugify(slug),
            _ => slugify(&self.name),
        }
    }
}

/// Lowercase ASCII slug, runs of other characters collapse to one '-'
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Main Navigation"), "main-navigation");
        assert_eq!(slugify("  Footer -- Links! "), "footer-links");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_explicit_slug_wins() {
        let menu = NewMenu { name: "Main".into(), slug: Some("Top Bar".into()) };
        assert_eq!(menu.slug(), "top-bar");
        let menu = NewMenu { name: "Main".into(), slug: Some("  ".into()) };
        assert_eq!(menu.slug(), "main");
    }
}
