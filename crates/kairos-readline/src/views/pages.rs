use colored::Colorize;
use kairos_core::navigation::Page;

/// Title and blurb of a page that has no content yet.
pub fn placeholder(page: Page) -> Option<(&'static str, &'static str)> {
    match page {
        Page::Chat => None,
        Page::Persona => Some(("🌟 Persona", "AI personality settings coming soon...")),
        Page::Spellbook => Some(("✨ Spellbook", "Memory management interface coming soon...")),
        Page::History => Some(("📜 History", "Conversation history coming soon...")),
    }
}

pub fn render_placeholder(page: Page) -> String {
    match placeholder(page) {
        Some((title, blurb)) => format!(
            "\n{}\n{}\n\n",
            title.bright_magenta().bold(),
            blurb.bright_black()
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_placeholder_page_has_text() {
        colored::control::set_override(false);
        for page in Page::iter() {
            assert_eq!(placeholder(page).is_some(), page.is_placeholder());
        }
        let persona = render_placeholder(Page::Persona);
        assert!(persona.contains("🌟 Persona"));
        assert!(persona.contains("AI personality settings coming soon..."));
    }
}
