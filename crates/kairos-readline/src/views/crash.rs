use colored::Colorize;

pub const CRASH_TITLE: &str = "Something went wrong";
pub const CRASH_MESSAGE: &str = "Kairos encountered an error and needs to restart.";
pub const RELOAD_LABEL: &str = "Reload Page";

/// Fallback screen shown after the app panics.
pub fn render_crash(detail: &str) -> String {
    let mut out = format!(
        "\n{}\n{}\n",
        CRASH_TITLE.bright_red().bold(),
        CRASH_MESSAGE.red()
    );
    if !detail.is_empty() {
        out.push_str(&format!("{}\n", detail.bright_black()));
    }
    out.push_str(&format!(
        "\n{} {}\n",
        format!("[{}]", RELOAD_LABEL).bright_cyan(),
        "Press Enter to reload, or type quit to exit.".bright_black()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_screen_offers_reload() {
        colored::control::set_override(false);
        let out = render_crash("boom");
        assert!(out.contains(CRASH_TITLE));
        assert!(out.contains(CRASH_MESSAGE));
        assert!(out.contains("[Reload Page]"));
        assert!(out.contains("boom"));
    }
}
