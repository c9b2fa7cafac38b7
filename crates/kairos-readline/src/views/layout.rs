use colored::Colorize;
use kairos_core::navigation::NavigationState;

pub const APP_TITLE: &str = "Kairos AI";
pub const ABOUT_TEXT: &str =
    "About Kairos: An AI companion for creative, introspective, and emotionally intelligent conversations.";

fn nav_line(nav: &NavigationState) -> String {
    nav.items()
        .iter()
        .map(|item| {
            if nav.is_active(item) {
                format!("[{}]", item.name).bright_magenta().bold().to_string()
            } else {
                item.name.bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Title bar with the navigation, active page highlighted.
pub fn render_header(nav: &NavigationState) -> String {
    format!(
        "{}  {}\n{}\n",
        APP_TITLE.bright_magenta().bold(),
        nav_line(nav),
        "─".repeat(60).bright_black()
    )
}

pub fn render_footer(nav: &NavigationState) -> String {
    let links = nav
        .items()
        .iter()
        .map(|item| format!("{} ({})", item.name, item.href))
        .collect::<Vec<_>>()
        .join(" · ");
    format!(
        "{}\n{}\n{}\n",
        "─".repeat(60).bright_black(),
        links.bright_black(),
        ABOUT_TEXT.bright_black()
    )
}
