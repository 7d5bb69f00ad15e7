//! Terminal rendering for contentcal-core types.
//!
//! Extension traits that add colored output to core types using owo_colors.

use contentcal_core::constants::{LONG_DATE, SHORT_DATE};
use contentcal_core::grid::{DayCell, MonthGrid};
use contentcal_core::month::format_post_date;
use contentcal_core::post::{MediaKind, PlatformLink, PostStatus, obfuscate_url};
use contentcal_core::view::Modal;
use contentcal_core::Post;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const CELL_WIDTH: usize = 9;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
/// Dots shown in a day cell before switching to "+n".
const MAX_DOTS: usize = 3;
/// Cell space after the day number and star.
const MARKER_WIDTH: usize = CELL_WIDTH - 4;

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Colorize text with the platform's brand-ish color
pub fn platform_colored(platform: &str, text: &str) -> String {
    match platform.to_lowercase().as_str() {
        "instagram" => text.magenta().to_string(),
        "facebook" => text.blue().to_string(),
        "youtube" => text.red().to_string(),
        "linkedin" => text.bright_blue().to_string(),
        "twitter" | "x" => text.cyan().to_string(),
        "tiktok" => text.bright_white().bold().to_string(),
        "snapchat" => text.yellow().to_string(),
        _ => text.white().to_string(),
    }
}

impl Render for PostStatus {
    fn render(&self) -> String {
        let label = self.to_string();
        match self {
            PostStatus::Published => label.green().to_string(),
            PostStatus::Scheduled => label.blue().to_string(),
            PostStatus::Draft => label.yellow().to_string(),
            PostStatus::Other(_) => label.white().to_string(),
        }
    }
}

// ============================================================================
// Month grid
// ============================================================================

fn render_cell(cell: &DayCell) -> String {
    let day = format!("{:>3}", cell.day);
    let day = if cell.is_today {
        day.black().on_blue().bold().to_string()
    } else if cell.is_sunday {
        day.red().to_string()
    } else if cell.has_posts() {
        day.bold().to_string()
    } else {
        day.dimmed().to_string()
    };

    let star = if cell.has_special() {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    };

    let markers = day_markers(cell.posts.len());
    let pad = MARKER_WIDTH.saturating_sub(markers.chars().count());

    format!("{day}{star}{}{}", markers.blue(), " ".repeat(pad))
}

/// Up to three dots, then "+n" for the rest. Dots give way to the count so
/// the markers fit in MARKER_WIDTH.
fn day_markers(count: usize) -> String {
    let mut dots = count.min(MAX_DOTS);
    loop {
        let extra = count - dots;
        let suffix = if extra > 0 { format!("+{extra}") } else { String::new() };
        if dots == 0 || dots + suffix.chars().count() <= MARKER_WIDTH {
            return format!("{}{}", "•".repeat(dots), suffix);
        }
        dots -= 1;
    }
}

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let summary = format!(
            "{} {}",
            self.month_post_count,
            pluralize("post", self.month_post_count)
        );
        lines.push(format!("{}  {}", self.month.label().bold(), summary.blue()));
        lines.push(String::new());

        let header: String = WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cell = format!("{:>w$}", name, w = CELL_WIDTH - 5);
                let cell = format!("{cell}{}", " ".repeat(5));
                if i == 0 {
                    cell.red().to_string()
                } else {
                    cell.dimmed().to_string()
                }
            })
            .collect();
        lines.push(header.trim_end().to_string());

        for week in self.weeks() {
            let row: String = week
                .iter()
                .map(|slot| match slot {
                    Some(cell) => render_cell(cell),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect();
            lines.push(row.trim_end().to_string());
        }

        lines.push(String::new());
        lines.push(format!(
            "{} has posts   {} today   {} special day",
            "•".blue(),
            " 1 ".black().on_blue(),
            "★".yellow()
        ));

        lines.join("\n")
    }
}

// ============================================================================
// Platform filter bar
// ============================================================================

/// "All Platforms" followed by each platform with its post count.
pub struct PlatformBar<'a> {
    pub badges: &'a [(String, usize)],
    pub selected: Option<&'a str>,
}

impl Render for PlatformBar<'_> {
    fn render(&self) -> String {
        let all = if self.selected.is_none() {
            "[All Platforms]".bold().to_string()
        } else {
            "All Platforms".dimmed().to_string()
        };

        let mut items = vec![all];
        for (platform, count) in self.badges {
            let label = format!("{platform} ({count})");
            if self.selected == Some(platform.as_str()) {
                items.push(platform_colored(platform, &format!("[{label}]")).bold().to_string());
            } else {
                items.push(platform_colored(platform, &label));
            }
        }

        items.join("  ")
    }
}

// ============================================================================
// Post card
// ============================================================================

fn render_media(post: &Post) -> String {
    let label = "Media:".dimmed();
    match post.media_kind() {
        MediaKind::Video => format!("{label} {} {}", "▶ video".cyan(), post.media_url),
        MediaKind::Image => format!("{label} {} {}", "▣ image".cyan(), post.media_url),
        MediaKind::Unsupported => format!(
            "{label} {} {}",
            "Unsupported media type".yellow(),
            obfuscate_url(&post.media_url).dimmed()
        ),
        MediaKind::Unavailable => format!("{label} {}", "Media preview unavailable".yellow()),
    }
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    if value.trim().is_empty() {
        return;
    }
    lines.push(format!("{} {}", format!("{label}:").dimmed(), value));
}

impl Render for Post {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{}  {}",
            self.status.render(),
            format!("ID: {}", self.id).dimmed()
        ));
        lines.push(self.title.bold().to_string());

        let mut badges = vec![format_post_date(&self.date, SHORT_DATE)];
        badges.extend(self.platforms.iter().map(|p| platform_colored(p, p)));
        if self.is_approved() {
            badges.push("✓ Approved".green().to_string());
        }
        lines.push(badges.join("  "));
        lines.push(render_media(self));

        if !self.description.trim().is_empty() {
            lines.push(String::new());
            lines.push(self.description.clone());
        }

        lines.push(String::new());
        push_field(&mut lines, "Captions", self.display_captions());
        push_field(&mut lines, "Audience benefit", &self.benefit);
        push_field(&mut lines, "Audience", &self.audience.join(", "));
        push_field(&mut lines, "Tone", &self.tone);
        push_field(&mut lines, "Target regions", &self.target.join(", "));
        push_field(&mut lines, "Campaign aim", &self.aim);

        lines.push(String::new());
        for platform in &self.platforms {
            let name = platform_colored(platform, platform);
            match self.link_for(platform) {
                PlatformLink::Published(url) => lines.push(format!("{name} {url}")),
                PlatformLink::NotPosted => {
                    lines.push(format!("{name} {}", "not posted yet".dimmed()))
                }
            }
        }

        lines.join("\n")
    }
}

// ============================================================================
// Modal
// ============================================================================

impl Render for Modal {
    fn render(&self) -> String {
        let Some(post) = self.current() else {
            return "No posts scheduled for this date.".dimmed().to_string();
        };
        let (index, total) = self.position().unwrap_or((0, 1));
        let platforms = self.platform_count();

        let mut lines = vec!["Scheduled Posts".bold().to_string()];
        if let Some(date) = self.selected_date() {
            lines.push(format_post_date(date, LONG_DATE));
        }

        let mut counts = format!(
            "{} {} · {} {}",
            total,
            pluralize("post", total),
            platforms,
            pluralize("platform", platforms)
        )
        .blue()
        .to_string();
        if total > 1 {
            counts.push_str(&format!("   {}", format!("post {} of {}", index + 1, total).dimmed()));
        }
        lines.push(counts);

        lines.push("─".repeat(48).dimmed().to_string());
        lines.push(post.render());
        lines.push("─".repeat(48).dimmed().to_string());

        lines.join("\n")
    }
}
