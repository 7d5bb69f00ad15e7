use anyhow::Result;
use contentcal_core::{CalendarMonth, Post};
use contentcal_core::grid::MonthGrid;
use contentcal_core::view::{ViewEvent, ViewState};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{PlatformBar, Render};

pub async fn run(ctx: &Context, month: CalendarMonth, platform: Option<String>) -> Result<()> {
    let client = ctx.client()?;
    let session = ctx.load_session(month).await?;

    let mut state = ViewState::new(Some(client.to_string()), month);
    state.apply(ViewEvent::SelectPlatform(platform));

    print_calendar(&state, session.platforms(), session.all_posts(), session.month_posts());

    Ok(())
}

/// Print the filter bar and month grid for the state's month.
pub fn print_calendar(
    state: &ViewState,
    platforms: &[String],
    all_posts: &[Post],
    month_posts: &[Post],
) {
    let badges = state.platform_badges(platforms, month_posts);
    let visible = state.visible_posts_owned(all_posts, month_posts);
    let today = chrono::Local::now().date_naive();
    let grid = MonthGrid::build(state.month, &visible, today);

    if let Some(client) = &state.client {
        println!("{}", client.bold());
    }
    println!(
        "{}",
        PlatformBar {
            badges: &badges,
            selected: state.selected_platform(),
        }
        .render()
    );
    println!();
    println!("{}", grid.render());
}
