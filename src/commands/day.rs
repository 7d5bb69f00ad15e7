use anyhow::Result;
use contentcal_core::CalendarMonth;
use contentcal_core::constants::LONG_DATE;
use contentcal_core::month::{format_post_date, parse_date, posts_for_date};
use contentcal_core::view::{ViewEvent, ViewState};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, date: &str, page: usize, platform: Option<String>) -> Result<()> {
    let day = parse_date(date)?;
    let month = CalendarMonth::from_date(day);
    let client = ctx.client()?;
    let session = ctx.load_session(month).await?;

    let mut state = ViewState::new(Some(client.to_string()), month);
    state.apply(ViewEvent::SelectPlatform(platform));

    let visible = state.visible_posts_owned(session.all_posts(), session.month_posts());
    let date = day.format("%Y-%m-%d").to_string();
    let posts: Vec<_> = posts_for_date(&visible, &date).into_iter().cloned().collect();

    if posts.is_empty() {
        println!(
            "{}",
            format!("No posts scheduled for {}", format_post_date(&date, LONG_DATE)).dimmed()
        );
        return Ok(());
    }

    state.apply(ViewEvent::DayClicked(posts));
    for _ in 1..page.max(1) {
        state.apply(ViewEvent::NextPost);
    }

    println!("{}", state.modal.render());

    Ok(())
}
