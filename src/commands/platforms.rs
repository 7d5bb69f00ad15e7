use anyhow::Result;
use contentcal_core::CalendarMonth;
use contentcal_core::platforms::platform_counts;
use contentcal_core::view::{ViewEvent, ViewState};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::platform_colored;

pub async fn run(ctx: &Context, month: CalendarMonth, platform: Option<String>) -> Result<()> {
    let client = ctx.client()?;
    let session = ctx.load_session(month).await?;

    let mut state = ViewState::new(Some(client.to_string()), month);
    state.apply(ViewEvent::SelectPlatform(platform));

    if session.platforms().is_empty() {
        println!("{}", format!("No platforms found for {client}").dimmed());
        return Ok(());
    }

    let this_month = state.platform_badges(session.platforms(), session.month_posts());
    let all_months = platform_counts(
        session.platforms(),
        session.all_posts(),
        state.selected_platform(),
    );

    let width = session
        .platforms()
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0)
        .max("Platform".len());

    println!(
        "{}",
        format!(
            "{:<width$}  {:>10}  {:>10}",
            "Platform",
            month.label(),
            "All months"
        )
        .bold()
    );
    for ((name, month_count), (_, total)) in this_month.iter().zip(&all_months) {
        let padded = format!("{name:<width$}");
        let row = format!("{}  {:>10}  {:>10}", platform_colored(name, &padded), month_count, total);
        if state.selected_platform().is_some_and(|s| s != name) {
            println!("{}", row.dimmed());
        } else {
            println!("{row}");
        }
    }

    Ok(())
}
