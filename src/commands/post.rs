use anyhow::Result;
use contentcal_core::CalendarMonth;
use contentcal_core::view::{ViewEvent, ViewState};

use crate::context::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, id: &str) -> Result<()> {
    let post = ctx.find_post(id).await?;

    let month = post
        .parsed_date()
        .map(CalendarMonth::from_date)
        .unwrap_or_else(CalendarMonth::current);
    let mut state = ViewState::new(Some(ctx.client()?.to_string()), month);
    state.apply(ViewEvent::CardClicked(post));

    println!("{}", state.modal.render());

    Ok(())
}
