use anyhow::Result;
use contentcal_core::feedback::{feedback_link, feedback_message};
use owo_colors::OwoColorize;

use crate::context::Context;

pub async fn run(ctx: &Context, id: &str, open: bool) -> Result<()> {
    let post = ctx.find_post(id).await?;
    let link = feedback_link(&ctx.config.feedback_url, &post)?;

    println!("{}", "Message".bold());
    println!("{}", feedback_message(&post));
    println!();
    println!("{}", "Send it with".bold());
    println!("{link}");

    if open && open::that(link.as_str()).is_err() {
        println!("(Could not open browser automatically, please copy the URL above)");
    }

    Ok(())
}
