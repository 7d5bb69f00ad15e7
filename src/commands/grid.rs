use anyhow::Result;
use contentcal_core::platforms::filter_by_platform;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, platform: Option<String>) -> Result<()> {
    let client = ctx.client()?;
    let posts = ctx.store.load_all(Some(client)).await;
    let visible = filter_by_platform(&posts, platform.as_deref());

    if visible.is_empty() {
        println!("{}", format!("No posts found for {client}").dimmed());
        if platform.is_some() {
            println!("{}", "Try another platform, or drop --platform to see all posts.".dimmed());
        } else {
            println!("{}", "Check back later for new content.".dimmed());
        }
        return Ok(());
    }

    for (i, post) in visible.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", post.render());
    }

    Ok(())
}
