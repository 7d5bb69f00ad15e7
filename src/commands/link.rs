use anyhow::Result;
use contentcal_core::post::PlatformLink;
use owo_colors::OwoColorize;

use crate::context::Context;

pub async fn run(ctx: &Context, id: &str, platform: &str, open: bool) -> Result<()> {
    let post = ctx.find_post(id).await?;

    match post.link_for(platform) {
        PlatformLink::Published(url) => {
            println!("{url}");
            if open && open::that(url).is_err() {
                println!("(Could not open browser automatically, please copy the URL above)");
            }
        }
        PlatformLink::NotPosted => {
            println!("{}", format!("Not posted yet on {platform}").yellow());
        }
    }

    Ok(())
}
