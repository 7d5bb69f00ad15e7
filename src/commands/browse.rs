//! Interactive browser: the month calendar or card grid, a platform filter
//! and the post detail modal, driven by prompts.

use std::fmt;

use anyhow::Result;
use contentcal_core::feedback::feedback_link;
use contentcal_core::grid::MonthGrid;
use contentcal_core::month::Step;
use contentcal_core::post::PlatformLink;
use contentcal_core::view::{ViewEvent, ViewMode, ViewState};
use contentcal_core::{CalendarMonth, Post};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use crate::commands::calendar::print_calendar;
use crate::context::Context;
use crate::render::Render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PrevMonth,
    NextMonth,
    OpenDay,
    OpenPost,
    FilterPlatform,
    ToggleMode(ViewMode),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::PrevMonth => write!(f, "Previous month"),
            Action::NextMonth => write!(f, "Next month"),
            Action::OpenDay => write!(f, "Open a day"),
            Action::OpenPost => write!(f, "Open a post"),
            Action::FilterPlatform => write!(f, "Filter by platform"),
            Action::ToggleMode(ViewMode::Calendar) => write!(f, "Switch to grid view"),
            Action::ToggleMode(ViewMode::Grid) => write!(f, "Switch to calendar view"),
            Action::Quit => write!(f, "Quit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalAction {
    NextPost,
    PrevPost,
    Link,
    Feedback,
    Close,
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalAction::NextPost => write!(f, "Next post"),
            ModalAction::PrevPost => write!(f, "Previous post"),
            ModalAction::Link => write!(f, "View on a platform"),
            ModalAction::Feedback => write!(f, "Send feedback"),
            ModalAction::Close => write!(f, "Close"),
        }
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let mut state = ViewState::new(Some(client.to_string()), CalendarMonth::current());
    let mut session = ctx.load_session(state.month).await?;

    loop {
        println!();

        if state.modal.is_open() {
            println!("{}", state.modal.render());
            println!();
            modal_step(ctx, &mut state)?;
            continue;
        }

        let visible = state.visible_posts_owned(session.all_posts(), session.month_posts());
        match state.mode {
            ViewMode::Calendar => print_calendar(
                &state,
                session.platforms(),
                session.all_posts(),
                session.month_posts(),
            ),
            ViewMode::Grid => print_cards(&visible),
        }
        println!();

        let actions = actions_for(state.mode);
        let Some(choice) = Select::new()
            .with_prompt("What next")
            .items(&actions)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        match actions[choice] {
            Action::PrevMonth => {
                state.apply(ViewEvent::NavigateMonth(Step::Prev));
                ctx.reload_month(&mut session, state.month).await;
            }
            Action::NextMonth => {
                state.apply(ViewEvent::NavigateMonth(Step::Next));
                ctx.reload_month(&mut session, state.month).await;
            }
            Action::OpenDay => {
                let posts = pick_day(&state, &visible)?;
                state.apply(ViewEvent::DayClicked(posts));
            }
            Action::OpenPost => {
                if let Some(post) = pick_post(&visible)? {
                    state.apply(ViewEvent::CardClicked(post));
                }
            }
            Action::FilterPlatform => {
                let badges = state.platform_badges(session.platforms(), session.month_posts());
                if let Some(platform) = pick_platform(&badges)? {
                    state.apply(ViewEvent::SelectPlatform(platform));
                }
            }
            Action::ToggleMode(_) => state.apply(ViewEvent::ToggleMode),
            Action::Quit => break,
        }
    }

    Ok(())
}

fn actions_for(mode: ViewMode) -> Vec<Action> {
    match mode {
        ViewMode::Calendar => vec![
            Action::OpenDay,
            Action::PrevMonth,
            Action::NextMonth,
            Action::FilterPlatform,
            Action::ToggleMode(mode),
            Action::Quit,
        ],
        ViewMode::Grid => vec![
            Action::OpenPost,
            Action::FilterPlatform,
            Action::ToggleMode(mode),
            Action::Quit,
        ],
    }
}

fn print_cards(posts: &[Post]) {
    if posts.is_empty() {
        println!("{}", "No posts found".dimmed());
        println!("{}", "Check back later for new content.".dimmed());
        return;
    }

    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", post.render());
    }
}

/// Ask for a day of the displayed month and return the posts shown on it.
fn pick_day(state: &ViewState, visible: &[Post]) -> Result<Vec<Post>> {
    let month = state.month;
    let last = month.days_in_month();

    let day: u32 = Input::new()
        .with_prompt(format!("Day (1-{last})"))
        .validate_with(move |input: &u32| -> Result<(), String> {
            if (1..=last).contains(input) {
                Ok(())
            } else {
                Err(format!("{} has {} days", month.label(), last))
            }
        })
        .interact_text()?;

    let today = chrono::Local::now().date_naive();
    let grid = MonthGrid::build(month, visible, today);
    let posts: Vec<Post> = grid
        .day(day)
        .map(|cell| cell.posts.iter().map(|p| (*p).clone()).collect())
        .unwrap_or_default();

    if posts.is_empty() {
        println!(
            "{}",
            format!("No posts scheduled for {}", month.date_string(day)).dimmed()
        );
    }

    Ok(posts)
}

fn pick_post(posts: &[Post]) -> Result<Option<Post>> {
    if posts.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = posts
        .iter()
        .map(|p| format!("{}  {}", p.date, p.title))
        .collect();
    let selection = Select::new()
        .with_prompt("Post")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| posts[i].clone()))
}

/// `Some(None)` selects all platforms; `None` means the prompt was dismissed.
fn pick_platform(badges: &[(String, usize)]) -> Result<Option<Option<String>>> {
    let mut items = vec!["All Platforms".to_string()];
    items.extend(badges.iter().map(|(name, count)| format!("{name} ({count})")));

    let selection = Select::new()
        .with_prompt("Platform")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| match i {
        0 => None,
        i => Some(badges[i - 1].0.clone()),
    }))
}

fn modal_step(ctx: &Context, state: &mut ViewState) -> Result<()> {
    let Some(post) = state.modal.current().cloned() else {
        return Ok(());
    };
    let paged = state.modal.posts().len() > 1;

    let mut actions = Vec::new();
    if paged {
        actions.extend([ModalAction::NextPost, ModalAction::PrevPost]);
    }
    actions.extend([ModalAction::Link, ModalAction::Feedback, ModalAction::Close]);

    let Some(choice) = Select::new()
        .with_prompt("Post")
        .items(&actions)
        .default(0)
        .interact_opt()?
    else {
        state.apply(ViewEvent::Escape);
        return Ok(());
    };

    match actions[choice] {
        ModalAction::NextPost => state.apply(ViewEvent::NextPost),
        ModalAction::PrevPost => state.apply(ViewEvent::PrevPost),
        ModalAction::Link => show_link(&post)?,
        ModalAction::Feedback => {
            let link = feedback_link(&ctx.config.feedback_url, &post)?;
            println!("{link}");
            if open::that(link.as_str()).is_err() {
                println!("(Could not open browser automatically, please copy the URL above)");
            }
        }
        ModalAction::Close => state.apply(ViewEvent::Close),
    }

    Ok(())
}

fn show_link(post: &Post) -> Result<()> {
    let Some(selection) = Select::new()
        .with_prompt("Platform")
        .items(&post.platforms)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    let platform = &post.platforms[selection];
    match post.link_for(platform) {
        PlatformLink::Published(url) => {
            println!("{url}");
            if open::that(url).is_err() {
                println!("(Could not open browser automatically, please copy the URL above)");
            }
        }
        PlatformLink::NotPosted => {
            println!("{}", format!("Not posted yet on {platform}").yellow());
        }
    }

    Ok(())
}
