//! View state: displayed month, platform filter, presentation mode and the
//! post detail modal.
//!
//! The whole state is one serializable value, changed only through
//! [`ViewState::apply`]. Front ends render from a snapshot and turn user
//! input into [`ViewEvent`]s.

use serde::{Deserialize, Serialize};

use crate::month::{CalendarMonth, Step};
use crate::platforms::{distinct_platforms, matches_platform, platform_counts};
use crate::post::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Month grid over the displayed month's document.
    #[default]
    Calendar,
    /// Card list over every month.
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Calendar => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Calendar,
        }
    }
}

/// The post detail modal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Modal {
    #[default]
    Closed,
    Single {
        post: Post,
    },
    /// Several posts on one day, paged one at a time.
    Multi {
        posts: Vec<Post>,
        index: usize,
    },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    /// All posts held by the modal.
    pub fn posts(&self) -> &[Post] {
        match self {
            Modal::Closed => &[],
            Modal::Single { post } => std::slice::from_ref(post),
            Modal::Multi { posts, .. } => posts,
        }
    }

    /// The post currently shown.
    pub fn current(&self) -> Option<&Post> {
        match self {
            Modal::Closed => None,
            Modal::Single { post } => Some(post),
            Modal::Multi { posts, index } => posts.get(*index),
        }
    }

    /// (zero-based index, total) for the page indicator.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Modal::Closed => None,
            Modal::Single { .. } => Some((0, 1)),
            Modal::Multi { posts, index } => Some((*index, posts.len())),
        }
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.current().map(|p| p.date.as_str())
    }

    /// Distinct platforms across every post in the modal.
    pub fn platform_count(&self) -> usize {
        distinct_platforms(self.posts()).len()
    }

    fn page(&mut self, step: Step) {
        if let Modal::Multi { posts, index } = self {
            let len = posts.len();
            if len < 2 {
                return;
            }
            *index = match step {
                Step::Next => (*index + 1) % len,
                Step::Prev => (*index + len - 1) % len,
            };
        }
    }
}

/// Everything a user can do to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// `None` selects all platforms.
    SelectPlatform(Option<String>),
    SetMode(ViewMode),
    ToggleMode,
    NavigateMonth(Step),
    /// A calendar day was picked; carries the posts shown on that day.
    DayClicked(Vec<Post>),
    CardClicked(Post),
    NextPost,
    PrevPost,
    Close,
    Escape,
    BackdropClicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub client: Option<String>,
    pub month: CalendarMonth,
    pub selected_platform: Option<String>,
    pub mode: ViewMode,
    pub modal: Modal,
}

impl ViewState {
    pub fn new(client: Option<String>, month: CalendarMonth) -> Self {
        ViewState {
            client,
            month,
            selected_platform: None,
            mode: ViewMode::default(),
            modal: Modal::Closed,
        }
    }

    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::SelectPlatform(platform) => self.selected_platform = platform,
            ViewEvent::SetMode(mode) => self.mode = mode,
            ViewEvent::ToggleMode => self.mode = self.mode.toggled(),
            ViewEvent::NavigateMonth(step) => {
                self.month = self.month.step(step);
                self.modal = Modal::Closed;
            }
            ViewEvent::DayClicked(mut posts) => match posts.len() {
                0 => {}
                1 => {
                    let post = posts.remove(0);
                    self.modal = Modal::Single { post };
                }
                _ => self.modal = Modal::Multi { posts, index: 0 },
            },
            ViewEvent::CardClicked(post) => self.modal = Modal::Single { post },
            ViewEvent::NextPost => self.modal.page(Step::Next),
            ViewEvent::PrevPost => self.modal.page(Step::Prev),
            ViewEvent::Close | ViewEvent::Escape | ViewEvent::BackdropClicked => {
                self.modal = Modal::Closed
            }
        }
    }

    pub fn selected_platform(&self) -> Option<&str> {
        self.selected_platform.as_deref()
    }

    /// The filtered list the active presentation shows: the displayed
    /// month's posts in calendar mode, every month's posts in grid mode.
    pub fn visible_posts<'a>(&self, all_posts: &'a [Post], month_posts: &'a [Post]) -> Vec<&'a Post> {
        let source = match self.mode {
            ViewMode::Calendar => month_posts,
            ViewMode::Grid => all_posts,
        };
        source
            .iter()
            .filter(|p| matches_platform(p, self.selected_platform()))
            .collect()
    }

    /// Owned copy of [`Self::visible_posts`], for grid building.
    pub fn visible_posts_owned(&self, all_posts: &[Post], month_posts: &[Post]) -> Vec<Post> {
        self.visible_posts(all_posts, month_posts)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filter bar badges. Counts always come from the displayed month.
    pub fn platform_badges(&self, platforms: &[String], month_posts: &[Post]) -> Vec<(String, usize)> {
        platform_counts(platforms, month_posts, self.selected_platform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MonthGrid;
    use crate::post::{Post, parse_month_document};
    use crate::post::tests::post;
    use crate::store::tests::ACME_MARCH;
    use chrono::NaiveDate;

    fn march() -> CalendarMonth {
        CalendarMonth::new(2024, 2).unwrap()
    }

    fn three_posts() -> Vec<Post> {
        vec![
            post("1", "2024-03-05", &["Instagram"]),
            post("2", "2024-03-05", &["Facebook"]),
            post("3", "2024-03-05", &["YouTube"]),
        ]
    }

    #[test]
    fn acme_march_day_five() {
        let month_posts = parse_month_document(ACME_MARCH).unwrap();
        let mut state = ViewState::new(Some("acme".into()), march());

        let visible = state.visible_posts_owned(&month_posts, &month_posts);
        let grid = MonthGrid::build(state.month, &visible, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let day_five: Vec<Post> = grid.day(5).unwrap().posts.iter().map(|p| (*p).clone()).collect();

        state.apply(ViewEvent::DayClicked(day_five));
        assert!(matches!(&state.modal, Modal::Multi { posts, index: 0 } if posts.len() == 2));

        let platforms = distinct_platforms(&month_posts);
        assert_eq!(
            state.platform_badges(&platforms, &month_posts),
            vec![("Instagram".to_string(), 2), ("Facebook".to_string(), 1)]
        );
    }

    #[test]
    fn day_click_with_one_post_opens_single() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::DayClicked(vec![post("1", "2024-03-05", &["Instagram"])]));

        assert!(matches!(&state.modal, Modal::Single { post } if post.id == "1"));
        assert_eq!(state.modal.position(), Some((0, 1)));
        assert_eq!(state.modal.selected_date(), Some("2024-03-05"));
    }

    #[test]
    fn day_click_without_posts_does_nothing() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::DayClicked(Vec::new()));
        assert_eq!(state.modal, Modal::Closed);
    }

    #[test]
    fn card_click_opens_single() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::DayClicked(three_posts()));
        state.apply(ViewEvent::CardClicked(post("9", "2024-05-01", &["TikTok"])));

        assert_eq!(state.modal.posts().len(), 1);
        assert_eq!(state.modal.current().unwrap().id, "9");
    }

    #[test]
    fn paging_wraps_both_ways() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::DayClicked(three_posts()));

        state.apply(ViewEvent::NextPost);
        state.apply(ViewEvent::NextPost);
        assert_eq!(state.modal.position(), Some((2, 3)));
        state.apply(ViewEvent::NextPost);
        assert_eq!(state.modal.position(), Some((0, 3)));

        state.apply(ViewEvent::PrevPost);
        assert_eq!(state.modal.position(), Some((2, 3)));
        assert_eq!(state.modal.current().unwrap().id, "3");
    }

    #[test]
    fn paging_a_single_post_does_nothing() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::CardClicked(post("1", "2024-03-05", &["Instagram"])));
        let before = state.clone();

        state.apply(ViewEvent::NextPost);
        state.apply(ViewEvent::PrevPost);
        assert_eq!(state, before);

        let mut closed = ViewState::new(None, march());
        closed.apply(ViewEvent::NextPost);
        assert_eq!(closed.modal, Modal::Closed);
    }

    #[test]
    fn every_close_path_closes() {
        for close in [ViewEvent::Close, ViewEvent::Escape, ViewEvent::BackdropClicked] {
            let mut state = ViewState::new(None, march());
            state.apply(ViewEvent::DayClicked(three_posts()));
            state.apply(ViewEvent::NextPost);
            state.apply(close);
            assert!(!state.modal.is_open());
            assert!(state.modal.current().is_none());
        }
    }

    #[test]
    fn modal_platform_count() {
        let mut state = ViewState::new(None, march());
        state.apply(ViewEvent::DayClicked(vec![
            post("1", "2024-03-05", &["Instagram", "Facebook"]),
            post("2", "2024-03-05", &["Instagram"]),
        ]));
        assert_eq!(state.modal.platform_count(), 2);
    }

    #[test]
    fn mode_switch_keeps_filter_and_changes_collection() {
        let all = vec![
            post("1", "2024-03-05", &["Instagram"]),
            post("2", "2024-04-05", &["Instagram"]),
            post("3", "2024-04-06", &["Facebook"]),
        ];
        let month_posts = vec![all[0].clone()];

        let mut state = ViewState::new(Some("acme".into()), march());
        state.apply(ViewEvent::SelectPlatform(Some("Instagram".into())));
        assert_eq!(state.visible_posts(&all, &month_posts).len(), 1);

        state.apply(ViewEvent::ToggleMode);
        assert_eq!(state.mode, ViewMode::Grid);
        assert_eq!(state.selected_platform(), Some("Instagram"));
        let ids: Vec<_> = state.visible_posts(&all, &month_posts).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        state.apply(ViewEvent::SelectPlatform(None));
        assert_eq!(state.visible_posts(&all, &month_posts).len(), 3);

        state.apply(ViewEvent::SetMode(ViewMode::Calendar));
        assert_eq!(state.visible_posts(&all, &month_posts).len(), 1);
    }

    #[test]
    fn month_navigation_rolls_and_closes_modal() {
        let mut state = ViewState::new(None, CalendarMonth::new(2024, 11).unwrap());
        state.apply(ViewEvent::CardClicked(post("1", "2024-12-05", &["Instagram"])));

        state.apply(ViewEvent::NavigateMonth(Step::Next));
        assert_eq!(state.month, CalendarMonth::new(2025, 0).unwrap());
        assert!(!state.modal.is_open());

        state.apply(ViewEvent::NavigateMonth(Step::Prev));
        state.apply(ViewEvent::NavigateMonth(Step::Prev));
        assert_eq!(state.month, CalendarMonth::new(2024, 10).unwrap());
    }

    #[test]
    fn state_serializes() {
        let mut state = ViewState::new(Some("acme".into()), march());
        state.apply(ViewEvent::DayClicked(three_posts()));
        state.apply(ViewEvent::NextPost);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mode"], "calendar");
        assert_eq!(json["modal"]["state"], "multi");
        assert_eq!(json["modal"]["index"], 1);
        assert_eq!(json["month"]["month0"], 2);
    }
}
