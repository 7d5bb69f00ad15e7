//! Pre-filled feedback messages for a post.

use url::Url;

use crate::constants::FULL_DATE;
use crate::error::{ContentCalError, ContentCalResult};
use crate::month::format_post_date;
use crate::post::Post;

pub fn feedback_message(post: &Post) -> String {
    format!(
        "*Content Feedback Request*\n\n\
         *Post:* {title}\n\
         *Date:* {date}\n\n\
         *Description:* {description}\n\n\
         *Platforms:* {platforms}\n\
         *Target Audience:* {audience}\n\
         *Target Regions:* {target}\n\n\
         My feedback: ",
        title = post.title,
        date = format_post_date(&post.date, FULL_DATE),
        description = post.description,
        platforms = post.platforms.join(", "),
        audience = post.audience.join(", "),
        target = post.target.join(", "),
    )
}

/// Messaging deep link carrying the feedback message as `text`.
pub fn feedback_link(base: &str, post: &Post) -> ContentCalResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| ContentCalError::Config(format!("Invalid feedback URL '{base}': {e}")))?;
    url.query_pairs_mut()
        .append_pair("text", &feedback_message(post));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_FEEDBACK_URL;
    use crate::post::RawPost;
    use serde_json::json;

    fn sample() -> Post {
        let raw: RawPost = serde_json::from_value(json!({
            "id": "m2",
            "title": "Launch day",
            "description": "Big reveal & giveaway",
            "date": "2024-03-05",
            "platforms": ["Instagram", "Facebook"],
            "target": "Kerala",
        }))
        .unwrap();
        Post::from(raw)
    }

    #[test]
    fn message_lists_post_details() {
        let message = feedback_message(&sample());

        assert!(message.starts_with("*Content Feedback Request*\n\n*Post:* Launch day\n"));
        assert!(message.contains("*Date:* March 5, 2024\n"));
        assert!(message.contains("*Platforms:* Instagram, Facebook\n"));
        assert!(message.contains("*Target Audience:* General audience\n"));
        assert!(message.contains("*Target Regions:* Kerala\n"));
        assert!(message.ends_with("My feedback: "));
    }

    #[test]
    fn link_encodes_message() {
        let post = sample();
        let link = feedback_link(DEFAULT_FEEDBACK_URL, &post).unwrap();

        assert!(link.as_str().starts_with("https://wa.me/?text="));
        assert!(!link.as_str().contains(' '));
        assert!(!link.as_str().contains('\n'));
        assert!(link.as_str().contains("%26"));

        let (key, text) = link.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(text, feedback_message(&post));
    }

    #[test]
    fn bad_base_is_a_config_error() {
        assert!(matches!(
            feedback_link("not a url", &sample()),
            Err(ContentCalError::Config(_))
        ));
    }
}
