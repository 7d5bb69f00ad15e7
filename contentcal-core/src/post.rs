//! Post records and the normalizer that builds them from month documents.
//!
//! Month documents are produced by hand or by an external publishing process,
//! so fields arrive in several shapes: lists or bare strings, a legacy
//! singular `platform` field, missing keys. [`RawPost`] accepts all of them and
//! `Post::from(raw)` applies a fixed fallback per field, so every [`Post`]
//! the rest of the crate sees has non-empty `audience`, `target` and
//! `platforms`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{
    DEFAULT_AUDIENCE, DEFAULT_PLATFORM, DEFAULT_TARGET, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};
use crate::error::ContentCalResult;

/// A scheduled content item, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub captions: Option<String>,
    pub aim: String,
    pub benefit: String,
    pub audience: Vec<String>,
    pub target: Vec<String>,
    pub tone: String,
    pub platforms: Vec<String>,
    pub status: PostStatus,
    pub approved: Option<bool>,
    pub media_url: String,
    /// `YYYY-MM-DD`, the only key joining posts to calendar days.
    pub date: String,
    /// Platform name -> published URL. Missing or blank means not posted yet.
    pub post_links: BTreeMap<String, String>,
    pub special: bool,
}

/// Publication status. Unknown values are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Published,
    Scheduled,
    Draft,
    Other(String),
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "published" => PostStatus::Published,
            "scheduled" => PostStatus::Scheduled,
            "draft" => PostStatus::Draft,
            _ => PostStatus::Other(value),
        }
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Published => "published".to_string(),
            PostStatus::Scheduled => "scheduled".to_string(),
            PostStatus::Draft => "draft".to_string(),
            PostStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for PostStatus {
    /// Capitalized for display ("Published", "Needs review").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw: String = self.clone().into();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// What kind of surface a post's media URL renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    /// A URL whose extension we don't know how to show.
    Unsupported,
    /// No URL at all.
    Unavailable,
}

/// Result of asking for a post's link on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformLink<'a> {
    Published(&'a str),
    NotPosted,
}

impl Post {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }

    /// Captions, or the description when there are none.
    pub fn display_captions(&self) -> &str {
        match self.captions.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => &self.description,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.approved.unwrap_or(false)
    }

    pub fn media_kind(&self) -> MediaKind {
        media_kind(&self.media_url)
    }

    pub fn link_for(&self, platform: &str) -> PlatformLink<'_> {
        match self.post_links.get(platform) {
            Some(url) if !url.trim().is_empty() => PlatformLink::Published(url.trim()),
            _ => PlatformLink::NotPosted,
        }
    }
}

/// Classify a media URL by the extension of its path.
pub fn media_kind(url: &str) -> MediaKind {
    let url = url.trim();
    if url.is_empty() {
        return MediaKind::Unavailable;
    }

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let Some((_, ext)) = file.rsplit_once('.') else {
        return MediaKind::Unsupported;
    };
    let ext = ext.to_lowercase();

    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Unsupported
    }
}

/// Shorten an http(s) URL to `scheme://host/[...]/file` for placeholder text.
pub fn obfuscate_url(url: &str) -> String {
    if !url.starts_with("http") {
        return url.to_string();
    }

    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 4 {
        return url.to_string();
    }

    format!(
        "{}//{}/[...]/{}",
        parts[0],
        parts[2],
        parts[parts.len() - 1]
    )
}

// ============================================================================
// Raw (pre-normalization) shape
// ============================================================================

/// A post as it appears in a month document.
///
/// Every field is read leniently: a value of the wrong JSON type is treated
/// as absent, so it gets its default instead of dropping the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub captions: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub aim: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub benefit: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub audience: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub target: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub tone: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub platforms: Option<OneOrMany>,
    /// Legacy singular form of `platforms`.
    #[serde(default, deserialize_with = "lenient")]
    pub platform: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub approved: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub media_url: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub post_links: Option<BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub special: Option<bool>,
}

/// A field that may be a list or a single bare value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<Value>),
    One(Scalar),
}

/// Any JSON scalar, kept as text. Ids and labels show up as numbers too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Deserialize `T`, or `None` if the value has some other shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Booleans, plus `"true"`/`"false"` strings and 0/1 numbers.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().to_lowercase().parse().ok(),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    };
    Ok(flag)
}

fn text(value: Option<Scalar>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// List items that are scalars, as text. Nulls and nested values are dropped.
fn scalar_items(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Scalar>(item).ok())
        .map(|item| item.to_string())
        .filter(|item| !item.trim().is_empty())
        .collect()
}

/// Lists are kept, a bare value becomes a one-element list.
fn list_items(value: Option<OneOrMany>) -> Vec<String> {
    match value {
        Some(OneOrMany::Many(items)) => scalar_items(items),
        Some(OneOrMany::One(item)) => {
            let item = item.to_string();
            if item.trim().is_empty() { Vec::new() } else { vec![item] }
        }
        None => Vec::new(),
    }
}

/// List field with a fixed default for anything empty.
fn normalize_list(value: Option<OneOrMany>, default: &str) -> Vec<String> {
    let list = list_items(value);
    if list.is_empty() {
        vec![default.to_string()]
    } else {
        list
    }
}

fn normalize_platforms(platforms: Option<OneOrMany>, legacy: Option<Scalar>) -> Vec<String> {
    let platforms = list_items(platforms);
    if !platforms.is_empty() {
        return platforms;
    }
    normalize_list(legacy.map(OneOrMany::One), DEFAULT_PLATFORM)
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let post_links = raw
            .post_links
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(platform, url)| match url {
                Value::String(u) => Some((platform, u)),
                _ => None,
            })
            .collect();

        Post {
            id: text(raw.id),
            title: text(raw.title),
            description: text(raw.description),
            captions: raw.captions.map(|c| c.to_string()),
            aim: text(raw.aim),
            benefit: text(raw.benefit),
            audience: normalize_list(raw.audience, DEFAULT_AUDIENCE),
            target: normalize_list(raw.target, DEFAULT_TARGET),
            tone: text(raw.tone),
            platforms: normalize_platforms(raw.platforms, raw.platform),
            status: PostStatus::from(text(raw.status)),
            approved: raw.approved,
            media_url: text(raw.media_url),
            date: text(raw.date).trim().to_string(),
            post_links,
            special: raw.special.unwrap_or(false),
        }
    }
}

/// Parse a month document (a JSON array of raw posts) into normalized posts.
///
/// Entries that aren't JSON objects are skipped and logged; fields of the
/// wrong type fall back to their defaults. A document that isn't an array is
/// an error.
pub fn parse_month_document(json: &str) -> ContentCalResult<Vec<Post>> {
    let records: Vec<Value> = serde_json::from_str(json)?;

    let posts = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if !record.is_object() {
                tracing::warn!(index, "skipping month document entry that isn't an object");
                return None;
            }
            match serde_json::from_value::<RawPost>(record) {
                Ok(raw) => Some(Post::from(raw)),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed post record");
                    None
                }
            }
        })
        .collect();

    Ok(posts)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal normalized post for tests elsewhere in the crate.
    pub(crate) fn post(id: &str, date: &str, platforms: &[&str]) -> Post {
        let raw: RawPost = serde_json::from_value(json!({
            "id": id,
            "title": format!("Post {id}"),
            "date": date,
            "platforms": platforms,
        }))
        .unwrap();
        Post::from(raw)
    }

    fn normalize(value: serde_json::Value) -> Post {
        Post::from(serde_json::from_value::<RawPost>(value).unwrap())
    }

    #[test]
    fn scalar_fields_become_single_element_lists() {
        let p = normalize(json!({
            "id": "1",
            "audience": "Parents",
            "target": "Kerala",
            "platforms": "Instagram",
        }));

        assert_eq!(p.audience, vec!["Parents"]);
        assert_eq!(p.target, vec!["Kerala"]);
        assert_eq!(p.platforms, vec!["Instagram"]);
    }

    #[test]
    fn absent_fields_get_defaults() {
        let p = normalize(json!({ "id": "1" }));

        assert_eq!(p.audience, vec![DEFAULT_AUDIENCE]);
        assert_eq!(p.target, vec![DEFAULT_TARGET]);
        assert_eq!(p.platforms, vec![DEFAULT_PLATFORM]);
        assert!(p.post_links.is_empty());
        assert!(!p.special);
    }

    #[test]
    fn empty_values_get_defaults() {
        let p = normalize(json!({
            "id": "1",
            "audience": [],
            "target": "",
            "platforms": null,
        }));

        assert_eq!(p.audience, vec![DEFAULT_AUDIENCE]);
        assert_eq!(p.target, vec![DEFAULT_TARGET]);
        assert_eq!(p.platforms, vec![DEFAULT_PLATFORM]);
    }

    #[test]
    fn legacy_platform_field_is_used() {
        let p = normalize(json!({ "id": "1", "platform": "LinkedIn" }));
        assert_eq!(p.platforms, vec!["LinkedIn"]);

        let p = normalize(json!({
            "id": "1",
            "platform": "LinkedIn",
            "platforms": ["Instagram", "Facebook"],
        }));
        assert_eq!(p.platforms, vec!["Instagram", "Facebook"]);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let p = normalize(json!({ "id": 42 }));
        assert_eq!(p.id, "42");
    }

    #[test]
    fn status_is_open_enum() {
        assert_eq!(PostStatus::from("Published".to_string()), PostStatus::Published);
        assert_eq!(PostStatus::from("draft".to_string()), PostStatus::Draft);

        let other = PostStatus::from("needs review".to_string());
        assert_eq!(other, PostStatus::Other("needs review".to_string()));
        assert_eq!(other.to_string(), "Needs review");
        assert_eq!(PostStatus::Scheduled.to_string(), "Scheduled");
    }

    #[test]
    fn media_kind_by_extension() {
        assert_eq!(media_kind("clip.mp4"), MediaKind::Video);
        assert_eq!(media_kind("shot.png"), MediaKind::Image);
        assert_eq!(media_kind("doc.pdf"), MediaKind::Unsupported);
        assert_eq!(media_kind(""), MediaKind::Unavailable);
    }

    #[test]
    fn media_kind_ignores_query_and_case() {
        assert_eq!(
            media_kind("https://cdn.example.com/a/b/CLIP.MOV?token=abc.png"),
            MediaKind::Video
        );
        assert_eq!(media_kind("https://cdn.example.com/img.jpeg#top"), MediaKind::Image);
        assert_eq!(media_kind("https://cdn.example.com/noext"), MediaKind::Unsupported);
    }

    #[test]
    fn obfuscates_http_urls_only() {
        assert_eq!(
            obfuscate_url("https://drive.example.com/files/u/123/shot.png"),
            "https://drive.example.com/[...]/shot.png"
        );
        assert_eq!(obfuscate_url("shot.png"), "shot.png");
    }

    #[test]
    fn platform_links() {
        let p = normalize(json!({
            "id": "1",
            "platforms": ["Instagram", "Facebook", "YouTube"],
            "post_links": {
                "Instagram": "https://instagram.com/p/abc",
                "Facebook": "  ",
                "YouTube": null,
            },
        }));

        assert_eq!(
            p.link_for("Instagram"),
            PlatformLink::Published("https://instagram.com/p/abc")
        );
        assert_eq!(p.link_for("Facebook"), PlatformLink::NotPosted);
        assert_eq!(p.link_for("YouTube"), PlatformLink::NotPosted);
        assert_eq!(p.link_for("TikTok"), PlatformLink::NotPosted);
    }

    #[test]
    fn captions_fall_back_to_description() {
        let p = normalize(json!({ "id": "1", "description": "About the launch" }));
        assert_eq!(p.display_captions(), "About the launch");

        let p = normalize(json!({
            "id": "1",
            "description": "About the launch",
            "captions": "Launch day!",
        }));
        assert_eq!(p.display_captions(), "Launch day!");
    }

    #[test]
    fn mistyped_fields_fall_back_per_field() {
        let doc = r#"[
            {"id": "a", "date": "2024-03-05", "audience": 7},
            {"id": "t", "date": "2024-03-05", "target": ["Kerala", 3, null]},
            {"id": "p", "date": "2024-03-05", "approved": "true"},
            {"id": "s", "date": "2024-03-05", "special": 1},
            {"id": "n", "date": "2024-03-05", "title": 2024, "captions": {"en": "hi"}},
            {"id": "ok", "date": "2024-03-05", "post_links": {"Instagram": 5, "Facebook": "https://fb.com/p/1"}},
            42,
            "stray"
        ]"#;

        let posts = parse_month_document(doc).unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "t", "p", "s", "n", "ok"]);

        assert_eq!(posts[0].audience, vec!["7"]);
        assert_eq!(posts[1].target, vec!["Kerala", "3"]);
        assert!(posts[2].is_approved());
        assert!(posts[3].special);
        assert_eq!(posts[4].title, "2024");
        assert_eq!(posts[4].captions, None);
        assert_eq!(posts[5].link_for("Instagram"), PlatformLink::NotPosted);
        assert_eq!(
            posts[5].link_for("Facebook"),
            PlatformLink::Published("https://fb.com/p/1")
        );
    }

    #[test]
    fn unparseable_flags_get_defaults() {
        let p = normalize(json!({ "id": "1", "approved": "maybe", "special": [true] }));
        assert_eq!(p.approved, None);
        assert!(!p.special);

        let p = normalize(json!({ "id": "1", "approved": 0, "special": "TRUE" }));
        assert_eq!(p.approved, Some(false));
        assert!(p.special);
    }

    #[test]
    fn scalar_platforms_of_any_type() {
        let p = normalize(json!({ "id": "1", "platforms": [null, {}], "platform": "X" }));
        assert_eq!(p.platforms, vec!["X"]);

        let p = normalize(json!({ "id": "1", "platforms": 404 }));
        assert_eq!(p.platforms, vec!["404"]);
    }

    #[test]
    fn non_array_document_is_an_error() {
        assert!(parse_month_document(r#"{"posts": []}"#).is_err());
        assert!(parse_month_document("not json").is_err());
    }

    #[test]
    fn parsed_date() {
        assert_eq!(
            post("1", "2024-02-29", &["X"]).parsed_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(post("1", "2023-02-29", &["X"]).parsed_date(), None);
        assert_eq!(post("1", "soon", &["X"]).parsed_date(), None);
    }
}
