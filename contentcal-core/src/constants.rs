/// Month document file stems, indexed by zero-based month.
pub const MONTH_FILE_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const DEFAULT_AUDIENCE: &str = "General audience";
pub const DEFAULT_TARGET: &str = "All regions";
pub const DEFAULT_PLATFORM: &str = "Social Media";

/// Where feedback messages are sent unless the config says otherwise.
pub const DEFAULT_FEEDBACK_URL: &str = "https://wa.me/";

pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "ogg", "mov", "avi"];
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// chrono formats for post dates.
pub const LONG_DATE: &str = "%A, %B %-d, %Y";
pub const FULL_DATE: &str = "%B %-d, %Y";
pub const SHORT_DATE: &str = "%b %-d";
