pub mod browse;
pub mod calendar;
pub mod config;
pub mod day;
pub mod feedback;
pub mod grid;
pub mod link;
pub mod platforms;
pub mod post;
