//! Post feed: records, list rendering and splash selection

mod post;
mod render;
mod splash;

pub use post::{Feed, Post};
pub use render::{FeedRenderer, render_feed};
pub use splash::{pick_splash, write_splash};
