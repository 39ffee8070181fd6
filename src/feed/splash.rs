//! Splash selection

use crate::renderer::{HtmlParser, NodeRef, set_inner_html};
use crate::utils::Result;
use crate::utils::error::ConfigError;
use rand::Rng;

/// Pick one splash uniformly at random
pub fn pick_splash<'a, R>(pool: &'a [String], rng: &mut R) -> Result<&'a str>
where
    R: Rng,
{
    if pool.is_empty() {
        return Err(ConfigError::EmptySplashes.into());
    }
    let index = rng.gen_range(0..pool.len());
    Ok(&pool[index])
}

/// Write `"<splash>!"` into `target` as markup
pub fn write_splash(parser: &HtmlParser, target: &NodeRef, splash: &str) -> Result<()> {
    set_inner_html(parser, target, &format!("{splash}!"))
}
