//! Server-rendered HTML: the public portfolio page and the admin panel.

pub mod admin;
mod site;

pub use site::{robots_txt, sitemap_xml, HomePage, NavLink, RenderedSection};
pub use site::{FEATURED_WORD_LIMIT, GRID_WORD_LIMIT};
