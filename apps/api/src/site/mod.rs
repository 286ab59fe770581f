// Server-rendered single-page portfolio.
// Static copy lives in content.rs; render.rs turns it and the live gallery into HTML.

pub mod content;
pub mod handlers;
pub mod render;
