//! Export - human-readable renderings of a settled session

pub mod share;

pub use share::{render_share_text, ShareContext};
