//! Common functionality and types.
pub mod html_rewrite;

use console::Emoji;

pub static SUCCESS: Emoji = Emoji("✅ ", "");
pub static ERROR: Emoji = Emoji("❌ ", "");
pub static STARTING: Emoji = Emoji("🚀 ", "");
