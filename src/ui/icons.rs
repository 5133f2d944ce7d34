//! Shared UI icons.
//!
//! Emoji with plain-text fallbacks for terminals without unicode support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static TASKS: Emoji<'_, '_> = Emoji("🗂️  ", "");
pub static WAVE: Emoji<'_, '_> = Emoji("👋 ", "");
