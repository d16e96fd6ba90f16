// purify/src/ui/mod.rs
pub mod change_summary;
pub mod output_format;
pub mod theme;
