pub mod format;
pub mod resize;
