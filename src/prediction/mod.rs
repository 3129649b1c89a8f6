pub mod format;
pub mod labels;
pub mod ranker;
