mod common;
mod insights;
mod ranking;
mod recompute;
