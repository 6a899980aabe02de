pub mod app;
pub mod carousel;
pub mod notice;
