mod actions;
mod common;
mod scoring;
