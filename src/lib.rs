//! Terminal client for the JSearch job-search API.
//!
//! The pipeline runs query → fetch → normalize → sort → render, with paging
//! on top. [`session::Session`] owns the single mutable search state;
//! everything in [`normalize`], [`sort`] and [`render::view`] is pure, so
//! presenters can be swapped (terminal cards, HTML, or the TUI).

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod escape;
pub mod models;
pub mod normalize;
pub mod notify;
pub mod pagination;
pub mod query;
pub mod render;
pub mod session;
pub mod sort;
pub mod tui;
