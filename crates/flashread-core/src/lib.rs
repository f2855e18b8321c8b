//! Word-pacing playback engine and the reader/chat state shared by every
//! flashread front-end.
//!
//! Nothing in this crate touches a clock, a terminal or the network: hosts
//! pass `now_ms` in and render whatever [`render::Screen`] they are handed.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod chat;
pub mod history;
pub mod i18n;
pub mod input;
pub mod playback;
pub mod render;
pub mod settings;
pub mod text;
pub mod text_policy;
