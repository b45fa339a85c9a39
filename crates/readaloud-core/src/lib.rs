//! Document reading session engine: paragraph segmentation, highlight and
//! annotation marks, bionic rendering, speech playback, voice commands and the
//! cursor loupe.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod loupe;
pub mod marks;
pub mod render;
pub mod settings;
pub mod speech;
pub mod text_policy;
pub mod voice;
