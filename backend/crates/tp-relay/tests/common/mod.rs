#![allow(dead_code)]

mod channels;
mod fixtures;

pub use channels::{FailingChannel, GatedChannel, RecordingChannel};
pub use fixtures::{
    BOT_TOKEN, FailingStore, Harness, SESSION_SECRET, create_harness, signed_assertion,
};
