// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod time;
pub mod util;

pub use time::fixed_now;
pub use util::{DummySlug, TestClock};
