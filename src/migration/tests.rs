#![allow(clippy::unwrap_used)]

mod tests_v0;
