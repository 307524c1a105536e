//! Board storage

mod memory;
mod seed;

pub use memory::InMemoryBoard;
pub use seed::{seed_demo, DemoBoard, DEMO_PASSWORD};
