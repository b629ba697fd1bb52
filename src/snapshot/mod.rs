pub mod storage;

pub use storage::{load_snapshot, save_standings};
