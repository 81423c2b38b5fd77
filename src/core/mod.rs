pub mod watcher;

pub use watcher::Watcher;
