// Domain layer: value types shared by the client and the watcher.

pub mod model;
