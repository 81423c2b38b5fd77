pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use api::client::AvailabilityClient;
pub use config::CliConfig;
pub use core::watcher::Watcher;
pub use domain::model::{ArticleCode, ArticleQuantity, CollectLocation, DeliveryCheck, ShoppingCart};
pub use utils::error::{Result, WatchError};
