use std::collections::HashSet;

use crate::api::AvailabilityClient;
use crate::domain::model::{CollectLocation, ShoppingCart};
use crate::utils::error::{Result, WatchError};

/// Drives the availability checks across the configured targets: delivery
/// zip codes first, then resolved collect locations, one request at a time.
/// Stops at the first success unless `try_all` is set.
pub struct Watcher {
    client: AvailabilityClient,
    cart: ShoppingCart,
    delivery_zip_codes: Vec<String>,
    collect_queries: Vec<String>,
    try_all: bool,
}

impl Watcher {
    pub fn new(
        client: AvailabilityClient,
        cart: ShoppingCart,
        delivery_zip_codes: Vec<String>,
        collect_queries: Vec<String>,
        try_all: bool,
    ) -> Self {
        Self {
            client,
            cart,
            delivery_zip_codes: dedup_preserving_order(delivery_zip_codes),
            collect_queries,
            try_all,
        }
    }

    /// Returns `Ok(true)` if any target accepted the cart. Location queries
    /// are resolved up front so a bad query fails before any check runs.
    pub async fn run(&self) -> Result<bool> {
        let selected_locations = if self.collect_queries.is_empty() {
            Vec::new()
        } else {
            tracing::info!("Searching for collect locations ...");
            let known = self.client.fetch_collect_locations().await?;
            resolve_locations(&known, &self.collect_queries)?
        };

        let mut available = false;

        for zip_code in &self.delivery_zip_codes {
            let check = self
                .client
                .check_express_delivery(&self.cart, zip_code, None)
                .await?;
            tracing::info!("Deliverable to {}? {}", zip_code, check.available);
            available = available || check.available;
            if available && !self.try_all {
                return Ok(true);
            }
        }

        for location in &selected_locations {
            let check = self
                .client
                .check_click_and_collect(&self.cart, location, None)
                .await?;
            tracing::info!("Collectable at {}? {}", location.name, check.available);
            available = available || check.available;
            if available && !self.try_all {
                return Ok(true);
            }
        }

        Ok(available)
    }
}

/// Resolves each partial location name against the fetched set with a
/// case-insensitive substring match. Exactly one match is required per
/// query; zero or several is a configuration error, not a failed check.
pub fn resolve_locations(
    known: &HashSet<CollectLocation>,
    queries: &[String],
) -> Result<Vec<CollectLocation>> {
    let mut selected: Vec<CollectLocation> = Vec::new();

    for query in queries {
        let needle = query.trim().to_uppercase();
        let matches: Vec<&CollectLocation> = known
            .iter()
            .filter(|location| location.name.to_uppercase().contains(&needle))
            .collect();

        match matches.as_slice() {
            [] => {
                let mut names: Vec<&str> =
                    known.iter().map(|location| location.name.as_str()).collect();
                names.sort_unstable();
                return Err(WatchError::LocationMatchError {
                    query: query.clone(),
                    reason: format!("not found, available locations are {:?}", names),
                });
            }
            [location] => {
                tracing::debug!("Location {:?} found for input {}", location, query);
                if !selected.contains(*location) {
                    selected.push((*location).clone());
                }
            }
            several => {
                let mut names: Vec<&str> =
                    several.iter().map(|location| location.name.as_str()).collect();
                names.sort_unstable();
                return Err(WatchError::LocationMatchError {
                    query: query.clone(),
                    reason: format!("multiple locations match: {:?}", names),
                });
            }
        }
    }

    Ok(selected)
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
