use std::collections::{HashMap, HashSet};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::signing;
use crate::domain::model::{CartLine, CollectLocation, DeliveryCheck, ShoppingCart};
use crate::utils::error::{Result, WatchError};

pub const DEFAULT_BASE_URL: &str = "https://ww8.ikea.com";

// Static application credential shared with the vendor's web checkout.
// Overridable at construction so a rotation does not require a rebuild.
const DEFAULT_SIGNING_KEY: &str = "G6XxMY7n";

const CUSTOMER_VIEW: &str = "desktop";
const ORDER_SYSTEM: &str = "IRW";

// The vendor's web checkout sends a session id here, but this literal is
// accepted too. Unclear whether the backend validates the field at all;
// changing it is a compatibility risk.
const COLLECT_SL_ID: &str = "1241241241";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpressPayload<'a> {
    selected_service: &'static str,
    selected_service_value: &'a str,
    articles: Vec<CartLine>,
    locale: &'a str,
    customer_view: &'static str,
    system: &'static str,
    promotion_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectPayload<'a> {
    selected_service: &'static str,
    selected_service_value: &'a str,
    articles: Vec<CartLine>,
    locale: &'a str,
    customer_view: &'static str,
    sl_id: &'static str,
    promotion_code: &'a str,
}

#[derive(Debug, Serialize)]
struct SignedEnvelope<'a> {
    payload: &'a str,
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    name: String,
    // The vendor also sends isClosed / closingTimes; not consumed here.
}

/// Client for the vendor's click-and-collect availability API.
///
/// Holds the immutable country/locale configuration; every operation issues
/// exactly one HTTP exchange and propagates failures without retrying.
pub struct AvailabilityClient {
    client: Client,
    base_url: String,
    country: String,
    locale: String,
    signing_key: String,
}

impl AvailabilityClient {
    pub fn new(country: &str, locale: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            country: country.trim().to_lowercase(),
            locale: locale.to_string(),
            signing_key: DEFAULT_SIGNING_KEY.to_string(),
        }
    }

    /// Points the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_signing_key(mut self, key: impl Into<String>) -> Self {
        self.signing_key = key.into();
        self
    }

    /// Fetches the set of known collect locations for the configured
    /// country. Unauthenticated; duplicates by id+name collapse.
    pub async fn fetch_collect_locations(&self) -> Result<HashSet<CollectLocation>> {
        let url = format!(
            "{}/clickandcollect/{}/receive/listfetchlocations?version=2",
            self.base_url, self.country
        );
        tracing::debug!("Fetching collect locations from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let locations_by_id: HashMap<String, LocationRecord> = serde_json::from_str(&body)
            .map_err(|source| WatchError::DecodeError {
                url: url.clone(),
                source,
            })?;

        let locations: HashSet<CollectLocation> = locations_by_id
            .into_iter()
            .map(|(id, record)| CollectLocation {
                id,
                name: record.name,
            })
            .collect();
        tracing::debug!("Collect locations: {:?}", locations);
        Ok(locations)
    }

    /// Checks whether the cart can be express-delivered to `zip_code`.
    pub async fn check_express_delivery(
        &self,
        cart: &ShoppingCart,
        zip_code: &str,
        promotion_code: Option<&str>,
    ) -> Result<DeliveryCheck> {
        let url = format!(
            "{}/clickandcollect/{}/receive/receiveexpress/",
            self.base_url, self.country
        );
        let payload = ExpressPayload {
            selected_service: "express",
            selected_service_value: zip_code,
            articles: cart.to_wire_format(),
            locale: &self.locale,
            customer_view: CUSTOMER_VIEW,
            system: ORDER_SYSTEM,
            promotion_code: promotion_code.unwrap_or(""),
        };
        self.send_signed(&url, &payload).await
    }

    /// Checks whether the cart can be collected at `location`.
    pub async fn check_click_and_collect(
        &self,
        cart: &ShoppingCart,
        location: &CollectLocation,
        promotion_code: Option<&str>,
    ) -> Result<DeliveryCheck> {
        let url = format!("{}/clickandcollect/{}/receive/", self.base_url, self.country);
        let payload = CollectPayload {
            selected_service: "fetchlocation",
            selected_service_value: &location.id,
            articles: cart.to_wire_format(),
            locale: &self.locale,
            customer_view: CUSTOMER_VIEW,
            sl_id: COLLECT_SL_ID,
            promotion_code: promotion_code.unwrap_or(""),
        };
        self.send_signed(&url, &payload).await
    }

    /// Shared signed-request routine: canonical payload bytes, HMAC over
    /// those exact bytes, POST of the `{payload, hmac}` envelope, then
    /// success determination on the decoded body.
    async fn send_signed<P: Serialize>(&self, url: &str, payload: &P) -> Result<DeliveryCheck> {
        let payload_json = signing::canonical_json(payload)?;
        let envelope = SignedEnvelope {
            hmac: signing::sign(&self.signing_key, &payload_json),
            payload: &payload_json,
        };
        tracing::debug!("Delivery request to {}: {:?}", url, envelope);

        let response = self
            .client
            .post(url)
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let details: Value =
            serde_json::from_str(&body).map_err(|source| WatchError::DecodeError {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!("Delivery response from {}: {}", url, details);

        Ok(DeliveryCheck {
            available: is_status_ok(&details),
            details,
        })
    }
}

/// The one place the vendor's success rule lives: a top-level `status`
/// field that equals "OK" ignoring ASCII case. No trimming, so "ok"
/// matches but " OK " does not. Anything else, including a missing or
/// non-string `status`, is failure (not an error).
pub fn is_status_ok(details: &Value) -> bool {
    details
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| status.eq_ignore_ascii_case("OK"))
}
