use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_BASE_URL;
use crate::domain::model::{ArticleCode, ArticleQuantity, ShoppingCart};
use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ikeawatcher")]
#[command(about = "Check whether IKEA articles can be delivered or collected")]
pub struct CliConfig {
    #[arg(long, help = "Country code (ex: be)")]
    pub country: String,

    #[arg(long, default_value = "fr_BE", help = "Locale sent to the vendor API")]
    pub locale: String,

    #[arg(
        long = "delivery",
        value_name = "ZIP",
        help = "Zip code for delivery (repeatable)"
    )]
    pub delivery_zip_codes: Vec<String>,

    #[arg(
        long = "collect",
        value_name = "NAME",
        help = "Partial collect location name (repeatable)"
    )]
    pub collect_locations: Vec<String>,

    #[arg(long, help = "Do not stop on first match")]
    pub try_all: bool,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Vendor API base URL")]
    pub base_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        value_name = "code:quantity",
        required = true,
        value_parser = parse_article,
        help = "code:quantity of an article to purchase, e.g. 402.996.87:2"
    )]
    pub articles: Vec<(ArticleCode, ArticleQuantity)>,
}

impl CliConfig {
    pub fn shopping_cart(&self) -> ShoppingCart {
        self.articles.iter().cloned().collect()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("country", &self.country)?;
        validate_non_empty_string("locale", &self.locale)?;
        validate_url("base_url", &self.base_url)?;

        if self.delivery_zip_codes.is_empty() && self.collect_locations.is_empty() {
            return Err(WatchError::ConfigError {
                message: "at least 1 collect location or 1 delivery zip code is required"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a `code:quantity` argument. Dots in the article code (the format
/// printed on vendor labels, e.g. 402.996.87) are stripped before use.
fn parse_article(s: &str) -> std::result::Result<(ArticleCode, ArticleQuantity), String> {
    let (code, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid article code & quantity: {s} (expected code:quantity)"))?;

    let code = code.replace('.', "");
    if code.is_empty() {
        return Err(format!("invalid article code & quantity: {s} (empty code)"));
    }

    let quantity: ArticleQuantity = quantity
        .parse()
        .map_err(|e| format!("invalid article code & quantity: {s} ({e})"))?;
    if quantity == 0 {
        return Err(format!(
            "invalid article code & quantity: {s} (quantity must be at least 1)"
        ));
    }

    Ok((code, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(delivery: Vec<&str>, collect: Vec<&str>) -> CliConfig {
        CliConfig {
            country: "be".to_string(),
            locale: "fr_BE".to_string(),
            delivery_zip_codes: delivery.into_iter().map(String::from).collect(),
            collect_locations: collect.into_iter().map(String::from).collect(),
            try_all: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
            articles: vec![("40299687".to_string(), 1)],
        }
    }

    #[test]
    fn test_parse_article_strips_dots() {
        assert_eq!(
            parse_article("402.996.87:2").unwrap(),
            ("40299687".to_string(), 2)
        );
    }

    #[test]
    fn test_parse_article_without_dots() {
        assert_eq!(
            parse_article("90211056:1").unwrap(),
            ("90211056".to_string(), 1)
        );
    }

    #[test]
    fn test_parse_article_rejects_malformed_input() {
        assert!(parse_article("40299687").is_err());
        assert!(parse_article("40299687:two").is_err());
        assert!(parse_article(":2").is_err());
        assert!(parse_article("40299687:0").is_err());
    }

    #[test]
    fn test_validate_requires_a_target() {
        let config = config_with(vec![], vec![]);
        assert!(matches!(
            config.validate(),
            Err(WatchError::ConfigError { .. })
        ));

        assert!(config_with(vec!["9000"], vec![]).validate().is_ok());
        assert!(config_with(vec![], vec!["Gent"]).validate().is_ok());
    }

    #[test]
    fn test_shopping_cart_from_articles() {
        let mut config = config_with(vec!["9000"], vec![]);
        config.articles = vec![("40299687".to_string(), 2), ("90211056".to_string(), 1)];

        let cart = config.shopping_cart();
        assert_eq!(cart.len(), 2);
        let codes: Vec<_> = cart.iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(codes, vec!["40299687", "90211056"]);
    }

    #[test]
    fn test_cli_parses_full_command_line() {
        let config = CliConfig::parse_from([
            "ikeawatcher",
            "--country",
            "be",
            "--delivery",
            "9000",
            "--collect",
            "Gent",
            "--try-all",
            "402.996.87:2",
            "902.110.56:1",
        ]);

        assert_eq!(config.country, "be");
        assert_eq!(config.delivery_zip_codes, vec!["9000"]);
        assert_eq!(config.collect_locations, vec!["Gent"]);
        assert!(config.try_all);
        assert_eq!(
            config.articles,
            vec![("40299687".to_string(), 2), ("90211056".to_string(), 1)]
        );
    }
}
