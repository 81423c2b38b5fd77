use serde::Serialize;

/// Vendor-assigned article identifier, without dots (e.g. "40299687").
pub type ArticleCode = String;

pub type ArticleQuantity = u32;

/// One entry of the cart in the shape the vendor API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub article_no: ArticleCode,
    pub count: ArticleQuantity,
}

/// Articles to check, keyed by article code.
///
/// Backed by a `Vec` so that `to_wire_format` reproduces insertion order
/// exactly on every call. The signed request routine serializes the wire
/// format into the bytes the HMAC is computed over, so the projection has
/// to be deterministic.
#[derive(Debug, Clone, Default)]
pub struct ShoppingCart {
    entries: Vec<(ArticleCode, ArticleQuantity)>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an article, replacing the quantity if the code is already
    /// present. Quantities are not validated here; the CLI boundary is
    /// responsible for rejecting zero counts.
    pub fn insert(&mut self, code: ArticleCode, quantity: ArticleQuantity) {
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, q)) => *q = quantity,
            None => self.entries.push((code, quantity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArticleCode, ArticleQuantity)> {
        self.entries.iter().map(|(c, q)| (c, *q))
    }

    /// Projects the cart into the vendor's array-of-records shape, in
    /// insertion order.
    pub fn to_wire_format(&self) -> Vec<CartLine> {
        self.entries
            .iter()
            .map(|(code, quantity)| CartLine {
                article_no: code.clone(),
                count: *quantity,
            })
            .collect()
    }
}

impl FromIterator<(ArticleCode, ArticleQuantity)> for ShoppingCart {
    fn from_iter<I: IntoIterator<Item = (ArticleCode, ArticleQuantity)>>(iter: I) -> Self {
        let mut cart = Self::new();
        for (code, quantity) in iter {
            cart.insert(code, quantity);
        }
        cart
    }
}

/// A store or pick-up point at which click-and-collect orders can be
/// retrieved. Only produced by `fetch_collect_locations` (and by hand in
/// tests); two locations are equal iff both id and name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectLocation {
    pub id: String,
    pub name: String,
}

/// Outcome of a single delivery or collect check: whether the vendor
/// accepted the cart for the target, plus the raw decoded response for
/// diagnostics.
#[derive(Debug, Clone)]
pub struct DeliveryCheck {
    pub available: bool,
    pub details: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_maps_entries() {
        let cart: ShoppingCart = [("a".to_string(), 2), ("b".to_string(), 1)]
            .into_iter()
            .collect();

        let wire = cart.to_wire_format();
        assert_eq!(
            wire,
            vec![
                CartLine {
                    article_no: "a".to_string(),
                    count: 2
                },
                CartLine {
                    article_no: "b".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_wire_format_preserves_insertion_order() {
        let mut cart = ShoppingCart::new();
        cart.insert("90211056".to_string(), 1);
        cart.insert("40299687".to_string(), 3);
        cart.insert("10413528".to_string(), 2);

        let codes: Vec<String> = cart
            .to_wire_format()
            .into_iter()
            .map(|line| line.article_no)
            .collect();
        assert_eq!(codes, vec!["90211056", "40299687", "10413528"]);
    }

    #[test]
    fn test_insert_replaces_existing_code() {
        let mut cart = ShoppingCart::new();
        cart.insert("40299687".to_string(), 1);
        cart.insert("40299687".to_string(), 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.to_wire_format()[0].count, 5);
    }

    #[test]
    fn test_cart_line_serializes_to_vendor_field_names() {
        let line = CartLine {
            article_no: "40299687".to_string(),
            count: 2,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"articleNo":"40299687","count":2}"#);
    }

    #[test]
    fn test_empty_cart_is_accepted() {
        let cart = ShoppingCart::new();
        assert!(cart.is_empty());
        assert!(cart.to_wire_format().is_empty());
    }
}
