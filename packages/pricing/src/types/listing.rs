//! Raw listing records as returned by the listing source.

use serde::{Deserialize, Serialize};

/// An unstructured sold listing fetched from the marketplace index.
///
/// Every field is optional: upstream records are frequently incomplete,
/// and the pipeline must not assume completeness. Absent fields are
/// rendered as an explicit `"N/A"` when the listing is serialized for
/// the model (see [`crate::prompts`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// Listing title as shown on the marketplace.
    pub title: Option<String>,

    /// Sale price as a display string (e.g. `"C $124.99"`).
    pub price: Option<String>,

    /// Shipping cost as a display string (e.g. `"+C $15.00 shipping"`).
    pub shipping: Option<String>,

    /// Seller location.
    pub location: Option<String>,

    /// Sale date as reported by the marketplace.
    pub sold_date: Option<String>,

    /// Link to the listing.
    pub link: Option<String>,

    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
}

impl RawListing {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the price display string.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set the shipping display string.
    pub fn with_shipping(mut self, shipping: impl Into<String>) -> Self {
        self.shipping = Some(shipping.into());
        self
    }

    /// Set the seller location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the sale date.
    pub fn with_sold_date(mut self, date: impl Into<String>) -> Self {
        self.sold_date = Some(date.into());
        self
    }

    /// Set the listing link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}
