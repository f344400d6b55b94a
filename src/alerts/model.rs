//! Response model for the active alerts endpoint
//!
//! Only the fields needed to render alerts are required. The response is a
//! GeoJSON feature collection; geometry and most properties are ignored.

use serde::{Deserialize, Serialize};

/// Label used when an alert carries no headline
pub const FALLBACK_HEADLINE: &str = "Weather Alert";

/// Decoded body of an active alerts response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertFeatureCollection {
    /// Alerts in the order returned by the API; `null` and missing both decode as `None`
    #[serde(default)]
    pub features: Option<Vec<AlertFeature>>,
}

/// A single alert record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

/// Alert attributes carried under `properties`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertProperties {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Event name such as "Flood Warning", used for logging
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, rename = "areaDesc")]
    pub area_desc: Option<String>,
}

impl AlertFeatureCollection {
    /// Alerts in API order, empty when the response had none
    pub fn features(&self) -> &[AlertFeature] {
        self.features.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.features().is_empty()
    }

    pub fn len(&self) -> usize {
        self.features().len()
    }
}

impl AlertFeature {
    /// Create a feature with just a headline and description
    pub fn new(headline: Option<String>, description: Option<String>) -> Self {
        Self {
            properties: AlertProperties {
                headline,
                description,
                ..Default::default()
            },
        }
    }

    /// The headline, or the fallback label when it is missing or empty
    pub fn headline(&self) -> &str {
        match self.properties.headline.as_deref() {
            Some(headline) if !headline.is_empty() => headline,
            _ => FALLBACK_HEADLINE,
        }
    }

    /// The description text, empty when missing
    pub fn description(&self) -> &str {
        self.properties.description.as_deref().unwrap_or("")
    }
}
