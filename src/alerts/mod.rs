/// Alert response model and alert sources
pub mod model;
pub mod source;

pub use model::{AlertFeature, AlertFeatureCollection, AlertProperties, FALLBACK_HEADLINE};
pub use source::{AlertSource, MockAlertSource, NwsAlertSource, NWS_ACTIVE_ALERTS_URL};
