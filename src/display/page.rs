use crate::display::DisplayRegion;
use chrono::{DateTime, SecondsFormat, Utc};
use crate::display::node::Escape;

/// Wrap the display region in a standalone HTML document
///
/// The region is placed inside `<div id="alerts-display">`. The generation
/// time is stamped below it in RFC 3339, UTC.
pub fn html_document(title: &str, region: &DisplayRegion, generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <div id=\"alerts-display\">{content}</div>\n\
         <footer>Generated {timestamp}</footer>\n\
         </body>\n\
         </html>\n",
        title = Escape(title),
        content = region.to_html(),
        timestamp = timestamp,
    )
}
