//! Public form link in the three shapes the share panel offers.

use serde::{Deserialize, Serialize};

use crate::html::escape_html;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    /// Absolute URL, copied by "Copy Link".
    pub url: String,
    /// `url` without its `http://` or `https://` prefix.
    pub display_url: String,
    /// `<iframe>` snippet for embedding the form.
    pub embed_code: String,
}

impl ShareLinks {
    pub fn new(public_form_url: &str) -> Self {
        let url = public_form_url.trim().to_string();
        let display_url = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(&url)
            .to_string();
        let embed_code = format!(
            r#"<iframe src="{}" width="100%" height="600" frameborder="0"></iframe>"#,
            escape_html(&url)
        );
        Self {
            url,
            display_url,
            embed_code,
        }
    }
}
