use crate::model::LinkMetadata;
use crate::rendering::html::{encode_query, hostname};

/// Favicon lookup through Google's public favicon service.
pub fn favicon_service_url(host: &str) -> String {
    format!(
        "https://www.google.com/s2/favicons?domain={}&sz=64",
        encode_query(host)
    )
}

/// Metadata used when a URL could not be enriched: the hostname as title,
/// no description or image, and the favicon service icon.
pub fn fallback_metadata(url: &str) -> LinkMetadata {
    let host = hostname(url).unwrap_or_else(|| url.to_string());
    LinkMetadata {
        favicon: favicon_service_url(&host),
        title: host,
        description: String::new(),
        image: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_metadata() {
        assert_eq!(
            fallback_metadata("https://www.example.com/a/b?c=d"),
            LinkMetadata {
                title: "example.com".to_string(),
                description: String::new(),
                favicon: "https://www.google.com/s2/favicons?domain=example.com&sz=64".to_string(),
                image: None,
            }
        );
    }

    #[test]
    fn test_fallback_for_unparseable_url_keeps_text() {
        assert_eq!(fallback_metadata("not a url").title, "not a url");
    }
}
