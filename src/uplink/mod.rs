//! Wire formatting for the collector.
//!
//! Transport lives in `adapters::http`; this module only turns a
//! [`ChairReading`](crate::app::reading::ChairReading) into request text.

pub mod query;

use core::fmt::Write;

use crate::app::ports::UplinkError;

/// Collector base URL plus query.
pub const URL_CAPACITY: usize = 1024;

pub type RequestUrl = heapless::String<URL_CAPACITY>;

/// `<base>?<query>`.
pub fn request_url(base: &str, query: &str) -> Result<RequestUrl, UplinkError> {
    let mut url = RequestUrl::new();
    write!(url, "{}?{}", base, query).map_err(|_| UplinkError::RequestTooLarge)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_query() {
        let url = request_url("https://x.test/exec", "FSR0=1").unwrap();
        assert_eq!(url.as_str(), "https://x.test/exec?FSR0=1");
    }

    #[test]
    fn oversized_url_is_rejected() {
        let long = "a".repeat(URL_CAPACITY);
        assert_eq!(
            request_url("https://x.test/exec", &long),
            Err(UplinkError::RequestTooLarge)
        );
    }
}
