//! HTTP GET uplink to the collector.
//!
//! Implements [`UplinkPort`]: joins the collector base URL with the
//! rendered query, issues one GET and reports the status code.  2xx and
//! 3xx count as delivered; anything else is `UplinkError::Status`.
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::http::client` with the
//!   certificate bundle attached, so `https://` collectors work too.
//! - **all other targets**: records the URL and answers with a scripted
//!   status.
//!
//! A connection is opened per request and dropped with the response.

use log::info;

use crate::app::ports::{UplinkError, UplinkPort, UplinkResponse};
use crate::uplink::request_url;

#[cfg(target_os = "espidf")]
use core::time::Duration;
#[cfg(target_os = "espidf")]
use embedded_svc::http::client::Client;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration, EspHttpConnection, FollowRedirectsPolicy};

#[cfg(not(target_os = "espidf"))]
use crate::uplink::RequestUrl;

/// Bytes of response body kept for the log.
const BODY_PREVIEW: usize = 128;

fn is_success(status: u16) -> bool {
    (200..400).contains(&status)
}

fn preview(bytes: &[u8]) -> heapless::String<BODY_PREVIEW> {
    let mut out = heapless::String::new();
    for c in String::from_utf8_lossy(bytes).chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

pub struct HttpUplink {
    base_url: heapless::String<192>,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    timeout_ms: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_status: Option<u16>,
    #[cfg(not(target_os = "espidf"))]
    sim_last_url: Option<RequestUrl>,
}

impl HttpUplink {
    pub fn new(base_url: &heapless::String<192>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.clone(),
            timeout_ms,
            #[cfg(not(target_os = "espidf"))]
            sim_status: Some(200),
            #[cfg(not(target_os = "espidf"))]
            sim_last_url: None,
        }
    }

    /// Simulation: status for subsequent requests; `None` fails the
    /// transport before any status arrives.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_respond_with(&mut self, status: Option<u16>) {
        self.sim_status = status;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_last_url(&self) -> Option<&str> {
        self.sim_last_url.as_deref()
    }

    #[cfg(target_os = "espidf")]
    fn get(&mut self, url: &str) -> Result<UplinkResponse, UplinkError> {
        let conn = EspHttpConnection::new(&Configuration {
            timeout: Some(Duration::from_millis(u64::from(self.timeout_ms))),
            follow_redirects_policy: FollowRedirectsPolicy::FollowGetHead,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|e| {
            log::warn!("HTTP: connection setup: {:?}", e);
            UplinkError::Transport
        })?;
        let mut client = Client::wrap(conn);

        let request = client.get(url).map_err(|e| {
            log::warn!("HTTP: request: {:?}", e);
            UplinkError::Transport
        })?;
        let mut response = request.submit().map_err(|e| {
            log::warn!("HTTP: submit: {:?}", e);
            UplinkError::Transport
        })?;

        let status = response.status();
        let mut buf = [0u8; BODY_PREVIEW];
        // A truncated or unreadable body does not change the outcome.
        let len = embedded_svc::utils::io::try_read_full(&mut response, &mut buf)
            .unwrap_or_else(|(_, n)| n);

        Ok(UplinkResponse {
            status,
            body: preview(&buf[..len]),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn get(&mut self, url: &str) -> Result<UplinkResponse, UplinkError> {
        self.sim_last_url = RequestUrl::try_from(url).ok();
        info!("HTTP(sim): GET {}", url);
        let status = self.sim_status.ok_or(UplinkError::Transport)?;
        Ok(UplinkResponse {
            status,
            body: preview(b"ok"),
        })
    }
}

impl UplinkPort for HttpUplink {
    fn send(&mut self, query: &str) -> Result<UplinkResponse, UplinkError> {
        let url = request_url(&self.base_url, query)?;
        let response = self.get(&url)?;
        info!("HTTP: {} '{}'", response.status, response.body);
        if is_success(response.status) {
            Ok(response)
        } else {
            Err(UplinkError::Status(response.status))
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    fn uplink() -> HttpUplink {
        let base = heapless::String::try_from("https://collector.test/exec").unwrap();
        HttpUplink::new(&base, 5_000)
    }

    #[test]
    fn sends_query_on_base_url() {
        let mut up = uplink();
        let resp = up.send("FSR0=12&FSR1=0").unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(
            up.sim_last_url(),
            Some("https://collector.test/exec?FSR0=12&FSR1=0")
        );
    }

    #[test]
    fn redirect_counts_as_delivered() {
        let mut up = uplink();
        up.sim_respond_with(Some(302));
        assert_eq!(up.send("FSR0=1").map(|r| r.status), Ok(302));
    }

    #[test]
    fn server_error_is_reported() {
        let mut up = uplink();
        up.sim_respond_with(Some(500));
        assert_eq!(up.send("FSR0=1"), Err(UplinkError::Status(500)));
    }

    #[test]
    fn transport_failure_is_reported() {
        let mut up = uplink();
        up.sim_respond_with(None);
        assert_eq!(up.send("FSR0=1"), Err(UplinkError::Transport));
    }

    #[test]
    fn body_preview_is_bounded() {
        let long = [b'x'; 300];
        assert_eq!(preview(&long).len(), BODY_PREVIEW);
        assert_eq!(preview(&[0xff, b'a']).as_str(), "\u{fffd}a");
    }
}
