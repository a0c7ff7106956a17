//! IPv4 extraction from free-form text
//!
//! "What is my IP" services answer with anything from a bare address to a
//! full HTML page. [`extract_ip`] takes the first dotted quad whose octets are
//! each in 0-255 and ignores everything else.

use once_cell::sync::Lazy;
use regex::Regex;

static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}",
    )
    .expect("valid IPv4 regex")
});

/// Return the first IPv4-shaped substring of `text`, or an empty string
///
/// Matching is leftmost-first and purely syntactic: the address is not
/// checked for routability.
pub fn extract_ip(text: &str) -> String {
    IPV4_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
