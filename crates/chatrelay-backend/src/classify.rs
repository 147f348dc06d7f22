//! Transport error classification.
//!
//! reqwest wraps hyper and IO errors several layers deep; the useful signal
//! (refused connection, failed lookup) only shows up somewhere in the
//! source chain.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use chatrelay_core::{UnreachableReason, UpstreamError};

/// Classify a reqwest failure that happened before a usable body arrived.
pub(crate) fn classify_transport(err: &reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() || chain_has_io_kind(err, io::ErrorKind::TimedOut) {
        return UpstreamError::Timeout(timeout);
    }

    let reason = if chain_has_io_kind(err, io::ErrorKind::ConnectionRefused) {
        UnreachableReason::ConnectionRefused
    } else if chain_mentions_lookup_failure(err) {
        UnreachableReason::NameResolution
    } else {
        UnreachableReason::Other
    };

    UpstreamError::Unreachable {
        reason,
        detail: describe_chain(err),
    }
}

fn sources(err: &reqwest::Error) -> impl Iterator<Item = &(dyn StdError + 'static)> {
    std::iter::successors(err.source(), |&e| e.source())
}

fn chain_has_io_kind(err: &reqwest::Error, kind: io::ErrorKind) -> bool {
    sources(err)
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == kind)
}

fn chain_mentions_lookup_failure(err: &reqwest::Error) -> bool {
    sources(err).any(|e| is_lookup_message(&e.to_string()))
}

pub(crate) fn is_lookup_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("dns error")
        || lower.contains("failed to lookup address")
        || lower.contains("name or service not known")
        || lower.contains("no such host")
}

/// Render the error and all of its sources as one line.
fn describe_chain(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    for source in sources(err) {
        let text = source.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_messages() {
        assert!(is_lookup_message("dns error"));
        assert!(is_lookup_message(
            "failed to lookup address information: Name or service not known"
        ));
        assert!(is_lookup_message("No such host is known. (os error 11001)"));
        assert!(!is_lookup_message("tcp connect error"));
        assert!(!is_lookup_message("Connection refused (os error 111)"));
    }
}
