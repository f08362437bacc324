//! `Accept` header negotiation
//!
//! Picks which of the representations a handler can produce best fits the
//! client's declared preferences.

use std::cmp::Ordering;

/// One parsed entry of an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
struct MediaRange<'h> {
    kind: &'h str,
    subtype: &'h str,
    q: f32,
    position: usize,
}

impl<'h> MediaRange<'h> {
    /// Specificity when this range matches `offered`, `None` otherwise.
    fn specificity(&self, offered_kind: &str, offered_subtype: &str) -> Option<u8> {
        let kind_exact = self.kind.eq_ignore_ascii_case(offered_kind);
        let subtype_exact = self.subtype.eq_ignore_ascii_case(offered_subtype);

        if !kind_exact && self.kind != "*" {
            return None;
        }
        if !subtype_exact && self.subtype != "*" {
            return None;
        }

        Some(u8::from(kind_exact) * 2 + u8::from(subtype_exact))
    }
}

/// Ranking of one offered type against the header.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    offered: &'a str,
    q: f32,
    specificity: u8,
    position: usize,
    preference: usize,
}

fn parse_accept(header: &str) -> Vec<MediaRange<'_>> {
    header
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .filter_map(|(position, entry)| {
            let mut parts = entry.split(';').map(str::trim);
            let media = parts.next()?;
            let (kind, subtype) = match media.split_once('/') {
                Some((kind, subtype)) => (kind.trim(), subtype.trim()),
                None if media == "*" => ("*", "*"),
                None => return None,
            };
            if kind.is_empty() || subtype.is_empty() {
                return None;
            }

            let q = parts
                .filter_map(|param| param.split_once('='))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                .and_then(|(_, value)| value.trim().parse::<f32>().ok())
                .map(|q| q.clamp(0.0, 1.0))
                .unwrap_or(1.0);

            Some(MediaRange {
                kind,
                subtype,
                q,
                position,
            })
        })
        .collect()
}

/// Choose the best of `offered` (given in server preference order) for the
/// given `Accept` header value.
///
/// A missing, empty or unparsable header accepts anything, so the first
/// offered type wins. Returns `None` when nothing offered is acceptable.
///
/// # Examples
/// ```
/// use adboard_http::accept::negotiate;
/// let offered = ["text/html", "text/plain", "application/json"];
/// assert_eq!(negotiate(None, &offered), Some("text/html"));
/// assert_eq!(negotiate(Some("application/json"), &offered), Some("application/json"));
/// assert_eq!(negotiate(Some("image/png"), &offered), None);
/// ```
pub fn negotiate<'a>(accept: Option<&str>, offered: &[&'a str]) -> Option<&'a str> {
    let mut ranges = accept.map(parse_accept).unwrap_or_default();
    if ranges.is_empty() {
        ranges.push(MediaRange {
            kind: "*",
            subtype: "*",
            q: 1.0,
            position: 0,
        });
    }

    let mut candidates: Vec<Candidate<'a>> = offered
        .iter()
        .copied()
        .enumerate()
        .filter_map(|(preference, offered)| {
            let (kind, subtype) = offered.split_once('/')?;
            ranges
                .iter()
                .filter_map(|range| {
                    range
                        .specificity(kind, subtype)
                        .map(|specificity| (specificity, range))
                })
                // Most specific matching range decides the quality.
                .max_by(|(sa, ra), (sb, rb)| {
                    sa.cmp(sb)
                        .then(ra.q.partial_cmp(&rb.q).unwrap_or(Ordering::Equal))
                        .then(rb.position.cmp(&ra.position))
                })
                .map(|(specificity, range)| Candidate {
                    offered,
                    q: range.q,
                    specificity,
                    position: range.position,
                    preference,
                })
        })
        .filter(|candidate| candidate.q > 0.0)
        .collect();

    candidates.sort_by(|a, b| {
        b.q.partial_cmp(&a.q)
            .unwrap_or(Ordering::Equal)
            .then(b.specificity.cmp(&a.specificity))
            .then(a.position.cmp(&b.position))
            .then(a.preference.cmp(&b.preference))
    });

    candidates.first().map(|candidate| candidate.offered)
}
