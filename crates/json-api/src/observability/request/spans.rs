//! Route names for request spans.

use uuid::Uuid;

/// Collapse identifiers so that `/orders/<uuid>` logs as `/orders/{uuid}`.
pub(super) fn route_name(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
