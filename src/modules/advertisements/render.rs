//! Representations of a single advertisement.

use adboard_http::accept;

use super::models::Advertisement;

const TEXT_HTML: &str = "text/html";
const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

/// Output formats offered for one advertisement, in server preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Html,
    Text,
    Json,
}

impl Representation {
    pub const OFFERED: [&'static str; 3] = [TEXT_HTML, TEXT_PLAIN, APPLICATION_JSON];

    /// Pick a representation for the request's `Accept` header.
    pub fn negotiate(accept_header: Option<&str>) -> Option<Self> {
        match accept::negotiate(accept_header, &Self::OFFERED)? {
            TEXT_HTML => Some(Representation::Html),
            TEXT_PLAIN => Some(Representation::Text),
            _ => Some(Representation::Json),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Representation::Html => "text/html; charset=utf-8",
            Representation::Text => "text/plain; charset=utf-8",
            Representation::Json => APPLICATION_JSON,
        }
    }
}

/// Render `advertisement` in the requested representation.
pub fn render(
    advertisement: &Advertisement,
    representation: Representation,
) -> Result<String, serde_json::Error> {
    match representation {
        Representation::Html => Ok(render_html(advertisement)),
        Representation::Text => Ok(render_text(advertisement)),
        Representation::Json => serde_json::to_string(advertisement),
    }
}

fn labelled_fields(advertisement: &Advertisement) -> [(&'static str, String); 7] {
    [
        ("ID", advertisement.id.to_string()),
        ("Title", advertisement.title.clone()),
        ("Description", advertisement.description.clone()),
        ("Author", advertisement.author.clone()),
        ("Category", advertisement.category.clone()),
        ("Tags", advertisement.tags.join(",")),
        ("Price", advertisement.price.to_string()),
    ]
}

fn render_html(advertisement: &Advertisement) -> String {
    let mut html = String::from("<div>\n");
    for (label, value) in labelled_fields(advertisement) {
        html.push_str(&format!("  <p>{}: {}</p>\n", label, escape_html(&value)));
    }
    html.push_str("</div>");
    html
}

fn render_text(advertisement: &Advertisement) -> String {
    labelled_fields(advertisement)
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
