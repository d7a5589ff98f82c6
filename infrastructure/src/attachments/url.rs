use super::{AttachmentError, AttachmentLimits};
use scraper::{ElementRef, Html, Node, Selector};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;
use url::{Host, Url};

const USER_AGENT: &str = "AIcouncil/1.0";

/// Host prefixes refused for IPv4 literals
const BLOCKED_IP_PREFIXES: [&str; 5] = ["127.", "169.254.", "10.", "172.", "192.168."];

/// Host names refused outright
const BLOCKED_HOSTS: [&str; 2] = ["localhost", "metadata.google.internal"];

/// Check that `raw` is an http(s) URL that does not point at the local
/// machine, a private network or a cloud metadata endpoint.
pub fn validate_url(raw: &str) -> Result<Url, AttachmentError> {
    let url = Url::parse(raw).map_err(|_| AttachmentError::InvalidUrl(raw.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AttachmentError::UnsupportedScheme(raw.to_string()));
    }

    let blocked = match url.host() {
        None => return Err(AttachmentError::InvalidUrl(raw.to_string())),
        Some(Host::Domain(domain)) => is_blocked_domain(domain),
        Some(Host::Ipv4(ip)) => is_blocked_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_blocked_ipv6(ip),
    };

    if blocked {
        return Err(AttachmentError::BlockedAddress(raw.to_string()));
    }
    Ok(url)
}

fn is_blocked_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    BLOCKED_HOSTS.contains(&domain.as_str()) || domain.ends_with(".localhost")
}

fn is_blocked_ipv4(ip: Ipv4Addr) -> bool {
    let text = ip.to_string();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || BLOCKED_IP_PREFIXES.iter().any(|p| text.starts_with(p))
}

fn is_blocked_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_blocked_ipv4(v4);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}

/// Fetch a URL and return its readable text.
///
/// HTML bodies are reduced to text; anything longer than
/// `limits.max_url_chars` is cut with a truncation marker.
pub async fn fetch_url_content(
    client: &reqwest::Client,
    raw: &str,
    limits: &AttachmentLimits,
) -> Result<String, AttachmentError> {
    let url = validate_url(raw)?;
    debug!("Fetching attachment URL {}", url);

    let fetch_error = |e: reqwest::Error| AttachmentError::Fetch {
        url: raw.to_string(),
        reason: e.to_string(),
    };

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(limits.url_timeout)
        .send()
        .await
        .map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AttachmentError::Http {
            url: raw.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    let body = response.text().await.map_err(fetch_error)?;
    let text = if content_type.contains("html") {
        html_to_text(&body)
    } else {
        body
    };

    Ok(truncate_chars(text, limits.max_url_chars))
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!(
            "{}\n\n[... content truncated at {} chars ...]",
            &text[..cut],
            max_chars
        ),
        None => text,
    }
}

/// Extract readable text from HTML, dropping scripts and styles
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    collect_text(root, &mut parts);
    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    const SKIP: [&str; 4] = ["script", "style", "noscript", "svg"];
    if SKIP.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t);
                }
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, parts);
                }
            }
            _ => {}
        }
    }
}
