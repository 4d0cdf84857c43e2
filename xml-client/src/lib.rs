//! Private XML-over-HTTP client for Yamaha AV receiver communication
//!
//! This crate provides a minimal client for the receiver's control endpoint.
//! Every command is an XML fragment framed in a `<YAMAHA_AV>` document and
//! POSTed to `/YamahaRemoteControl/ctrl`. Queries use `cmd="GET"` and return
//! the response document, commands use `cmd="PUT"` and only report whether the
//! receiver accepted them.
//!
//! Besides the HTTP side it offers the tree helpers the protocol layer needs:
//! [`parse`] turns a response into an [`Element`] and [`lookup`] resolves a
//! slash-separated tag path inside it.

mod error;

pub use error::XmlError;
pub use xmltree::Element;

use std::time::Duration;
use tracing::debug;
use xmltree::XMLNode;

/// Path of the receiver's control endpoint
pub const CONTROL_PATH: &str = "/YamahaRemoteControl/ctrl";

/// Connection settings for an [`XmlClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and authority of the receiver, e.g. `http://192.168.1.20`
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for a receiver reachable at `host` (IP or hostname, optional port)
    pub fn for_host(host: &str) -> Self {
        Self {
            base_url: format!("http://{}", host),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1".to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// A minimal XML client bound to one receiver
#[derive(Debug, Clone)]
pub struct XmlClient {
    agent: ureq::Agent,
    url: String,
}

impl XmlClient {
    /// Create a client for the receiver at `host` with default timeouts
    pub fn new(host: &str) -> Self {
        Self::with_config(ClientConfig::for_host(host))
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .build(),
            url: format!("{}{}", config.base_url.trim_end_matches('/'), CONTROL_PATH),
        }
    }

    /// Full URL of the control endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a query and return the raw response document
    pub fn get(&self, body: &str) -> Result<String, XmlError> {
        self.post("GET", body)
    }

    /// Send a command, checking only the receiver's return code
    pub fn put(&self, body: &str) -> Result<(), XmlError> {
        let response = self.post("PUT", body)?;
        let xml = parse(&response)?;
        check_return_code(&xml)
    }

    fn post(&self, cmd: &str, body: &str) -> Result<String, XmlError> {
        let document = format!(
            r#"<?xml version="1.0" encoding="utf-8"?><YAMAHA_AV cmd="{cmd}">{body}</YAMAHA_AV>"#,
            cmd = cmd,
            body = body
        );
        debug!(cmd, body, "posting to {}", self.url);

        let response = self.agent
            .post(&self.url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .send_string(&document)
            .map_err(|e| XmlError::Network(e.to_string()))?;

        response.into_string()
            .map_err(|e| XmlError::Network(e.to_string()))
    }
}

/// Parse a response document
pub fn parse(xml: &str) -> Result<Element, XmlError> {
    Element::parse(xml.as_bytes()).map_err(|e| XmlError::Parse(e.to_string()))
}

/// Fail with [`XmlError::Rejected`] if the root carries a non-zero `RC` attribute
pub fn check_return_code(root: &Element) -> Result<(), XmlError> {
    match root.attributes.get("RC") {
        None => Ok(()),
        Some(rc) => {
            let code = rc
                .trim()
                .parse::<u16>()
                .map_err(|_| XmlError::Parse(format!("Invalid RC attribute '{}'", rc)))?;
            if code == 0 {
                Ok(())
            } else {
                Err(XmlError::Rejected(code))
            }
        }
    }
}

/// Resolve a `/`-separated tag path below `root`.
///
/// Each segment matches the first descendant (document order) of the node
/// found so far, so wrapper elements such as the input tag can be skipped.
/// A segment written as `Tag[n]` selects the n-th matching descendant
/// (1-based). An empty path resolves to `root` itself.
pub fn lookup<'a>(root: &'a Element, path: &str) -> Option<&'a Element> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| {
            let (name, nth) = split_position(segment)?;
            let mut remaining = nth;
            find_descendant(node, name, &mut remaining)
        })
}

/// Text content of an element, empty when it has none
pub fn text(element: &Element) -> String {
    element
        .get_text()
        .map(|t| t.into_owned())
        .unwrap_or_default()
}

fn split_position(segment: &str) -> Option<(&str, usize)> {
    match segment.strip_suffix(']') {
        None => Some((segment, 1)),
        Some(stripped) => {
            let (name, position) = stripped.split_once('[')?;
            match position.parse::<usize>() {
                Ok(n) if n > 0 => Some((name, n)),
                _ => None,
            }
        }
    }
}

fn find_descendant<'a>(
    node: &'a Element,
    name: &str,
    remaining: &mut usize,
) -> Option<&'a Element> {
    for child in node.children.iter().filter_map(|n| match n {
        XMLNode::Element(e) => Some(e),
        _ => None,
    }) {
        if child.name == name {
            *remaining -= 1;
            if *remaining == 0 {
                return Some(child);
            }
        }
        if let Some(found) = find_descendant(child, name, remaining) {
            return Some(found);
        }
    }
    None
}
