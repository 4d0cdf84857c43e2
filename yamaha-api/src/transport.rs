//! The seam between the controllers and the receiver connection

use std::sync::{Arc, Weak};

use xml_client::{Element, XmlClient};

use crate::{ApiError, Result};

/// A connection able to exchange XML command bodies with one receiver
///
/// `send` is used for queries whose response is parsed, `send_only` for
/// commands where only success matters. Implementations must be usable from
/// several controllers, which is why the trait requires `Send + Sync`; the
/// receiver itself still handles one request at a time, so callers serialize
/// access per device.
pub trait Transport: Send + Sync {
    /// Send a query and return the response document
    fn send(&self, body: &str) -> Result<String>;

    /// Send a command without interpreting a reply
    fn send_only(&self, body: &str) -> Result<()>;

    /// Parse a response document into a tree
    fn parse(&self, response: &str) -> Result<Element> {
        Ok(xml_client::parse(response)?)
    }

    /// Resolve a `/`-separated tag path inside a parsed response
    fn lookup<'a>(&self, tree: &'a Element, path: &str) -> Option<&'a Element> {
        xml_client::lookup(tree, path)
    }
}

impl Transport for XmlClient {
    fn send(&self, body: &str) -> Result<String> {
        Ok(self.get(body)?)
    }

    fn send_only(&self, body: &str) -> Result<()> {
        Ok(self.put(body)?)
    }
}

/// Non-owning reference to a transport
///
/// Controllers never keep the connection alive on their own. Every operation
/// resolves the handle first and fails with [`ApiError::ConnectionLost`] once
/// the owner has dropped the transport.
#[derive(Clone)]
pub(crate) struct TransportHandle {
    transport: Weak<dyn Transport>,
}

impl TransportHandle {
    pub(crate) fn new(transport: &Arc<dyn Transport>) -> Self {
        Self {
            transport: Arc::downgrade(transport),
        }
    }

    pub(crate) fn get(&self) -> Result<Arc<dyn Transport>> {
        self.transport.upgrade().ok_or(ApiError::ConnectionLost)
    }
}

impl std::fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportHandle")
            .field("alive", &(self.transport.strong_count() > 0))
            .finish()
    }
}
