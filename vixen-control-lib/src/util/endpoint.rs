//! The fixed catalog of Vixen web API endpoints.
//!
//! Every operation the library performs is described by an [`Endpoint`]. Its
//! [`EndpointDescriptor`] names the root path, the action suffix, the HTTP verb
//! and the parameter names the device expects, in the order callers supply them.

use crate::util::error::CallError;

/// Root path of the element controller.
pub const ELEMENT_ROOT: &str = "/api/element/";
/// Root path of the sequence player controller.
pub const PLAY_ROOT: &str = "/api/play/";

/// HTTP verb used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel as a form-encoded body.
    Post,
}

/// Static description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub root: &'static str,
    pub action: &'static str,
    pub method: Method,
    pub params: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetElements,
    SearchElements,
    ElementOn,
    GroupOn,
    ElementOff,
    ClearAll,
    GetSequences,
    PlaySequence,
    StopSequence,
    PauseSequence,
    SequenceStatus,
}

const NO_PARAMS: &[&str] = &[];
const SEARCH_PARAMS: &[&str] = &["q"];
const ELEMENT_ON_PARAMS: &[&str] = &["id", "duration", "intensity", "color"];
const ELEMENT_OFF_PARAMS: &[&str] = &["id"];
const SEQUENCE_PARAMS: &[&str] = &["Name", "FileName"];

impl Endpoint {
    pub const fn descriptor(self) -> EndpointDescriptor {
        let (root, action, method, params) = match self {
            Endpoint::GetElements => (ELEMENT_ROOT, "getElements", Method::Get, NO_PARAMS),
            Endpoint::SearchElements => (ELEMENT_ROOT, "searchElements", Method::Get, SEARCH_PARAMS),
            Endpoint::ElementOn => (ELEMENT_ROOT, "on", Method::Post, ELEMENT_ON_PARAMS),
            Endpoint::GroupOn => (ELEMENT_ROOT, "groupon", Method::Post, ELEMENT_ON_PARAMS),
            Endpoint::ElementOff => (ELEMENT_ROOT, "off", Method::Post, ELEMENT_OFF_PARAMS),
            Endpoint::ClearAll => (ELEMENT_ROOT, "clearall", Method::Post, NO_PARAMS),
            Endpoint::GetSequences => (PLAY_ROOT, "getSequences", Method::Get, NO_PARAMS),
            Endpoint::PlaySequence => (PLAY_ROOT, "playSequence", Method::Post, SEQUENCE_PARAMS),
            Endpoint::StopSequence => (PLAY_ROOT, "stopSequence", Method::Post, SEQUENCE_PARAMS),
            Endpoint::PauseSequence => (PLAY_ROOT, "pauseSequence", Method::Post, SEQUENCE_PARAMS),
            Endpoint::SequenceStatus => (PLAY_ROOT, "status", Method::Get, NO_PARAMS),
        };
        EndpointDescriptor {
            root,
            action,
            method,
            params,
        }
    }

    pub const fn method(self) -> Method {
        self.descriptor().method
    }

    /// Path relative to the device's base address, e.g. `/api/play/status`.
    pub fn path(self) -> String {
        let descriptor = self.descriptor();
        format!("{}{}", descriptor.root, descriptor.action)
    }

    /// Pairs the endpoint's parameter names with the supplied values.
    ///
    /// Values must be given in the order of [`EndpointDescriptor::params`], one per name.
    pub fn fields(self, values: Vec<String>) -> Result<Vec<(&'static str, String)>, CallError> {
        let names = self.descriptor().params;
        if names.len() != values.len() {
            return Err(CallError::InvalidParameters {
                endpoint: self,
                expected: names,
                given: values.len(),
            });
        }
        Ok(names.iter().copied().zip(values).collect())
    }
}
