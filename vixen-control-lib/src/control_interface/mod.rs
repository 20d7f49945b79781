use log::{debug, error, info};

use crate::led::color::Color;
use crate::session::{Body, Session, SessionConfig};
use crate::util::acknowledgment::Acknowledgment;
use crate::util::endpoint::{Endpoint, Method};
use crate::util::error::CallError;

/**
High-level interface to one Vixen web server.

Holds the transport [`Session`] and the last successful result of every
discovery and status call. Each operation comes in two flavors:

- `fetch_elements`, `play_sequence`, ...: failures are logged and never
  returned. Fetches replace the matching cached field only on success.
- `try_fetch_elements`, `try_play_sequence`, ...: the same calls, returning
  the [`CallError`] so callers can react to it.

Fetches take `&mut self`, so a cached field is never written by two calls at
once. Call [`ControlInterface::close`] when done to release the HTTP client.
 */
#[derive(Debug)]
pub struct ControlInterface {
    session: Session,
    elements: Option<Body>,
    search_results: Option<Body>,
    sequences: Option<Body>,
    status: Option<Body>,
}

impl ControlInterface {
    pub fn new(config: &SessionConfig) -> Result<Self, CallError> {
        Ok(ControlInterface {
            session: Session::new(config)?,
            elements: None,
            search_results: None,
            sequences: None,
            status: None,
        })
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// Last element list returned by the device.
    pub fn elements(&self) -> Option<&Body> {
        self.elements.as_ref()
    }

    /// Result of the last successful element search.
    pub fn search_results(&self) -> Option<&Body> {
        self.search_results.as_ref()
    }

    /// Last sequence list returned by the device.
    pub fn sequences(&self) -> Option<&Body> {
        self.sequences.as_ref()
    }

    /// Last status of the active sequences.
    pub fn status(&self) -> Option<&Body> {
        self.status.as_ref()
    }

    /// Releases the underlying HTTP client.
    pub fn close(self) {
        self.session.close();
    }

    /// Fetches the element list, then the sequence list.
    ///
    /// The sequence list is fetched even if the element list failed.
    pub async fn update_lists(&mut self) {
        self.fetch_elements().await;
        self.fetch_sequences().await;
    }

    pub async fn try_fetch_elements(&mut self) -> Result<&Body, CallError> {
        let body = self.call(Endpoint::GetElements, Vec::new()).await?;
        debug!("Elements: {}", body);
        Ok(&*self.elements.insert(body))
    }

    pub async fn fetch_elements(&mut self) {
        if let Err(err) = self.try_fetch_elements().await {
            error!("Unable to fetch vixen element list: {}", err);
        }
    }

    pub async fn try_search_elements(&mut self, query: &str) -> Result<&Body, CallError> {
        let body = self
            .call(Endpoint::SearchElements, vec![query.to_string()])
            .await?;
        debug!("Search results: {}", body);
        Ok(&*self.search_results.insert(body))
    }

    pub async fn search_elements(&mut self, query: &str) {
        if let Err(err) = self.try_search_elements(query).await {
            error!("Unable to search vixen element list: {}", err);
        }
    }

    pub async fn try_fetch_sequences(&mut self) -> Result<&Body, CallError> {
        let body = self.call(Endpoint::GetSequences, Vec::new()).await?;
        debug!("Sequences: {}", body);
        Ok(&*self.sequences.insert(body))
    }

    pub async fn fetch_sequences(&mut self) {
        if let Err(err) = self.try_fetch_sequences().await {
            error!("Unable to fetch vixen sequence list: {}", err);
        }
    }

    pub async fn try_sequence_status(&mut self) -> Result<&Body, CallError> {
        let body = self.call(Endpoint::SequenceStatus, Vec::new()).await?;
        debug!("Status: {}", body);
        Ok(&*self.status.insert(body))
    }

    /// Fetches the status of the active sequences.
    pub async fn sequence_status(&mut self) {
        if let Err(err) = self.try_sequence_status().await {
            error!("Unable to fetch vixen sequence status: {}", err);
        }
    }

    /// Turns on an element.
    ///
    /// # Arguments
    /// - `id`: The element's id, as reported by the element list.
    /// - `duration`: Seconds the element stays on.
    /// - `intensity`: Percentage, 0..=100.
    /// - `color`: The color to show.
    pub async fn try_turn_on_element(
        &self,
        id: &str,
        duration: u32,
        intensity: u8,
        color: Color,
    ) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::ElementOn, on_values(id, duration, intensity, color))
            .await
    }

    pub async fn turn_on_element(&self, id: &str, duration: u32, intensity: u8, color: Color) {
        if let Err(err) = self
            .try_turn_on_element(id, duration, intensity, color)
            .await
        {
            error!("Unable to turn on element id ({}): {}", id, err);
        }
    }

    /// Turns on a group element and all of its children.
    pub async fn try_turn_on_group(
        &self,
        id: &str,
        duration: u32,
        intensity: u8,
        color: Color,
    ) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::GroupOn, on_values(id, duration, intensity, color))
            .await
    }

    pub async fn turn_on_group(&self, id: &str, duration: u32, intensity: u8, color: Color) {
        if let Err(err) = self.try_turn_on_group(id, duration, intensity, color).await {
            error!("Unable to turn on group id ({}): {}", id, err);
        }
    }

    pub async fn try_turn_off_element(&self, id: &str) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::ElementOff, vec![id.to_string()])
            .await
    }

    pub async fn turn_off_element(&self, id: &str) {
        if let Err(err) = self.try_turn_off_element(id).await {
            error!("Unable to turn off element id ({}): {}", id, err);
        }
    }

    /// Clears all effects started through the web API.
    pub async fn try_clear_all_elements(&self) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::ClearAll, Vec::new()).await
    }

    pub async fn clear_all_elements(&self) {
        if let Err(err) = self.try_clear_all_elements().await {
            error!("Unable to clear all elements: {}", err);
        }
    }

    pub async fn try_play_sequence(
        &self,
        name: &str,
        file_name: &str,
    ) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::PlaySequence, sequence_values(name, file_name))
            .await
    }

    pub async fn play_sequence(&self, name: &str, file_name: &str) {
        if let Err(err) = self.try_play_sequence(name, file_name).await {
            error!("Unable to play sequence ({}): {}", name, err);
        }
    }

    pub async fn try_stop_sequence(
        &self,
        name: &str,
        file_name: &str,
    ) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::StopSequence, sequence_values(name, file_name))
            .await
    }

    pub async fn stop_sequence(&self, name: &str, file_name: &str) {
        if let Err(err) = self.try_stop_sequence(name, file_name).await {
            error!("Unable to stop sequence ({}): {}", name, err);
        }
    }

    pub async fn try_pause_sequence(
        &self,
        name: &str,
        file_name: &str,
    ) -> Result<Acknowledgment, CallError> {
        self.acknowledge(Endpoint::PauseSequence, sequence_values(name, file_name))
            .await
    }

    pub async fn pause_sequence(&self, name: &str, file_name: &str) {
        if let Err(err) = self.try_pause_sequence(name, file_name).await {
            error!("Unable to pause sequence ({}): {}", name, err);
        }
    }

    async fn acknowledge(
        &self,
        endpoint: Endpoint,
        values: Vec<String>,
    ) -> Result<Acknowledgment, CallError> {
        let body = self.call(endpoint, values).await?;
        let ack = Acknowledgment::from_body(&body)?;
        info!("{}", ack.message);
        Ok(ack)
    }

    /// Sends the request described by `endpoint`, filling its parameters with `values`.
    async fn call(&self, endpoint: Endpoint, values: Vec<String>) -> Result<Body, CallError> {
        let url = self.session.url(&endpoint.path());
        let fields = endpoint.fields(values)?;
        let fields = (!fields.is_empty()).then_some(fields.as_slice());

        match endpoint.method() {
            Method::Get => self.session.try_get(&url, fields).await,
            Method::Post => self.session.try_post(&url, None, fields).await,
        }
    }
}

fn on_values(id: &str, duration: u32, intensity: u8, color: Color) -> Vec<String> {
    vec![
        id.to_string(),
        duration.to_string(),
        intensity.to_string(),
        color.to_string(),
    ]
}

fn sequence_values(name: &str, file_name: &str) -> Vec<String> {
    vec![name.to_string(), file_name.to_string()]
}
