use tracing::{debug, error, info, instrument, warn};

use http_common::{build_short_link, SHORTEN_PATH};

use crate::validate::validate_candidate;
use crate::{ClientConfig, CoreError, DisplaySink, DisplayState, ShortenRequest, ShortenResponse, Transport};

/// Client service driving one shortening cycle per `submit`.
///
/// It is generic over the transport and the display sink, so the whole
/// validate → send → await → render sequence is testable without a network
/// or a terminal. Each call is an independent state machine; nothing is
/// remembered between calls and concurrent calls are not serialized.
pub struct ShortenClient<T: Transport, D: DisplaySink> {
    transport: T,
    display: D,
    config: ClientConfig,
}

impl<T: Transport, D: DisplaySink> ShortenClient<T, D> {
    pub fn new(transport: T, display: D, config: ClientConfig) -> Self {
        Self {
            transport,
            display,
            config,
        }
    }

    /// Run one cycle for `candidate` and render the outcome.
    ///
    /// Never fails: validation and request errors are rendered and returned
    /// as the resulting `DisplayState`.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn submit(&self, candidate: &str) -> DisplayState {
        let state = match self.shorten(candidate).await {
            Ok(link) => DisplayState::ComposedLink(link),
            Err(CoreError::Validation) => DisplayState::ValidationError,
            Err(CoreError::Request(_)) => DisplayState::RequestError,
        };
        self.display.show(state.text());
        state
    }

    /// Validate `candidate`, send it to the service and compose the short link.
    pub async fn shorten(&self, candidate: &str) -> Result<String, CoreError> {
        debug!("validating");
        if let Err(e) = validate_candidate(candidate) {
            warn!(candidate, "input link has wrong format");
            return Err(e);
        }

        debug!(path = SHORTEN_PATH, "requesting");
        let body = ShortenRequest::new(candidate).to_json()?;
        let outcome = match self.transport.post_json(SHORTEN_PATH, body).await {
            Ok(reply) => ShortenResponse::from_json(&reply.body).map(|parsed| (reply, parsed)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((reply, parsed)) => {
                info!(status = reply.status, body = %reply.body, "shorten response");
                Ok(build_short_link(&self.config.base_url, &parsed.short))
            }
            Err(e) => {
                error!(error = %e, "shorten request failed");
                Err(e)
            }
        }
    }
}
