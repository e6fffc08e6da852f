//! The traceroute view model.

use sitescope_types::TracerouteResult;
use tracing::debug;

use super::{Effect, RequestId};
use crate::api::RequestError;
use crate::input::ValidationError;

/// State for the traceroute panel.
#[derive(Debug, Clone, Default)]
pub struct TracerouteViewModel {
    result: Option<TracerouteResult>,
    is_loading: bool,
    error_message: Option<String>,
    next_id: RequestId,
    latest_id: Option<RequestId>,
}

impl TracerouteViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&TracerouteResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Drop the shown result and error.
    ///
    /// Called whenever a new analysis starts so the panel never shows data
    /// for a previous URL. An in-flight trace is not cancelled and still
    /// applies when it finishes.
    pub fn reset(&mut self) {
        self.result = None;
        self.error_message = None;
    }

    /// Start a traceroute against `target`.
    ///
    /// An empty target fails immediately without issuing a request.
    pub fn begin(&mut self, target: &str) -> Result<Effect, ValidationError> {
        if target.is_empty() {
            let err = ValidationError::MissingTracerouteTarget;
            self.error_message = Some(err.to_string());
            return Err(err);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.latest_id = Some(id);
        self.is_loading = true;
        self.error_message = None;

        Ok(Effect::Traceroute {
            id,
            target: target.to_string(),
        })
    }

    /// Apply the outcome of traceroute `id`.
    ///
    /// Only the most recently started trace is applied; an older one that
    /// finishes late is dropped and leaves the loading flag alone.
    pub fn complete(&mut self, id: RequestId, result: Result<TracerouteResult, RequestError>) {
        if self.latest_id != Some(id) {
            debug!("discarding superseded traceroute #{}", id);
            return;
        }

        match result {
            Ok(trace) => self.result = Some(trace),
            Err(err) => self.error_message = Some(err.to_string()),
        }
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{server_error, trace};

    fn trace_id(effect: &Effect) -> RequestId {
        match effect {
            Effect::Traceroute { id, .. } => *id,
            other => panic!("expected traceroute effect, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_target_fails_without_effect() {
        let mut vm = TracerouteViewModel::new();

        let err = vm.begin("").unwrap_err();
        assert_eq!(err, ValidationError::MissingTracerouteTarget);
        assert_eq!(vm.error_message(), Some("Enter a URL before running traceroute."));
        assert!(!vm.is_loading());
    }

    #[test]
    fn test_success_lifecycle() {
        let mut vm = TracerouteViewModel::new();
        let effect = vm.begin("https://a.com").unwrap();

        assert!(matches!(effect, Effect::Traceroute { ref target, .. } if target == "https://a.com"));
        assert!(vm.is_loading());

        vm.complete(trace_id(&effect), Ok(trace("https://a.com")));
        let result = vm.result().unwrap();
        assert_eq!(result.hops.len(), 1);
        assert_eq!(result.hops[0].hop, 1);
        assert!(!vm.is_loading());
    }

    #[test]
    fn test_failure_sets_error() {
        let mut vm = TracerouteViewModel::new();
        let id = trace_id(&vm.begin("https://a.com").unwrap());
        vm.complete(id, Err(server_error(504, "Traceroute timed out")));

        assert_eq!(vm.error_message(), Some("Traceroute timed out"));
        assert!(vm.result().is_none());
        assert!(!vm.is_loading());
    }

    #[test]
    fn test_begin_clears_error_but_keeps_result() {
        let mut vm = TracerouteViewModel::new();
        let id = trace_id(&vm.begin("https://a.com").unwrap());
        vm.complete(id, Ok(trace("https://a.com")));
        vm.begin("").unwrap_err();

        vm.begin("https://a.com").unwrap();
        assert!(vm.error_message().is_none());
        assert!(vm.result().is_some());
    }

    #[test]
    fn test_reset() {
        let mut vm = TracerouteViewModel::new();
        let id = trace_id(&vm.begin("https://a.com").unwrap());
        vm.complete(id, Ok(trace("https://a.com")));
        vm.reset();

        assert!(vm.result().is_none());
        assert!(vm.error_message().is_none());
    }

    #[test]
    fn test_trace_in_flight_during_reset_still_applies() {
        let mut vm = TracerouteViewModel::new();
        let id = trace_id(&vm.begin("https://a.com").unwrap());
        vm.reset();

        vm.complete(id, Ok(trace("https://a.com")));
        assert!(vm.result().is_some());
        assert!(!vm.is_loading());
    }

    #[test]
    fn test_superseded_trace_is_dropped() {
        let mut vm = TracerouteViewModel::new();
        let first = trace_id(&vm.begin("https://a.com").unwrap());
        let second = trace_id(&vm.begin("https://b.com").unwrap());

        vm.complete(second, Ok(trace("https://b.com")));
        vm.complete(first, Ok(trace("https://a.com")));

        assert_eq!(vm.result().unwrap().target, "https://b.com");
        assert!(!vm.is_loading());
    }
}
