use crate::{Error, Result};
use tracing::{debug, info, warn};

// Request lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

// Request lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Submit,
    ResponseReceived,
    RequestFailed,
    Settle,
}

/// `Idle -> Loading -> {Succeeded, Failed} -> Idle`
#[derive(Debug)]
pub struct RequestStateMachine {
    state: RequestState,
}

impl Default for RequestStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStateMachine {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == RequestState::Loading
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        let old_state = self.state;
        debug!("Request FSM processing {:?} in state {:?}", event, old_state);

        let new_state = match (old_state, event) {
            (RequestState::Idle, RequestEvent::Submit) => RequestState::Loading,
            (RequestState::Loading, RequestEvent::ResponseReceived) => RequestState::Succeeded,
            (RequestState::Loading, RequestEvent::RequestFailed) => RequestState::Failed,
            (RequestState::Succeeded | RequestState::Failed, RequestEvent::Settle) => {
                RequestState::Idle
            }
            _ => {
                warn!(
                    "Invalid request FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Request state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_cycle_returns_to_idle() {
        let mut fsm = RequestStateMachine::new();
        fsm.transition(RequestEvent::Submit).unwrap();
        assert!(fsm.is_loading());
        fsm.transition(RequestEvent::ResponseReceived).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Succeeded);
        fsm.transition(RequestEvent::Settle).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Idle);
    }

    #[test]
    fn test_failure_cycle_returns_to_idle() {
        let mut fsm = RequestStateMachine::new();
        fsm.transition(RequestEvent::Submit).unwrap();
        fsm.transition(RequestEvent::RequestFailed).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Failed);
        fsm.transition(RequestEvent::Settle).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Idle);
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut fsm = RequestStateMachine::new();
        fsm.transition(RequestEvent::Submit).unwrap();

        let err = fsm.transition(RequestEvent::Submit).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(fsm.current_state(), RequestState::Loading);
    }

    #[test]
    fn test_completion_without_request_is_rejected() {
        let mut fsm = RequestStateMachine::new();
        assert!(fsm.transition(RequestEvent::ResponseReceived).is_err());
        assert!(fsm.transition(RequestEvent::Settle).is_err());
        assert_eq!(fsm.current_state(), RequestState::Idle);
    }
}
