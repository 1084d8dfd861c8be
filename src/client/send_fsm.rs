use rust_fsm::*;

state_machine! {
    send_flow(Idle)

    Idle(Send) => AwaitingReply,
    AwaitingReply(Reply) => Idle,
    AwaitingReply(Fail) => Idle
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendState {
    Idle,
    AwaitingReply,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendEvent {
    Send,
    Reply,
    Fail,
}

/// In-flight guard for the chat client. At most one send is outstanding.
pub struct SendFlow {
    machine: send_flow::StateMachine,
}

impl SendFlow {
    pub fn new() -> Self {
        Self {
            machine: send_flow::StateMachine::new(),
        }
    }

    pub fn state(&self) -> SendState {
        match self.machine.state() {
            send_flow::State::Idle => SendState::Idle,
            send_flow::State::AwaitingReply => SendState::AwaitingReply,
        }
    }

    /// Applies `event`; returns false when the transition is not allowed.
    pub fn apply(&mut self, event: SendEvent) -> bool {
        let input = match event {
            SendEvent::Send => send_flow::Input::Send,
            SendEvent::Reply => send_flow::Input::Reply,
            SendEvent::Fail => send_flow::Input::Fail,
        };
        self.machine.consume(&input).is_ok()
    }
}

impl Default for SendFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_then_reply_returns_to_idle() {
        let mut flow = SendFlow::new();
        assert_eq!(flow.state(), SendState::Idle);
        assert!(flow.apply(SendEvent::Send));
        assert_eq!(flow.state(), SendState::AwaitingReply);
        assert!(flow.apply(SendEvent::Reply));
        assert_eq!(flow.state(), SendState::Idle);
    }

    #[test]
    fn second_send_while_waiting_is_rejected() {
        let mut flow = SendFlow::new();
        assert!(flow.apply(SendEvent::Send));
        assert!(!flow.apply(SendEvent::Send));
        assert!(flow.apply(SendEvent::Fail));
        assert!(flow.apply(SendEvent::Send));
    }

    #[test]
    fn completion_without_send_is_rejected() {
        let mut flow = SendFlow::new();
        assert!(!flow.apply(SendEvent::Reply));
        assert!(!flow.apply(SendEvent::Fail));
        assert_eq!(flow.state(), SendState::Idle);
    }
}
