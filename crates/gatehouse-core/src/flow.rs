//! Verification flow state machine
//!
//! Event-in/effects-out controller for the email → code handoff. The shell
//! feeds it user actions, the one-second cooldown tick, and the
//! animation-completion signal; it answers with the effects the embedding
//! page reacts to (step changes, the submit visual, the final handoff).
//!
//! Events are processed to completion on a single thread, so the side
//! effects of one submission are always fully applied before the next
//! event is looked at.

use tracing::debug;

use crate::code::CodeField;
use crate::cooldown::{Cooldown, RESEND_COOLDOWN_SECS};
use crate::email::EmailField;

/// Current phase of the flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    /// Collecting the email address
    #[default]
    Email,

    /// Playing the handoff animation between email entry and code entry
    Transitioning,

    /// Collecting the one-time code
    Code,
}

/// Owner of an animation-completion signal.
///
/// Only completions reported by the flow panel itself advance the machine;
/// nested layers (the email sheen) finish on their own schedule and must
/// not be mistaken for the handoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimTarget {
    /// The transitioning flow panel
    FlowPanel,
    /// The highlight sweep across the confirmed email text
    EmailSheen,
}

/// Events consumed by the flow
#[derive(Clone, Debug)]
pub enum FlowEvent {
    /// The submit affordance was activated for the active step
    SubmitPressed,

    /// The submission settled (after the shell's optional cosmetic pause).
    /// For the email step, `container_height` is the flow panel's rendered
    /// height, pinned for the duration of the handoff.
    SubmitSettled { container_height: Option<u16> },

    /// An animation driver reported completion
    HandoffComplete { target: AnimTarget, generation: u64 },

    /// One rendering pass finished since the last transition
    RenderSettled,

    /// The "Change" affordance on the code panel
    ChangeEmail,

    /// The "send again" affordance
    ResendRequested,

    /// One wall-clock second elapsed on the cooldown ticker
    CooldownTick,
}

/// Effects the shell reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowEffect {
    /// The visible step changed (including into `Transitioning`)
    StepChanged(Step),

    /// An email submission began; play the page-level submit visual
    SubmitBegan,

    /// A well-formed code was submitted; hand control to the caller
    Verified,
}

/// The verification step controller.
///
/// Owns every piece of flow state: the fields, the cooldown counter, the
/// confirmed email copy, the sheen replay key, the pinned panel height and
/// the handoff generation used to reject stale completion signals.
#[derive(Debug)]
pub struct VerifyFlow {
    step: Step,
    email: EmailField,
    code: CodeField,
    cooldown: Cooldown,
    verified_email: Option<String>,
    sheen_key: u64,
    locked_height: Option<u16>,
    unlock_pending: bool,
    in_flight: Option<Step>,
    handoff_generation: u64,
    resend_secs: u64,
}

impl VerifyFlow {
    /// Create a flow expecting a `code_length`-digit code
    pub fn new(code_length: usize) -> Self {
        Self {
            step: Step::Email,
            email: EmailField::new(),
            code: CodeField::new(code_length),
            cooldown: Cooldown::new(),
            verified_email: None,
            sheen_key: 0,
            locked_height: None,
            unlock_pending: false,
            in_flight: None,
            handoff_generation: 0,
            resend_secs: RESEND_COOLDOWN_SECS,
        }
    }

    /// Override the cooldown restart value
    #[must_use]
    pub fn with_resend_seconds(mut self, seconds: u64) -> Self {
        self.resend_secs = seconds.max(1);
        self
    }

    /// Feed one event through the machine
    pub fn handle(&mut self, event: FlowEvent) -> Vec<FlowEffect> {
        match event {
            FlowEvent::SubmitPressed => self.on_submit_pressed(),
            FlowEvent::SubmitSettled { container_height } => {
                self.on_submit_settled(container_height)
            }
            FlowEvent::HandoffComplete { target, generation } => {
                self.on_handoff_complete(target, generation)
            }
            FlowEvent::RenderSettled => {
                if self.unlock_pending {
                    self.unlock_pending = false;
                    self.locked_height = None;
                }
                Vec::new()
            }
            FlowEvent::ChangeEmail => self.on_change_email(),
            FlowEvent::ResendRequested => {
                // No-op unless the countdown has fully expired.
                if self.step == Step::Code && self.cooldown.is_ready() {
                    self.cooldown.start(self.resend_secs);
                }
                Vec::new()
            }
            FlowEvent::CooldownTick => {
                self.cooldown.tick();
                Vec::new()
            }
        }
    }

    fn on_submit_pressed(&mut self) -> Vec<FlowEffect> {
        if self.in_flight.is_some() {
            return Vec::new();
        }
        match self.step {
            Step::Email if self.email.is_valid() => {
                self.in_flight = Some(Step::Email);
                // Before any state change, so the page can start its sweep.
                vec![FlowEffect::SubmitBegan]
            }
            Step::Code if self.code.is_valid() => {
                self.in_flight = Some(Step::Code);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_submit_settled(&mut self, container_height: Option<u16>) -> Vec<FlowEffect> {
        match self.in_flight.take() {
            Some(Step::Email) => {
                self.verified_email = Some(self.email.trimmed().to_string());
                self.cooldown.start(self.resend_secs);
                self.sheen_key += 1;
                self.locked_height = container_height;
                self.handoff_generation += 1;
                self.step = Step::Transitioning;
                vec![FlowEffect::StepChanged(Step::Transitioning)]
            }
            // Any well-formed code settles into the completion handoff; a
            // real verifier replaces this branch without reshaping the
            // machine.
            Some(Step::Code) => vec![FlowEffect::Verified],
            _ => Vec::new(),
        }
    }

    fn on_handoff_complete(&mut self, target: AnimTarget, generation: u64) -> Vec<FlowEffect> {
        if self.step != Step::Transitioning {
            debug!(?target, generation, "ignoring completion after step moved on");
            return Vec::new();
        }
        if target != AnimTarget::FlowPanel {
            debug!(?target, "ignoring completion from nested animation");
            return Vec::new();
        }
        if generation != self.handoff_generation {
            debug!(
                generation,
                current = self.handoff_generation,
                "ignoring stale handoff completion"
            );
            return Vec::new();
        }
        self.step = Step::Code;
        // Keep the height pinned for one more rendering pass so the panel
        // does not jump while the code card takes over.
        self.unlock_pending = true;
        vec![FlowEffect::StepChanged(Step::Code)]
    }

    fn on_change_email(&mut self) -> Vec<FlowEffect> {
        if self.step != Step::Code || self.in_flight.is_some() {
            return Vec::new();
        }
        // The email field keeps its value for in-place editing; cooldown
        // and the confirmed copy stay as they are until the next submit.
        self.step = Step::Email;
        vec![FlowEffect::StepChanged(Step::Email)]
    }

    /// The visible step
    pub fn step(&self) -> Step {
        self.step
    }

    /// The email field
    pub fn email(&self) -> &EmailField {
        &self.email
    }

    /// Mutable access for keystroke routing
    pub fn email_mut(&mut self) -> &mut EmailField {
        &mut self.email
    }

    /// The code field
    pub fn code(&self) -> &CodeField {
        &self.code
    }

    /// Mutable access for the segmented input
    pub fn code_mut(&mut self) -> &mut CodeField {
        &mut self.code
    }

    /// The resend cooldown
    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// The confirmed address shown on the code panel
    pub fn verified_email(&self) -> Option<&str> {
        self.verified_email.as_deref()
    }

    /// Replay key for the confirmed-email sheen; strictly increasing
    pub fn sheen_key(&self) -> u64 {
        self.sheen_key
    }

    /// Pinned panel height while the handoff settles
    pub fn locked_height(&self) -> Option<u16> {
        self.locked_height
    }

    /// Whether a submission is currently settling
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation tag the current handoff driver must echo back
    pub fn handoff_generation(&self) -> u64 {
        self.handoff_generation
    }

    /// Whether the submit affordance is enabled for the active step
    pub fn can_submit(&self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        match self.step {
            Step::Email => self.email.is_valid(),
            Step::Code => self.code.is_valid(),
            Step::Transitioning => false,
        }
    }

    /// Whether the "send again" affordance is enabled
    pub fn can_resend(&self) -> bool {
        self.step == Step::Code && self.cooldown.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled_email_flow() -> VerifyFlow {
        let mut flow = VerifyFlow::new(4);
        flow.email_mut().set("user@example.com");
        flow.handle(FlowEvent::SubmitPressed);
        flow.handle(FlowEvent::SubmitSettled {
            container_height: Some(12),
        });
        flow
    }

    fn complete_handoff(flow: &mut VerifyFlow) -> Vec<FlowEffect> {
        flow.handle(FlowEvent::HandoffComplete {
            target: AnimTarget::FlowPanel,
            generation: flow.handoff_generation(),
        })
    }

    #[test]
    fn invalid_email_never_submits() {
        let mut flow = VerifyFlow::new(4);
        flow.email_mut().set("not-an-address");
        assert!(!flow.can_submit());
        assert!(flow.handle(FlowEvent::SubmitPressed).is_empty());
        assert_eq!(flow.step(), Step::Email);
    }

    #[test]
    fn submit_began_fires_before_any_state_change() {
        let mut flow = VerifyFlow::new(4);
        flow.email_mut().set("user@example.com");
        let effects = flow.handle(FlowEvent::SubmitPressed);
        assert_eq!(effects, vec![FlowEffect::SubmitBegan]);
        // Still on the email step until the submission settles.
        assert_eq!(flow.step(), Step::Email);
        assert!(flow.in_flight());
    }

    #[test]
    fn resubmission_is_blocked_while_in_flight() {
        let mut flow = VerifyFlow::new(4);
        flow.email_mut().set("user@example.com");
        flow.handle(FlowEvent::SubmitPressed);
        assert!(!flow.can_submit());
        assert!(flow.handle(FlowEvent::SubmitPressed).is_empty());
    }

    #[test]
    fn email_settle_applies_all_side_effects() {
        let flow = settled_email_flow();
        assert_eq!(flow.step(), Step::Transitioning);
        assert_eq!(flow.verified_email(), Some("user@example.com"));
        assert_eq!(flow.cooldown().remaining(), RESEND_COOLDOWN_SECS);
        assert_eq!(flow.sheen_key(), 1);
        assert_eq!(flow.locked_height(), Some(12));
        assert!(!flow.in_flight());
    }

    #[test]
    fn trimmed_email_is_what_gets_confirmed() {
        let mut flow = VerifyFlow::new(4);
        flow.email_mut().set(" a@b.com ");
        flow.handle(FlowEvent::SubmitPressed);
        flow.handle(FlowEvent::SubmitSettled {
            container_height: None,
        });
        assert_eq!(flow.verified_email(), Some("a@b.com"));
        assert_eq!(flow.step(), Step::Transitioning);
    }

    #[test]
    fn handoff_completion_advances_to_code() {
        let mut flow = settled_email_flow();
        let effects = complete_handoff(&mut flow);
        assert_eq!(effects, vec![FlowEffect::StepChanged(Step::Code)]);
        assert_eq!(flow.step(), Step::Code);
        // Height stays pinned until a render pass settles.
        assert_eq!(flow.locked_height(), Some(12));
        flow.handle(FlowEvent::RenderSettled);
        assert_eq!(flow.locked_height(), None);
    }

    #[test]
    fn sheen_completion_does_not_advance_the_step() {
        let mut flow = settled_email_flow();
        let effects = flow.handle(FlowEvent::HandoffComplete {
            target: AnimTarget::EmailSheen,
            generation: flow.handoff_generation(),
        });
        assert!(effects.is_empty());
        assert_eq!(flow.step(), Step::Transitioning);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut flow = settled_email_flow();
        let effects = flow.handle(FlowEvent::HandoffComplete {
            target: AnimTarget::FlowPanel,
            generation: flow.handoff_generation() - 1,
        });
        assert!(effects.is_empty());
        assert_eq!(flow.step(), Step::Transitioning);
    }

    #[test]
    fn completion_after_step_moved_on_is_ignored() {
        let mut flow = settled_email_flow();
        let stale_generation = flow.handoff_generation();
        complete_handoff(&mut flow);
        flow.handle(FlowEvent::ChangeEmail);
        assert_eq!(flow.step(), Step::Email);

        let effects = flow.handle(FlowEvent::HandoffComplete {
            target: AnimTarget::FlowPanel,
            generation: stale_generation,
        });
        assert!(effects.is_empty());
        assert_eq!(flow.step(), Step::Email);
    }

    #[test]
    fn change_keeps_fields_and_cooldown() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        flow.handle(FlowEvent::CooldownTick);

        let effects = flow.handle(FlowEvent::ChangeEmail);
        assert_eq!(effects, vec![FlowEffect::StepChanged(Step::Email)]);
        assert_eq!(flow.email().raw(), "user@example.com");
        assert_eq!(flow.verified_email(), Some("user@example.com"));
        assert_eq!(flow.cooldown().remaining(), RESEND_COOLDOWN_SECS - 1);
    }

    #[test]
    fn change_is_only_available_from_code() {
        let mut flow = VerifyFlow::new(4);
        assert!(flow.handle(FlowEvent::ChangeEmail).is_empty());

        let mut flow = settled_email_flow();
        assert!(flow.handle(FlowEvent::ChangeEmail).is_empty());
        assert_eq!(flow.step(), Step::Transitioning);
    }

    #[test]
    fn resend_is_idempotent_while_counting() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        flow.handle(FlowEvent::CooldownTick);
        let before = flow.cooldown().remaining();
        flow.handle(FlowEvent::ResendRequested);
        assert_eq!(flow.cooldown().remaining(), before);
    }

    #[test]
    fn resend_rearms_once_expired() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        for _ in 0..RESEND_COOLDOWN_SECS {
            flow.handle(FlowEvent::CooldownTick);
        }
        assert!(flow.can_resend());
        flow.handle(FlowEvent::ResendRequested);
        assert_eq!(flow.cooldown().remaining(), RESEND_COOLDOWN_SECS);
        assert_eq!(flow.step(), Step::Code);
    }

    #[test]
    fn resubmitting_email_rearms_cooldown_and_sheen() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        flow.handle(FlowEvent::ChangeEmail);
        flow.handle(FlowEvent::CooldownTick);

        flow.handle(FlowEvent::SubmitPressed);
        flow.handle(FlowEvent::SubmitSettled {
            container_height: Some(12),
        });
        assert_eq!(flow.cooldown().remaining(), RESEND_COOLDOWN_SECS);
        assert_eq!(flow.sheen_key(), 2);
        assert_eq!(flow.handoff_generation(), 2);
    }

    #[test]
    fn well_formed_code_settles_into_verified() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        flow.code_mut().merge_digits("1234");
        assert!(flow.can_submit());
        assert!(flow.handle(FlowEvent::SubmitPressed).is_empty());
        let effects = flow.handle(FlowEvent::SubmitSettled {
            container_height: None,
        });
        assert_eq!(effects, vec![FlowEffect::Verified]);
        assert_eq!(flow.step(), Step::Code);
    }

    #[test]
    fn short_code_cannot_submit() {
        let mut flow = settled_email_flow();
        complete_handoff(&mut flow);
        flow.code_mut().merge_digits("123");
        assert!(!flow.can_submit());
        assert!(flow.handle(FlowEvent::SubmitPressed).is_empty());
    }

    #[test]
    fn spurious_settle_is_harmless() {
        let mut flow = VerifyFlow::new(4);
        let effects = flow.handle(FlowEvent::SubmitSettled {
            container_height: Some(9),
        });
        assert!(effects.is_empty());
        assert_eq!(flow.step(), Step::Email);
        assert_eq!(flow.locked_height(), None);
    }
}
