//! Dependency rules between the electronic-message consent and its channels.
//!
//! The parent flag mirrors "at least one channel is on". Ticking the parent
//! with no channel selected opts into every channel, clearing it clears them
//! all, and any active channel also sets the general consent flag.

use serde::{Deserialize, Serialize};

/// The five consent checkboxes of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentState {
    pub consent: bool,
    pub electronic_message: bool,
    pub sms: bool,
    pub email: bool,
    pub phone: bool,
}

/// Addressable consent checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsentField {
    Consent,
    ElectronicMessage,
    Sms,
    Email,
    Phone,
}

impl ConsentState {
    fn channels(&self) -> [bool; 3] {
        [self.sms, self.email, self.phone]
    }

    fn set_channels(&mut self, value: bool) {
        self.sms = value;
        self.email = value;
        self.phone = value;
    }

    pub fn any_channel(&self) -> bool {
        self.sms || self.email || self.phone
    }

    /// True when no parent/channel rule is violated.
    pub fn is_consistent(&self) -> bool {
        self.electronic_message == self.any_channel() && (!self.any_channel() || self.consent)
    }

    pub fn get(&self, field: ConsentField) -> bool {
        match field {
            ConsentField::Consent => self.consent,
            ConsentField::ElectronicMessage => self.electronic_message,
            ConsentField::Sms => self.sms,
            ConsentField::Email => self.email,
            ConsentField::Phone => self.phone,
        }
    }

    /// Apply one checkbox change and reconcile against the current state.
    pub fn with(self, field: ConsentField, checked: bool) -> Self {
        let mut proposed = self;
        match field {
            ConsentField::Consent => proposed.consent = checked,
            ConsentField::ElectronicMessage => proposed.electronic_message = checked,
            ConsentField::Sms => proposed.sms = checked,
            ConsentField::Email => proposed.email = checked,
            ConsentField::Phone => proposed.phone = checked,
        }
        reconcile(&self, proposed)
    }
}

/// Normalise `proposed` given the state it was derived from.
///
/// Channel edits take precedence over a simultaneous parent edit. The result is
/// always consistent, and reconciling it again against the same `previous` is a
/// no-op.
pub fn reconcile(previous: &ConsentState, proposed: ConsentState) -> ConsentState {
    let mut next = proposed;

    if next.channels() != previous.channels() {
        next.electronic_message = next.any_channel();
    } else if next.electronic_message != previous.electronic_message {
        if !next.electronic_message {
            next.set_channels(false);
        } else if !next.any_channel() {
            next.set_channels(true);
        }
    } else if !next.electronic_message {
        next.set_channels(false);
    } else if !next.any_channel() {
        next.electronic_message = false;
    }

    if next.any_channel() {
        next.consent = true;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> Vec<ConsentState> {
        (0u8..32)
            .map(|bits| ConsentState {
                consent: bits & 1 != 0,
                electronic_message: bits & 2 != 0,
                sms: bits & 4 != 0,
                email: bits & 8 != 0,
                phone: bits & 16 != 0,
            })
            .collect()
    }

    #[test]
    fn checking_parent_with_no_channels_opts_into_all() {
        let next = ConsentState::default().with(ConsentField::ElectronicMessage, true);
        assert!(next.sms && next.email && next.phone);
        assert!(next.electronic_message);
        assert!(next.consent);
    }

    #[test]
    fn unchecking_parent_clears_channels_but_keeps_consent() {
        let on = ConsentState::default().with(ConsentField::ElectronicMessage, true);
        let off = on.with(ConsentField::ElectronicMessage, false);
        assert!(!off.any_channel());
        assert!(!off.electronic_message);
        assert!(off.consent, "general consent is never withdrawn by channel rules");
    }

    #[test]
    fn parent_follows_last_remaining_channel() {
        let state = ConsentState::default()
            .with(ConsentField::ElectronicMessage, true)
            .with(ConsentField::Sms, false)
            .with(ConsentField::Email, false);
        assert!(state.phone);
        assert!(state.electronic_message);

        let state = state.with(ConsentField::Phone, false);
        assert!(!state.electronic_message);
    }

    #[test]
    fn checking_a_single_channel_sets_parent_without_bulk_opt_in() {
        let state = ConsentState::default().with(ConsentField::Email, true);
        assert!(state.electronic_message);
        assert!(state.consent);
        assert!(!state.sms && !state.phone);
    }

    #[test]
    fn parent_equals_any_channel_for_every_channel_assignment() {
        for previous in all_states().into_iter().map(|s| reconcile(&s, s)) {
            for bits in 0u8..8 {
                let mut proposed = previous;
                proposed.sms = bits & 1 != 0;
                proposed.email = bits & 2 != 0;
                proposed.phone = bits & 4 != 0;
                let next = reconcile(&previous, proposed);
                assert_eq!(next.electronic_message, next.any_channel(), "{previous:?} -> {next:?}");
            }
        }
    }

    #[test]
    fn reconcile_results_are_consistent_and_idempotent() {
        for previous in all_states() {
            for proposed in all_states() {
                let once = reconcile(&previous, proposed);
                assert!(once.is_consistent(), "{previous:?} + {proposed:?} -> {once:?}");
                assert_eq!(reconcile(&previous, once), once);
                assert_eq!(reconcile(&once, once), once);
            }
        }
    }
}
