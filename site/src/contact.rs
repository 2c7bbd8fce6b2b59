//! Contact form.

use crate::environment::SiteEnvironment;
use crate::error::SiteError;
use crate::types::{ContactField, ContactMessage};
use std::sync::Arc;
use std::time::Duration;
use venue_core::effect::{Effect, EffectId};
use venue_core::{SmallVec, async_effect, reducer::Reducer, smallvec, timer};

/// How long the thank-you notice stays up
pub const CONFIRMATION_DISPLAY: Duration = Duration::from_millis(5000);

/// Timer hiding the thank-you notice
pub const CONFIRMATION_TIMEOUT: EffectId = EffectId::new("contact.confirmation");

/// State of the contact form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    /// Form contents
    pub form: ContactMessage,
    /// Whether a submission is in flight
    pub submitting: bool,
    /// Whether the thank-you notice is shown
    pub confirmation_visible: bool,
    /// Last error shown to the user
    pub error: Option<SiteError>,
}

/// Everything that can happen on the contact form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactAction {
    /// The user edited a field
    UpdateField {
        /// Edited field
        field: ContactField,
        /// New value
        value: String,
    },
    /// The user submitted the form
    Submit,
    /// The message was stored
    Sent,
    /// The message could not be stored
    SendFailed {
        /// Why
        error: SiteError,
    },
    /// The thank-you notice timed out
    DismissConfirmation,
}

/// Reducer for the contact form
#[derive(Clone, Debug, Default)]
pub struct ContactReducer;

impl ContactReducer {
    /// Creates a new `ContactReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ContactReducer {
    type State = ContactState;
    type Action = ContactAction;
    type Environment = SiteEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ContactAction::UpdateField { field, value } => {
                state.form.set(field, value);
                smallvec![Effect::None]
            },

            ContactAction::Submit => {
                if state.submitting {
                    return smallvec![Effect::None];
                }
                if let Some(field) = state.form.missing_field() {
                    state.error = Some(SiteError::MissingField(field));
                    return smallvec![Effect::None];
                }

                state.submitting = true;
                state.error = None;
                let backend = Arc::clone(&env.backend);
                let message = state.form.clone();

                smallvec![async_effect! {
                    match backend.insert_contact_message(message).await {
                        Ok(()) => Some(ContactAction::Sent),
                        Err(error) => {
                            tracing::error!(%error, "Error sending message");
                            Some(ContactAction::SendFailed { error: error.into() })
                        },
                    }
                }]
            },

            ContactAction::Sent => {
                state.submitting = false;
                state.form = ContactMessage::default();
                state.confirmation_visible = true;
                smallvec![timer! {
                    id: CONFIRMATION_TIMEOUT,
                    after: CONFIRMATION_DISPLAY,
                    action: ContactAction::DismissConfirmation
                }]
            },

            ContactAction::SendFailed { error } => {
                state.submitting = false;
                state.error = Some(error);
                smallvec![Effect::None]
            },

            ContactAction::DismissConfirmation => {
                state.confirmation_visible = false;
                smallvec![Effect::None]
            },
        }
    }
}
