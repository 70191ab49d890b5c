//! # API Facade
//!
//! [`Dispatcher`] is the single entry point for running a command line. Every UI
//! (the CLI's `run` and `shell`, or anything embedding the library) goes through
//! [`Dispatcher::dispatch`].
//!
//! ## Pipeline
//!
//! 1. Reject blank input.
//! 2. Recognize the command key ([`crate::recognize`]).
//! 3. Check activation, reading the state fresh from the [`ActivationSource`].
//! 4. Build arguments for the command's [`crate::catalog::ArgShape`].
//! 5. Invoke the handler and wrap its message into a [`DispatchResult`].
//!
//! Steps 1-3 never touch the site. A rejected line is guaranteed not to reach a handler.
//!
//! ## Errors
//!
//! User-facing failures (unknown command, bad arguments, refused writes) come back as
//! `Ok` with `ok == false`. `Err` is reserved for infrastructure failures such as an
//! unreadable site file or settings file, which the caller turns into a transport
//! level failure.

use crate::activation::ActivationSource;
use crate::args;
use crate::catalog::CommandKey;
use crate::commands::{self, CmdMessage};
use crate::error::Result;
use crate::recognize;
use crate::store::SiteBackend;
use serde::Serialize;

/// What a caller gets back for one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    /// `false` for error results, and for any result whose rendered text starts
    /// with `Error:` (a stored value can carry that prefix).
    pub ok: bool,
    pub text: String,
}

impl From<&CmdMessage> for DispatchResult {
    fn from(message: &CmdMessage) -> Self {
        let text = message.to_text();
        Self {
            ok: !message.is_error() && !text.starts_with("Error:"),
            text,
        }
    }
}

/// Generic over the site backend and the activation source:
/// - Production: `Dispatcher<FileSite, SettingsFile>`
/// - Testing: `Dispatcher<InMemorySite, ActivationState>`
pub struct Dispatcher<B: SiteBackend, A: ActivationSource> {
    site: B,
    activation: A,
    handled: usize,
}

impl<B: SiteBackend, A: ActivationSource> Dispatcher<B, A> {
    pub fn new(site: B, activation: A) -> Self {
        Self {
            site,
            activation,
            handled: 0,
        }
    }

    pub fn dispatch(&mut self, raw: &str) -> Result<DispatchResult> {
        let message = self.execute(raw)?;
        Ok(DispatchResult::from(&message))
    }

    /// Like [`dispatch`](Self::dispatch), but keeps the tagged message.
    pub fn execute(&mut self, raw: &str) -> Result<CmdMessage> {
        let line = raw.trim();
        if line.is_empty() {
            tracing::warn!("rejected empty command");
            return Ok(CmdMessage::error("Command cannot be empty."));
        }

        let Some(recognized) = recognize::identify(line) else {
            tracing::warn!(command = line, "unrecognized command");
            return Ok(CmdMessage::error(format!(
                "Command '{}' is not recognized or not supported. Type 'help' to see available commands.",
                line
            )));
        };
        let key = recognized.key;

        if !self.is_active(key)? {
            tracing::warn!(command = %key, "blocked deactivated command");
            return Ok(CmdMessage::error(format!(
                "Command '{}' has been deactivated by the site administrator.",
                key
            )));
        }

        let arguments = args::extract(key.descriptor().args, recognized.rest);
        tracing::debug!(command = %key, ?arguments, "dispatching");

        let handler = commands::handler_for::<B>(key);
        self.handled += 1;
        let message = handler(&mut self.site, &arguments)?;
        if message.is_error() {
            tracing::debug!(command = %key, message = %message.content, "command reported an error");
        }
        Ok(message)
    }

    pub fn is_active(&self, key: CommandKey) -> Result<bool> {
        Ok(self.activation.activation_state()?.is_active(key))
    }

    /// Number of lines that reached a handler.
    pub fn handled(&self) -> usize {
        self.handled
    }

    pub fn site(&self) -> &B {
        &self.site
    }

    pub fn activation(&self) -> &A {
        &self.activation
    }

    pub fn activation_mut(&mut self) -> &mut A {
        &mut self.activation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationState;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::InMemorySite;

    fn dispatcher(state: ActivationState) -> Dispatcher<InMemorySite, ActivationState> {
        Dispatcher::new(
            SiteFixture::new()
                .with_plugin("hello.php", "Hello Dolly", false)
                .build(),
            state,
        )
    }

    #[test]
    fn blank_input_never_reaches_a_handler() {
        let mut d = dispatcher(ActivationState::Unset);
        for raw in ["", "   ", "\n\t"] {
            let result = d.dispatch(raw).unwrap();
            assert_eq!(
                result,
                DispatchResult {
                    ok: false,
                    text: "Error: Command cannot be empty.".into()
                }
            );
        }
        assert_eq!(d.handled(), 0);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let mut d = dispatcher(ActivationState::Unset);
        let result = d.dispatch("  post list ").unwrap();
        assert!(!result.ok);
        assert_eq!(
            result.text,
            "Error: Command 'post list' is not recognized or not supported. Type 'help' to see available commands."
        );
        assert_eq!(d.handled(), 0);
    }

    #[test]
    fn unset_state_allows_everything() {
        let mut d = dispatcher(ActivationState::Unset);
        let result = d.dispatch("core version").unwrap();
        assert_eq!(result.text, "6.5.2");
        assert!(result.ok);
        assert_eq!(d.handled(), 1);
    }

    #[test]
    fn configured_state_is_fail_closed() {
        let mut d = dispatcher(ActivationState::configured([("user list", false)]));
        let result = d.dispatch("core version").unwrap();
        assert_eq!(
            result.text,
            "Error: Command 'core version' has been deactivated by the site administrator."
        );
        let result = d.dispatch("user list").unwrap();
        assert!(!result.ok);
        assert_eq!(d.handled(), 0);
    }

    #[test]
    fn activation_changes_apply_to_the_next_call() {
        let mut d = dispatcher(ActivationState::Unset);
        assert!(d.dispatch("plugin list").unwrap().ok);

        *d.activation_mut() = ActivationState::configured([("plugin list", false)]);
        let result = d.dispatch("plugin list").unwrap();
        assert!(result.text.contains("deactivated by the site administrator"));
    }

    #[test]
    fn blocked_command_has_no_side_effects() {
        let mut d = dispatcher(ActivationState::configured([("plugin activate", false)]));
        let result = d.dispatch("plugin activate hello.php").unwrap();
        assert!(!result.ok);
        assert!(!d.site().is_plugin_active("hello.php").unwrap());
    }

    #[test]
    fn notices_and_successes_are_ok() {
        let mut d = dispatcher(ActivationState::Unset);
        let result = d.dispatch("option get missing").unwrap();
        assert!(result.ok);
        assert_eq!(result.text, "Notice: Option 'missing' not found.");

        let result = d.dispatch("PLUGIN Activate hello.php").unwrap();
        assert!(result.ok);
        assert_eq!(result.text, "Success: Plugin 'hello.php' activated.");
    }

    #[test]
    fn error_prefixed_text_is_never_ok() {
        let mut d = dispatcher(ActivationState::Unset);
        d.dispatch("option update note Error: disk full").unwrap();

        let result = d.dispatch("option get note").unwrap();
        assert_eq!(
            result,
            DispatchResult {
                ok: false,
                text: "Error: disk full".into()
            }
        );
    }

    #[test]
    fn execute_keeps_the_tagged_message() {
        let mut d = dispatcher(ActivationState::Unset);
        let message = d.execute("user get nobody").unwrap();
        assert!(message.is_error());
        assert_eq!(message.content, "User 'nobody' not found.");
    }

    #[test]
    fn help_lists_all_commands_even_when_some_are_inactive() {
        let state = ActivationState::Unset.with_command(CommandKey::UserList, false);
        let mut d = dispatcher(state);
        let result = d.dispatch("/HELP").unwrap();
        assert!(result.ok);
        assert!(result.text.contains("- user list: "));
    }
}
