use std::error::Error;
use std::future::Future;

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;

use crate::bot_state::BotState;
use crate::database::DirectoryError;
use crate::models::Role;

/// Roles allowed to drive the brewery.
pub const OPERATORS: &[Role] = &[Role::User, Role::Admin];

const DENIAL: &str =
    "You have no permission to use this command, use web UI to give authorization.";

/// Run `handler` only when the caller's role is in `allowed`.
///
/// Unknown callers and insufficient roles get exactly one denial, sent as a
/// reply to the triggering message, and the handler never runs. Store
/// failures during the lookup propagate instead of denying.
pub async fn guarded<H, Fut>(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    allowed: &[Role],
    handler: H,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    H: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), Box<dyn Error + Send + Sync>>>,
{
    if !role_permits(caller_role(msg, state).await?, allowed) {
        bot.send_message(msg.chat.id, DENIAL)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    handler().await
}

/// `None` when the message has no sender or the sender is not registered.
async fn caller_role(msg: &Message, state: &BotState) -> Result<Option<Role>, DirectoryError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(None);
    };

    match state.db().user_role(user.id).await {
        Ok(role) => Ok(Some(role)),
        Err(DirectoryError::UserNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn role_permits(role: Option<Role>, allowed: &[Role]) -> bool {
    role.is_some_and(|role| allowed.contains(&role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_callers_are_denied() {
        assert!(!role_permits(None, OPERATORS));
    }

    #[test]
    fn guests_are_denied_operator_commands() {
        assert!(!role_permits(Some(Role::Guest), OPERATORS));
    }

    #[test]
    fn users_and_admins_pass() {
        assert!(role_permits(Some(Role::User), OPERATORS));
        assert!(role_permits(Some(Role::Admin), OPERATORS));
    }

    #[test]
    fn an_empty_allowed_set_denies_everyone() {
        assert!(!role_permits(Some(Role::Admin), &[]));
    }
}
