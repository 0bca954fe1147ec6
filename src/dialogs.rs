use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::timezones;

/// Keyboard label that aborts a dialog, alongside the /cancel command.
pub const CLOSE_LABEL: &str = "Close";
/// Fixed acknowledgement for an aborted dialog.
pub const CANCEL_ACK: &str = "Perhaps another time";
/// The kettle addressed by the single-kettle commands.
pub const KETTLE_1: u8 = 1;

const CANCEL_COMMAND: &str = "/cancel";

const CONTINENT_PROMPT: &str = "Please select a continent, or /cancel to cancel:";
const CITY_PROMPT: &str = "Please select a timezone, or /cancel to cancel:";
const TEMP_PROMPT: &str = "Input Kettle Temp:";

/// Multi-turn flows a user can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    SetTimezone,
    SetKettleTemp,
}

/// Where a user currently is inside a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    TimezoneContinent,
    TimezoneCity { continent: String },
    KettleTemp { kettle: u8 },
}

/// Outcome of one dialog turn. The `Apply*` variants end the flow and hand
/// the validated effect to the caller, which owns the confirmation reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Prompt {
        text: String,
        choices: Vec<&'static str>,
    },
    End {
        text: String,
    },
    ApplyTimezone {
        zone: String,
    },
    ApplyKettleTemp {
        kettle: u8,
        temp: i64,
    },
}

/// Per-user dialog state, keyed by telegram user id. One flow per user:
/// `begin` supersedes whatever was in flight.
#[derive(Clone, Default)]
pub struct Dialogs {
    flows: Arc<RwLock<HashMap<UserId, FlowState>>>,
}

impl Dialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_active(&self, user: UserId) -> bool {
        self.flows.read().await.contains_key(&user)
    }

    /// Enter a flow, discarding any prior state for this user, and return
    /// the opening prompt.
    pub async fn begin(&self, user: UserId, flow: Flow) -> Turn {
        let (state, turn) = match flow {
            Flow::SetTimezone => (
                FlowState::TimezoneContinent,
                Turn::Prompt {
                    text: CONTINENT_PROMPT.to_string(),
                    choices: timezones::continents(),
                },
            ),
            Flow::SetKettleTemp => (
                FlowState::KettleTemp { kettle: KETTLE_1 },
                Turn::Prompt {
                    text: TEMP_PROMPT.to_string(),
                    choices: Vec::new(),
                },
            ),
        };

        self.flows.write().await.insert(user, state);
        turn
    }

    /// Drop any active flow; true when there was one to drop.
    pub async fn cancel(&self, user: UserId) -> bool {
        self.flows.write().await.remove(&user).is_some()
    }

    /// Feed one message into the user's active flow. `None` when no flow is
    /// active. Every returned value except `Turn::Prompt` means the flow is
    /// over and its state is gone.
    pub async fn advance(&self, user: UserId, input: &str) -> Option<Turn> {
        let mut flows = self.flows.write().await;
        let state = flows.remove(&user)?;
        let input = input.trim();

        if input == CLOSE_LABEL || input == CANCEL_COMMAND {
            return Some(Turn::End {
                text: CANCEL_ACK.to_string(),
            });
        }

        let turn = match state {
            FlowState::TimezoneContinent => {
                if timezones::continents().iter().any(|c| *c == input) {
                    flows.insert(
                        user,
                        FlowState::TimezoneCity {
                            continent: input.to_string(),
                        },
                    );
                    Turn::Prompt {
                        text: CITY_PROMPT.to_string(),
                        choices: timezones::cities(input),
                    }
                } else {
                    // Anything but an offered continent is treated as cancel.
                    Turn::End {
                        text: CANCEL_ACK.to_string(),
                    }
                }
            }
            FlowState::TimezoneCity { continent } => {
                let zone = format!("{}/{}", continent, input);
                if timezones::zone_exists(&zone) {
                    Turn::ApplyTimezone { zone }
                } else {
                    Turn::End {
                        text: format!("🚫 Timezone does not exist: {}", zone),
                    }
                }
            }
            FlowState::KettleTemp { kettle } => match input.parse::<i64>() {
                Ok(temp) => Turn::ApplyKettleTemp { kettle, temp },
                Err(_) => Turn::End {
                    text: format!("🚫 \"{}\" is not a whole number, kettle temp unchanged", input),
                },
            },
        };

        Some(turn)
    }
}
