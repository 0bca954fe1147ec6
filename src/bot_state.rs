use crate::brewery::BreweryClient;
use crate::database::Database;
use crate::dialogs::Dialogs;

/// Everything a handler needs, cloned into the dispatcher's dependency map.
#[derive(Clone)]
pub struct BotState {
    db: Database,
    brewery: BreweryClient,
    dialogs: Dialogs,
}

impl BotState {
    pub fn new(db: Database, brewery: BreweryClient) -> Self {
        Self {
            db,
            brewery,
            dialogs: Dialogs::new(),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn brewery(&self) -> &BreweryClient {
        &self.brewery
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.dialogs
    }
}
