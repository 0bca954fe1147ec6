/// Access tier gating command availability. Roles are granted through the
/// controller's web interface; this bot only ever writes `guest` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Decode a stored role string. Anything unrecognized counts as `guest`,
    /// so a mangled row can never grant access.
    pub fn from_db(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Guest,
        }
    }
}
