//! Typed callback identifiers
//!
//! Button presses arrive as free-form strings in callback payloads. Parsing
//! them into a closed enum up front lets the dispatch match exhaustively,
//! so an unknown identifier is an explicit `Unrecognized` case instead of a
//! silently ignored fall-through.

/// Admin panel actions, carried as `admin_<suffix>` callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Delete the admin menu message
    Close,
    /// User/blocked/active counts
    Users,
    /// Transaction totals and completed amount
    Transactions,
    /// Overall user/transaction/admin counts
    Stats,
    /// Menu entry exists but the feature is not built yet
    ManageAdmins,
    /// Any other `admin_` suffix
    Unknown(String),
}

impl AdminAction {
    fn parse(suffix: &str) -> Self {
        match suffix {
            "close" => Self::Close,
            "users" => Self::Users,
            "transactions" => Self::Transactions,
            "stats" => Self::Stats,
            "manage_admins" => Self::ManageAdmins,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// All callback identifiers the bot can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    BuyMail,
    MyTransactions,
    Help,
    Admin(AdminAction),
    Unrecognized(String),
}

impl CallbackAction {
    /// Parse raw callback data into a typed action.
    pub fn parse(data: &str) -> Self {
        match data {
            "buy_mail" => Self::BuyMail,
            "my_transactions" => Self::MyTransactions,
            "help" => Self::Help,
            _ => match data.strip_prefix("admin_") {
                Some(suffix) => Self::Admin(AdminAction::parse(suffix)),
                None => Self::Unrecognized(data.to_string()),
            },
        }
    }
}
