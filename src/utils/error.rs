use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Usage: {usage}")]
    Usage { usage: String },

    #[error("Permission denied: {action}")]
    PermissionDenied { action: String },

    #[error("User {user_id} already owns a federation in this guild")]
    FederationExists { user_id: String },

    #[error("No federation for user {user_id}")]
    FederationNotFound { user_id: String },

    #[error("{wrestler} is already signed with {federation}")]
    WrestlerTaken { wrestler: String, federation: String },

    #[error("{wrestler} is already on the roster")]
    AlreadyInRoster { wrestler: String },

    #[error("{wrestler} is not on the roster")]
    NotInRoster { wrestler: String },

    #[error("Belt '{belt}' already exists")]
    BeltExists { belt: String },

    #[error("Belt '{belt}' does not exist")]
    BeltNotFound { belt: String },

    #[error("Belt '{belt}' is vacant")]
    BeltVacant { belt: String },

    #[error("Show #{show_number} not found or already finalized")]
    ShowNotFound { show_number: u32 },

    #[error("Show #{show_number} has no votes")]
    NoVotes { show_number: u32 },

    #[error("Invalid vote: {reason}")]
    InvalidVote { reason: String },
}

impl BookingError {
    /// 使用者輸入造成的拒絕，回覆給使用者即可，不屬於系統錯誤
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            BookingError::IoError(_)
                | BookingError::SerializationError(_)
                | BookingError::CsvError(_)
                | BookingError::ConfigError { .. }
                | BookingError::InvalidConfigValueError { .. }
        )
    }

    /// Text shown back in the channel.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Usage { usage } => format!("Usage: `{}`", usage),
            BookingError::PermissionDenied { .. } => {
                "❌ This command is reserved for administrators.".to_string()
            }
            BookingError::FederationExists { .. } => {
                "You already have a federation! Use `!resetfed` to delete it.".to_string()
            }
            BookingError::FederationNotFound { .. } => {
                "You don't have a federation yet. Create one with `!createfed`.".to_string()
            }
            BookingError::WrestlerTaken {
                wrestler,
                federation,
            } => format!(
                "❌ **{}** is already signed exclusively with **{}**!",
                wrestler, federation
            ),
            BookingError::AlreadyInRoster { wrestler } => {
                format!("{} is already on your roster!", wrestler)
            }
            BookingError::NotInRoster { wrestler } => {
                format!("{} is not on your roster!", wrestler)
            }
            BookingError::BeltExists { .. } => {
                "This title already exists in your federation!".to_string()
            }
            BookingError::BeltNotFound { belt } => format!(
                "The title \"{}\" does not exist. Create it with `!createbelt {}`",
                belt, belt
            ),
            BookingError::BeltVacant { belt } => format!("The {} is vacant.", belt),
            BookingError::ShowNotFound { .. } => "Show not found or already finalized.".to_string(),
            BookingError::NoVotes { .. } => "No votes recorded.".to_string(),
            BookingError::InvalidVote { reason } => format!("❌ {}", reason),
            other if other.is_user_error() => format!("❌ {}", other),
            _ => "❌ Something went wrong on our side, try again later.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
