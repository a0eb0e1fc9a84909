use crate::utils::error::Result;
use chrono::{DateTime, Utc};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Source of "now" for every timestamp the bot writes or scores against.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider: Send + Sync {
    fn command_prefix(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn logo_dir(&self) -> Option<&str>;
    fn default_guild(&self) -> &str;
    fn default_user(&self) -> &str;
    fn admins(&self) -> &[String];
    fn booker_role(&self) -> Option<&str>;
}
