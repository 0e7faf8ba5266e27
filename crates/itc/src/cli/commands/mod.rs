//! CLI commands

mod apps;
mod cache;
mod completions;
mod init;
mod locale;
mod login;
mod submit;
mod trains;
mod version;

pub use apps::AppsCommand;
pub use cache::CacheCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use locale::LocaleCommand;
pub use login::LoginCommand;
pub use submit::SubmitCommand;
pub use trains::TrainsCommand;
pub use version::VersionCommand;
