pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod source;

pub use api::{HistoryQuery, JudgeApi};
pub use config::{ClientConfig, JudgeConfig, PollConfig};
pub use error::ClientError;
pub use poller::{PollEvent, PollOptions, SubmissionPoller};
pub use source::SnapshotSource;
