pub mod explorer;
pub mod export;
pub mod report;
pub mod search;
pub mod summary;

pub use crate::domain::model::{VoteResource, VotingSummary};
pub use crate::domain::ports::{ConfigProvider, Storage, VoteSource};
pub use crate::utils::error::Result;
