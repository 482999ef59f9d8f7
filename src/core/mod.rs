pub mod errors;
pub mod http;
pub mod models;
pub mod tasks;
pub mod utils;

pub use errors::StatsError;
pub use models::{
    ActivityEvent,
    AddCounts,
    Credentials,
    TermRecord,
};
