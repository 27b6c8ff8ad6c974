pub mod extractor;
pub mod lookup;
pub mod matcher;
pub mod reconciler;

pub use lookup::{fetch_many, FetchOutcome};
pub use matcher::classify;
pub use reconciler::Reconciler;
