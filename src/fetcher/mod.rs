pub mod oxylabs;
pub mod traits;
pub mod types;

pub use oxylabs::{Credentials, OxylabsFetcher};
pub use traits::ListingFetcher;
pub use types::SearchParams;
