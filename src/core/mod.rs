pub mod error;
pub mod extractor;
pub mod http;
pub mod metadata;
pub mod selector;

pub use error::{Result, ScrapeError};
pub use extractor::LyricsSite;
pub use http::{HttpClient, Page, Transport};
pub use metadata::{TrackInfo, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE};
pub use selector::{AttrMatcher, Strategy};
