pub mod genius;

pub use genius::GeniusExtractor;
