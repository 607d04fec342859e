mod character_match;
mod detector;
mod domain_reader;
mod input_reader;
mod state;

pub use detector::UrlDetector;
