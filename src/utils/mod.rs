pub mod date_splitter;

pub use date_splitter::DateSplitter;
