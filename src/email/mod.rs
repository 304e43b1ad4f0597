/// Email payload normalization
pub mod extractor;
