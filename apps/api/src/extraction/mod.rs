// Job-description extraction: normalize page text, score it, pick the best block.
// Runs synchronously; parsed HTML never lives across an await.

pub mod extractor;
pub mod handlers;
pub mod inspector;
pub mod normalize;
pub mod relevance;
pub mod sites;
