pub mod aggregator;
pub mod extractor;
pub mod feed;
pub mod ics;
pub mod orchestrator;
pub mod title;
