// Keyword Trends: period-based keyword frequency analysis for patents and papers.
//
// This is the library root. Each module corresponds to a stage of the
// text-to-frequency pipeline or to the comparison that runs on top of it.

pub mod compare;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod output;
pub mod pipeline;
pub mod text;
