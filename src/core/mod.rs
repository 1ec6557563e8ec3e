// Core algorithm exports
pub mod matcher;
pub mod pairs;
pub mod profiles;
pub mod scoring;

pub use matcher::{Matcher, SuggestionBatch};
pub use pairs::{PairHistory, PairKey, UnorderedPairs};
pub use profiles::ProfileSet;
pub use scoring::score_pair;
