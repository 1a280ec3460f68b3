pub mod logging;
pub mod error;
pub mod util;
pub mod tokenizer;
pub mod freq_table;
pub mod freq_list;
pub mod report;
pub mod aggregator;
pub mod directory;

pub use crate::aggregator::{Aggregator, Document, RunSummary, State, UnreadablePolicy};
pub use crate::error::CountError;
pub use crate::freq_list::{FrequencyEntry, FrequencyList};
pub use crate::freq_table::FrequencyTable;
pub use crate::tokenizer::Word;
