// Models module - charettes and the records nested under them

pub mod analysis;
pub mod charette;
pub mod fields;
pub mod message;
pub mod participant;
pub mod report;
pub mod timestamp;

pub use analysis::AnalysisResult;
pub use charette::{Charette, CharettePatch};
pub use fields::{ChildRecord, Fields};
pub use message::Message;
pub use participant::Participant;
pub use report::Report;
pub use timestamp::Timestamp;
