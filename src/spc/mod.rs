mod collapse;
mod compliance;
pub mod dates;
mod duration;
mod exceptions;
pub mod ingest;
mod limits;
pub mod pipeline;
pub mod query;
pub mod records;
mod reconcile;
mod traces;

pub use compliance::ComplianceRecord;
pub use exceptions::ProcessException;
pub use traces::TraceGroups;
