//! Business logic services for the STK Manager server

pub mod records;
pub mod reporting;

pub use records::RecordService;
pub use reporting::ReportingService;
