pub mod accessors;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;

pub use accessors::{AccessorSet, Location};
pub use error::{AccessError, ErrorKind, MappingError, TableError};
pub use fhir_model;
pub use mapper::{map, Mapper, OutputRecord, TargetField};
