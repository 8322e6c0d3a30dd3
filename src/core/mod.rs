pub mod config;
pub mod error;
pub mod types;

pub use config::{DataFiles, GeneratorConfig, RootPerson};
pub use error::{DataLoadError, DataLoadErrorKind, LookupError, Result, TreeError};
pub use types::{Decade, Gender, PersonId};
