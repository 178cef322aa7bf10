//! NetBox DNS Domain Layer
pub mod config;
pub mod errors;
pub mod ipam_record;
pub mod names;
pub mod record_query;
pub mod view;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use ipam_record::{IpamRecord, ZoneRef};
pub use record_query::{RecordOwner, RecordQuery};
pub use view::{AddressPrefix, View};
pub use zone::Zone;
