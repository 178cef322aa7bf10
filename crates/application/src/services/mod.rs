mod glue_resolver;
mod record_converter;
mod record_resolver;
mod zone_matcher;

pub use glue_resolver::{glue_types, GlueResolver};
pub use record_converter::{target_name, RecordConverter, DEFAULT_TTL};
pub use record_resolver::{RecordResolver, MAX_CNAME_HOPS};
pub use zone_matcher::{ZoneMatch, ZoneMatcher};
