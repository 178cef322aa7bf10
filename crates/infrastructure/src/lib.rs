//! NetBox DNS Infrastructure Layer
//!
//! Adapters around the resolution engine: the NetBox REST client behind the
//! `IpamSource` port, its caching decorator, and the hickory request handler.
pub mod dns;
pub mod netbox;
