pub mod server;

pub use server::{is_unsupported_query, DnsServerHandler, Reply};
