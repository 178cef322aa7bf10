//! Conversion of NetBox records into wire-ready hickory records.

use hickory_proto::rr::rdata::{CNAME, MX, NS, PTR, SOA, SRV};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::txt::RDataParser;
use netbox_dns_domain::{names, DomainError, IpamRecord, Zone};
use std::str::FromStr;

/// TTL used when neither the record nor its zone carries one.
pub const DEFAULT_TTL: u32 = 3600;

pub struct RecordConverter;

impl RecordConverter {
    pub fn to_records(records: &[IpamRecord], zone: Option<&Zone>) -> Result<Vec<Record>, DomainError> {
        records.iter().map(|r| Self::to_record(r, zone)).collect()
    }

    /// Relative names in the value are completed with the record's own zone,
    /// or with `zone` when the record does not say which zone it lives in.
    pub fn to_record(record: &IpamRecord, zone: Option<&Zone>) -> Result<Record, DomainError> {
        let record_type = parse_record_type(&record.record_type)?;

        let invalid = |reason: String| DomainError::InvalidRecordData {
            name: record.fqdn.to_string(),
            record_type: record.record_type.to_string(),
            reason,
        };

        let origin = record
            .zone_name()
            .or_else(|| zone.map(|z| z.name.as_ref()))
            .unwrap_or("");
        let origin = parse_name(&names::to_fqdn(origin)).map_err(|e| invalid(e.to_string()))?;
        let owner = parse_name(&names::to_fqdn(&record.fqdn)).map_err(|e| invalid(e.to_string()))?;

        let rdata = RData::try_from_str(record_type, &record.value)
            .map_err(|e| invalid(e.to_string()))?;
        let rdata = qualify_rdata(rdata, &origin).map_err(|e| invalid(e.to_string()))?;

        let ttl = record
            .ttl
            .or_else(|| zone.and_then(|z| z.default_ttl))
            .unwrap_or(DEFAULT_TTL);

        Ok(Record::from_rdata(owner, ttl, rdata))
    }
}

fn parse_record_type(mnemonic: &str) -> Result<RecordType, DomainError> {
    if mnemonic.is_empty() || !mnemonic.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidRecordType(mnemonic.to_string()));
    }
    RecordType::from_str(&mnemonic.to_ascii_uppercase())
        .map_err(|_| DomainError::InvalidRecordType(mnemonic.to_string()))
}

fn parse_name(name: &str) -> Result<Name, hickory_proto::ProtoError> {
    if name.is_ascii() {
        Name::from_ascii(name)
    } else {
        Name::from_utf8(name)
    }
}

fn qualify(name: &Name, origin: &Name) -> Result<Name, hickory_proto::ProtoError> {
    if name.is_fqdn() {
        return Ok(name.clone());
    }
    name.clone().append_domain(origin)
}

/// Completes every relative name embedded in `rdata` with `origin`.
fn qualify_rdata(rdata: RData, origin: &Name) -> Result<RData, hickory_proto::ProtoError> {
    let rdata = match rdata {
        RData::CNAME(cname) => RData::CNAME(CNAME(qualify(&cname.0, origin)?)),
        RData::NS(ns) => RData::NS(NS(qualify(&ns.0, origin)?)),
        RData::PTR(ptr) => RData::PTR(PTR(qualify(&ptr.0, origin)?)),
        RData::MX(mx) => RData::MX(MX::new(mx.preference(), qualify(mx.exchange(), origin)?)),
        RData::SRV(srv) => RData::SRV(SRV::new(
            srv.priority(),
            srv.weight(),
            srv.port(),
            qualify(srv.target(), origin)?,
        )),
        RData::SOA(soa) => RData::SOA(SOA::new(
            qualify(soa.mname(), origin)?,
            qualify(soa.rname(), origin)?,
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum(),
        )),
        other => other,
    };
    Ok(rdata)
}

/// The name a record points at, for the record kinds that carry one.
pub fn target_name(record: &Record) -> Option<&Name> {
    match record.data() {
        RData::NS(ns) => Some(&ns.0),
        RData::CNAME(cname) => Some(&cname.0),
        RData::MX(mx) => Some(mx.exchange()),
        RData::SRV(srv) => Some(srv.target()),
        _ => None,
    }
}
