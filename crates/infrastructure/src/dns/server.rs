use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use netbox_dns_application::use_cases::ResolveQueryUseCase;
use netbox_dns_application::{DnsRequest, LookupResponse, LookupResult};
use netbox_dns_domain::config::DnsConfig;
use netbox_dns_domain::{names, DomainError};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Code, flags and sections written back for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub code: ResponseCode,
    pub authoritative: bool,
    pub sections: LookupResponse,
}

impl Reply {
    pub fn error(code: ResponseCode) -> Self {
        Self {
            code,
            authoritative: false,
            sections: LookupResponse::default(),
        }
    }

    /// `falls_through` is the fall-through policy verdict for the query
    /// name. With no next handler behind this server, a name handed on is
    /// refused.
    pub fn from_outcome(outcome: Result<LookupResponse, DomainError>, falls_through: bool) -> Self {
        let sections = match outcome {
            Ok(sections) => sections,
            Err(_) => return Self::error(ResponseCode::ServFail),
        };

        match sections.result {
            LookupResult::NameError if falls_through => Self::error(ResponseCode::Refused),
            LookupResult::NameError => Self {
                code: ResponseCode::NXDomain,
                authoritative: true,
                sections,
            },
            LookupResult::Success | LookupResult::Delegation => Self {
                code: ResponseCode::NoError,
                authoritative: sections.is_authoritative(),
                sections,
            },
        }
    }
}

/// Query types answered with NOTIMP instead of a lookup.
pub fn is_unsupported_query(record_type: RecordType) -> bool {
    matches!(
        record_type,
        RecordType::AXFR | RecordType::IXFR | RecordType::ANY | RecordType::OPT
    )
}

pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
    dns: DnsConfig,
    shutdown: CancellationToken,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, dns: DnsConfig, shutdown: CancellationToken) -> Self {
        Self {
            use_case,
            dns,
            shutdown,
        }
    }

    /// `None` once shutdown has begun; nothing is written in that case.
    async fn resolve(&self, qname: &str, record_type: RecordType, client_ip: IpAddr) -> Option<Reply> {
        let falls_through = self.dns.fallthrough.through(qname);

        if self.dns.responding_zone(qname).is_none() {
            debug!(domain = %qname, "Name outside served zones");
            return Some(Reply::from_outcome(Ok(LookupResponse::name_error()), falls_through));
        }

        let request = DnsRequest::new(qname, record_type, client_ip);
        let outcome = tokio::select! {
            _ = self.shutdown.cancelled() => return None,
            outcome = self.use_case.execute(&request) => outcome,
        };

        match &outcome {
            Ok(response) if response.result == LookupResult::NameError && !falls_through => {
                debug!(domain = %qname, "No records, fallthrough not enabled");
            }
            Err(DomainError::Unresolvable(_)) => {
                warn!(domain = %qname, "Matched zones produced no answer");
            }
            Err(e) => {
                error!(domain = %qname, error = %e, "Query resolution failed");
            }
            Ok(_) => {}
        }

        Some(Reply::from_outcome(outcome, falls_through))
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_reply(request, &mut response_handle, Reply::error(ResponseCode::FormErr))
                    .await;
            }
        };

        let query = &request_info.query;
        let qname = names::normalize(&query.name().to_utf8()).to_string();
        let record_type = query.query_type();
        let client_ip = client_address(request.src());

        info!(domain = %qname, record_type = ?record_type, client = %client_ip, "DNS query received");

        if is_unsupported_query(record_type) {
            warn!(record_type = ?record_type, "Unsupported query type");
            return send_reply(request, &mut response_handle, Reply::error(ResponseCode::NotImp))
                .await;
        }

        let Some(reply) = self.resolve(&qname, record_type, client_ip).await else {
            debug!(domain = %qname, "Query abandoned on shutdown");
            return ResponseInfo::from(*request.header());
        };

        send_reply(request, &mut response_handle, reply).await
    }
}

/// Dual-stack listeners report IPv4 clients as `::ffff:a.b.c.d`.
fn client_address(src: SocketAddr) -> IpAddr {
    src.ip().to_canonical()
}

async fn send_reply<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    reply: Reply,
) -> ResponseInfo {
    debug!(
        code = ?reply.code,
        answers = reply.sections.answer.len(),
        authority = reply.sections.authority.len(),
        additional = reply.sections.additional.len(),
        "Sending response"
    );

    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(reply.code);
    header.set_authoritative(reply.authoritative);

    let sections = &reply.sections;
    let response = builder.build(
        header,
        sections.answer.iter(),
        sections.authority.iter(),
        std::iter::empty::<&Record>(),
        sections.additional.iter(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}
