use super::record_type_map::RecordTypeMapper;
use ferrous_sweep_application::ports::{ExchangeOutcome, ExchangedRecord};
use ferrous_sweep_domain::lookup::trim_root;
use ferrous_sweep_domain::{DomainError, RawSections};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a reply into status, interpreted records and raw text.
    pub fn parse(response_bytes: &[u8]) -> Result<ExchangeOutcome, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let status = Self::rcode_to_status(message.response_code());
        let answers: Vec<ExchangedRecord> =
            message.answers().iter().filter_map(Self::convert).collect();
        let authority: Vec<ExchangedRecord> = message
            .name_servers()
            .iter()
            .filter_map(Self::convert)
            .collect();

        let raw = RawSections {
            question: message
                .queries()
                .iter()
                .map(|q| zone_text(&q.to_string()))
                .collect(),
            answer: message.answers().iter().map(record_text).collect(),
            authority: message.name_servers().iter().map(record_text).collect(),
            additional: message.additionals().iter().map(record_text).collect(),
        };

        debug!(
            id = message.id(),
            status = %status,
            answers = answers.len(),
            authority = authority.len(),
            "DNS response parsed"
        );

        Ok(ExchangeOutcome {
            status,
            answers,
            authority,
            raw,
        })
    }

    /// Record reduced to owner, type, data and TTL. Types a sweep does not
    /// interpret yield `None`.
    fn convert(record: &Record) -> Option<ExchangedRecord> {
        let record_type = RecordTypeMapper::from_hickory(record.record_type())?;

        let data = match record.data() {
            RData::A(a) => a.0.to_string(),
            RData::AAAA(aaaa) => aaaa.0.to_string(),
            RData::CNAME(cname) => target(&cname.0.to_utf8()),
            RData::NS(ns) => target(&ns.0.to_utf8()),
            RData::PTR(ptr) => target(&ptr.0.to_utf8()),
            RData::MX(mx) => target(&mx.exchange().to_utf8()),
            RData::SOA(soa) => target(&soa.mname().to_utf8()),
            RData::TXT(txt) => txt.to_string(),
            _ => return None,
        };

        Some(ExchangedRecord {
            name: record.name().to_utf8(),
            record_type,
            data,
            ttl: record.ttl(),
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> String {
        let status = match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            other => return format!("RCODE{}", u16::from(other)),
        };
        status.to_string()
    }
}

fn target(name: &str) -> String {
    trim_root(name).to_string()
}

fn record_text(record: &Record) -> String {
    zone_text(&record.to_string())
}

fn zone_text(text: &str) -> String {
    text.replace('\t', " ")
}
