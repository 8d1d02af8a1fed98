//! Wire-format queries built with `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use ferrous_sweep_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// One encoded question, ready to be sent, and the id its reply must carry.
#[derive(Debug, Clone)]
pub struct OutgoingQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

impl OutgoingQuery {
    /// Recursive IN-class query for `name` with a random id.
    pub fn new(name: &str, record_type: RecordType) -> Result<Self, DomainError> {
        let qname = Name::from_str(name)
            .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))?;

        let mut question = Query::new();
        question
            .set_name(qname)
            .set_query_type(RecordTypeMapper::to_hickory(record_type))
            .set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);

        let mut bytes = Vec::with_capacity(64);
        message
            .emit(&mut BinEncoder::new(&mut bytes))
            .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))?;

        Ok(Self { id, bytes })
    }
}
