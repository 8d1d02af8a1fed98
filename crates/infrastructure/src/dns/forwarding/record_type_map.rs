use ferrous_sweep_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::TXT => HickoryRecordType::TXT,
        }
    }

    /// Convert hickory RecordType → domain RecordType (for parsed replies)
    ///
    /// Returns `None` for types a sweep does not interpret (RRSIG, OPT, ...).
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::MX => Some(RecordType::MX),
            HickoryRecordType::PTR => Some(RecordType::PTR),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::SOA => Some(RecordType::SOA),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            _ => None,
        }
    }
}
