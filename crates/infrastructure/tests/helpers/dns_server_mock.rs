#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_AAAA: u16 = 28;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;

#[derive(Debug, Clone)]
pub enum MockRdata {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// NS, CNAME or PTR target.
    Name(String),
    /// Primary nameserver and responsible mailbox.
    Soa(String, String),
}

#[derive(Debug, Clone)]
pub struct MockRecord {
    pub name: String,
    pub rtype: u16,
    pub ttl: u32,
    pub rdata: MockRdata,
}

impl MockRecord {
    pub fn a(name: &str, ip: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_A,
            ttl: 300,
            rdata: MockRdata::A(ip.parse().unwrap()),
        }
    }

    pub fn aaaa(name: &str, ip: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_AAAA,
            ttl: 300,
            rdata: MockRdata::Aaaa(ip.parse().unwrap()),
        }
    }

    pub fn cname(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_CNAME,
            ttl: 300,
            rdata: MockRdata::Name(target.to_string()),
        }
    }

    pub fn ns(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_NS,
            ttl: 3600,
            rdata: MockRdata::Name(target.to_string()),
        }
    }

    pub fn soa(name: &str, mname: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_SOA,
            ttl: 3600,
            rdata: MockRdata::Soa(mname.to_string(), format!("hostmaster.{}", name)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAnswer {
    pub rcode: u8,
    pub answers: Vec<MockRecord>,
    pub authority: Vec<MockRecord>,
}

impl MockAnswer {
    pub fn records(answers: Vec<MockRecord>) -> Self {
        Self {
            rcode: RCODE_NOERROR,
            answers,
            authority: Vec::new(),
        }
    }

    pub fn authority(authority: Vec<MockRecord>) -> Self {
        Self {
            rcode: RCODE_NOERROR,
            answers: Vec::new(),
            authority,
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        Self {
            rcode,
            ..Default::default()
        }
    }
}

/// Canned answers keyed by lower-case name (with trailing dot) and type.
/// Unknown names get NXDOMAIN.
#[derive(Debug, Clone, Default)]
pub struct MockZone {
    answers: HashMap<(String, u16), MockAnswer>,
    silent: HashSet<String>,
    decoy_first: bool,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, qtype: u16, answer: MockAnswer) -> Self {
        self.answers.insert((name.to_ascii_lowercase(), qtype), answer);
        self
    }

    /// Never answers queries for `name`.
    pub fn with_silent(mut self, name: &str) -> Self {
        self.silent.insert(name.to_ascii_lowercase());
        self
    }

    /// Sends a reply with a wrong ID before every real reply.
    pub fn with_decoy(mut self) -> Self {
        self.decoy_first = true;
        self
    }
}

/// Minimal authoritative-looking UDP server with hand-built wire replies.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Starts on an ephemeral port of 127.0.0.1.
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let zone = Arc::new(zone);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Some((name, qtype, question_end)) = parse_question(&buf[..len]) else {
                            continue;
                        };
                        if zone.silent.contains(&name) {
                            continue;
                        }

                        let answer = zone
                            .answers
                            .get(&(name, qtype))
                            .cloned()
                            .unwrap_or_else(|| MockAnswer::rcode(RCODE_NXDOMAIN));
                        let response = build_response(&buf[..question_end], &answer);

                        if zone.decoy_first {
                            let mut decoy = response.clone();
                            decoy[0] ^= 0xff;
                            let _ = socket.send_to(&decoy, peer).await;
                        }
                        let _ = socket.send_to(&response, peer).await;
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Returns the lower-cased query name, the query type, and the offset
/// just past the question section.
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    if query.len() < 12 {
        return None;
    }

    let mut pos = 12;
    let mut name = String::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        name.push_str(&String::from_utf8_lossy(label).to_ascii_lowercase());
        name.push('.');
        pos += len;
    }
    if name.is_empty() {
        name.push('.');
    }

    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((name, qtype, pos + 4))
}

fn encode_name(buf: &mut Vec<u8>, name: &str) {
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}

fn encode_record(buf: &mut Vec<u8>, record: &MockRecord) {
    encode_name(buf, &record.name);
    buf.extend_from_slice(&record.rtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]); // Class IN
    buf.extend_from_slice(&record.ttl.to_be_bytes());

    let mut rdata = Vec::new();
    match &record.rdata {
        MockRdata::A(ip) => rdata.extend_from_slice(&ip.octets()),
        MockRdata::Aaaa(ip) => rdata.extend_from_slice(&ip.octets()),
        MockRdata::Name(target) => encode_name(&mut rdata, target),
        MockRdata::Soa(mname, rname) => {
            encode_name(&mut rdata, mname);
            encode_name(&mut rdata, rname);
            for value in [2024010101u32, 7200, 3600, 1209600, 300] {
                rdata.extend_from_slice(&value.to_be_bytes());
            }
        }
    }

    buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    buf.extend_from_slice(&rdata);
}

/// `question` is the query up to the end of its question section.
pub fn build_response(question: &[u8], answer: &MockAnswer) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&question[0..2]); // Transaction ID
    response.push(0x81); // QR=1, Opcode=0, AA=0, TC=0, RD=1
    response.push(0x80 | (answer.rcode & 0x0f)); // RA=1, RCODE
    response.extend_from_slice(&[0x00, 0x01]); // Questions
    response.extend_from_slice(&(answer.answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&(answer.authority.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]); // Additional

    response.extend_from_slice(&question[12..]);

    for record in &answer.answers {
        encode_record(&mut response, record);
    }
    for record in &answer.authority {
        encode_record(&mut response, record);
    }

    response
}
