#![allow(dead_code)]
//! Hand-rolled wire encoding for the mock servers. Names are never
//! compressed, which keeps the byte layout easy to follow.

use std::net::Ipv4Addr;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NOTAUTH: u8 = 9;
pub const RCODE_REFUSED: u8 = 5;

#[derive(Debug, Clone)]
pub struct WireRecord {
    owner: String,
    rtype: u16,
    ttl: u32,
    rdata: Vec<u8>,
}

impl WireRecord {
    pub fn a(owner: &str, addr: Ipv4Addr) -> Self {
        Self {
            owner: owner.to_string(),
            rtype: 1,
            ttl: 300,
            rdata: addr.octets().to_vec(),
        }
    }

    pub fn ns(owner: &str, host: &str) -> Self {
        Self {
            owner: owner.to_string(),
            rtype: 2,
            ttl: 3600,
            rdata: encode_name(host),
        }
    }

    pub fn soa(owner: &str) -> Self {
        let mut rdata = encode_name(&format!("ns.{}", owner.trim_start_matches('.')));
        rdata.extend(encode_name(&format!("hostmaster.{}", owner.trim_start_matches('.'))));
        for value in [2024010501u32, 7200, 3600, 1209600, 3600] {
            rdata.extend_from_slice(&value.to_be_bytes());
        }
        Self {
            owner: owner.to_string(),
            rtype: 6,
            ttl: 3600,
            rdata,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend(encode_name(&self.owner));
        buf.extend_from_slice(&self.rtype.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes()); // IN
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&(self.rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.rdata);
    }
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Response message: QR and AA set, no question, `records` as answers.
pub fn response(id: u16, rcode: u8, truncated: bool, records: &[WireRecord]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.push(0x84 | if truncated { 0x02 } else { 0x00 });
    buf.push(0x80 | (rcode & 0x0f));
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&(records.len() as u16).to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    for record in records {
        record.encode(&mut buf);
    }
    buf
}

/// Message ID and question name of a query, or `None` if it is too short.
pub fn parse_query(query: &[u8]) -> Option<(u16, String)> {
    if query.len() < 13 {
        return None;
    }
    let id = u16::from_be_bytes([query[0], query[1]]);

    let mut name = String::new();
    let mut pos = 12;
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        name.push_str(std::str::from_utf8(label).ok()?);
        name.push('.');
        pos += len;
    }
    if name.is_empty() {
        name.push('.');
    }
    Some((id, name))
}
