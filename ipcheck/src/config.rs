use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use ipcheck_common::Ipv4Fields;
use ipcheck_common::net::Verdict;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Field values of one ipv4 header as written in a fixture file.
/// Anything omitted is zero, except the checksum which is computed
/// when left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeaderSpec {
    /// IP version, 4 bits
    pub version: u8,
    /// Header length in 32-bit words, 4 bits
    pub ihl: u8,
    /// Differentiated services byte (dscp + ecn)
    pub diffserv: u8,
    /// Total packet length in bytes
    pub total_len: u16,
    pub identification: u16,
    /// Fragmentation flags, 3 bits
    pub flags: u8,
    /// Fragment offset in 8 byte units, 13 bits
    pub frag_offset: u16,
    pub ttl: u8,
    /// IP protocol number e.g. 6 for tcp, 17 for udp
    pub protocol: u8,
    /// Transmitted header checksum. When absent the correct
    /// value is computed from the other fields
    pub checksum: Option<u16>,
    /// Dotted ipv4 source address e.g. 10.0.0.1
    pub src_addr: String,
    /// Dotted ipv4 destination address e.g. 10.0.0.2
    pub dst_addr: String,
}

impl HeaderSpec {
    /// Range check the fields and build the header record. This is the
    /// producer side validation the checksum verifier itself never does.
    pub fn to_fields(&self) -> Result<Ipv4Fields> {
        if self.version > 0xf {
            bail!("version {} does not fit in 4 bits", self.version);
        }
        if self.ihl > 0xf {
            bail!("ihl {} does not fit in 4 bits", self.ihl);
        }
        if self.flags > 0x7 {
            bail!("flags {} do not fit in 3 bits", self.flags);
        }
        if self.frag_offset > 0x1fff {
            bail!("fragment offset {} does not fit in 13 bits", self.frag_offset);
        }

        let fields = Ipv4Fields {
            version: self.version,
            ihl: self.ihl,
            diffserv: self.diffserv,
            total_len: self.total_len,
            identification: self.identification,
            flags: self.flags,
            frag_offset: self.frag_offset,
            ttl: self.ttl,
            protocol: self.protocol,
            hdr_checksum: self.checksum.unwrap_or_default(),
            src_addr: parse_addr(&self.src_addr)?,
            dst_addr: parse_addr(&self.dst_addr)?,
        };

        Ok(match self.checksum {
            Some(_) => fields,
            None => fields.with_checksum(),
        })
    }
}

fn parse_addr(addr: &str) -> Result<u32> {
    addr.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| anyhow!("Invalid ipv4 address: {:?}", addr))
}

/// A single checksum test case
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FixtureCase {
    /// Unique name used in reports
    pub name: String,
    pub header: HeaderSpec,
    /// Expected verdict of the checksum verifier,
    /// defaults to valid
    #[serde(default)]
    pub expect: Verdict,
}

/// The user facing fixture file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FixtureConfig {
    /// Optional name of this fixture set, shown in logs
    pub name: Option<String>,
    /// Cases to run, at least one
    pub cases: Vec<FixtureCase>,
}

impl FixtureConfig {
    pub fn load(path: PathBuf) -> Result<FixtureConfig> {
        let config = Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()
            .with_context(|| format!("Failed to read fixture file {}", path.display()))?
            .try_deserialize::<FixtureConfig>()?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cases.is_empty() {
            bail!("At least one fixture case must be specified");
        }

        let mut names = HashSet::new();
        for case in &self.cases {
            if !names.insert(case.name.as_str()) {
                bail!("Duplicate fixture case name: {}", case.name);
            }

            case.header
                .to_fields()
                .with_context(|| format!("Invalid header in case {}", case.name))?;
        }

        Ok(())
    }
}
