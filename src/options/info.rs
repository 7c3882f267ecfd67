//! INFO section selector.

use bytes::Bytes;

/// A section of `INFO` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// General information about the Redis server
    Server,
    /// Client connections section
    Clients,
    /// Memory consumption related information
    Memory,
    /// RDB and AOF related information
    Persistence,
    /// General statistics
    Stats,
    /// Master/replica replication information
    Replication,
    /// CPU consumption statistics
    Cpu,
    /// Redis command statistics
    CommandStats,
    /// Redis command latency percentile distribution statistics
    LatencyStats,
    /// Redis Sentinel section (only applicable to Sentinel instances)
    Sentinel,
    /// Redis Cluster section
    Cluster,
    /// Modules section
    Modules,
    /// Database related statistics
    Keyspace,
    /// Redis error statistics
    ErrorStats,
    /// All sections (excluding module generated ones)
    All,
    /// Only the default set of sections
    Default,
    /// All sections including modules
    Everything,
}

impl Section {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Clients => "clients",
            Self::Memory => "memory",
            Self::Persistence => "persistence",
            Self::Stats => "stats",
            Self::Replication => "replication",
            Self::Cpu => "cpu",
            Self::CommandStats => "commandstats",
            Self::LatencyStats => "latencystats",
            Self::Sentinel => "sentinel",
            Self::Cluster => "cluster",
            Self::Modules => "modules",
            Self::Keyspace => "keyspace",
            Self::ErrorStats => "errorstats",
            Self::All => "all",
            Self::Default => "default",
            Self::Everything => "everything",
        }
    }
}

/// Optional arguments for `INFO`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoOptions {
    sections: Vec<Section>,
}

impl InfoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more section. Duplicates are kept.
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// One token per requested section, in the order they were added.
    pub fn to_args(&self) -> Vec<Bytes> {
        self.sections
            .iter()
            .map(|s| Bytes::from_static(s.token().as_bytes()))
            .collect()
    }
}

impl FromIterator<Section> for InfoOptions {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
