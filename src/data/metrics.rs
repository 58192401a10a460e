use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ProcessRecord;
use crate::error::{Result, WebtopError};

/// The six endpoints polled on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    System,
    Networks,
    Processes,
    Gpu,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::System,
        MetricKind::Networks,
        MetricKind::Processes,
        MetricKind::Gpu,
    ];

    pub fn path(self) -> &'static str {
        match self {
            MetricKind::Cpu => "/cpu",
            MetricKind::Memory => "/mem",
            MetricKind::System => "/system",
            MetricKind::Networks => "/networks",
            MetricKind::Processes => "/proc",
            MetricKind::Gpu => "/gpu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "Memory",
            MetricKind::System => "System",
            MetricKind::Networks => "Network",
            MetricKind::Processes => "Processes",
            MetricKind::Gpu => "GPU",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CpuStats {
    pub cpu_load_average: Option<f64>,
    pub cpu_product_name: Option<String>,
    pub cpu_usage: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemoryStats {
    pub total_memory: u64,
    pub used_memory: u64,
    pub free_memory: u64,
    pub available_memory: u64,
    pub total_swap: u64,
    pub used_swap: u64,
    pub free_swap: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub name: Option<String>,
    pub kernel_version: Option<String>,
    pub os_version: Option<String>,
    pub host_name: Option<String>,
    pub long_os_version: Option<String>,
    pub distribution_id: Option<String>,
    pub uptime: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkInterface {
    pub interface_name: String,
    pub received: u64,
    pub transmitted: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GpuStats {
    pub name: Option<String>,
    pub memory: Option<u64>,
    pub temperature: Option<f64>,
}

#[derive(Deserialize)]
struct NetworksBody {
    #[serde(default)]
    networks: Option<Vec<NetworkInterface>>,
}

#[derive(Deserialize)]
struct ProcessesBody {
    #[serde(default)]
    processes: Option<Vec<ProcessRecord>>,
}

#[derive(Deserialize)]
struct GpusBody {
    #[serde(default)]
    gpus: Option<Vec<GpuStats>>,
}

/// A decoded response body. List payloads are `None` when the server left
/// the list out, which the panels treat as "nothing to draw this tick".
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Cpu(CpuStats),
    Memory(MemoryStats),
    System(SystemInfo),
    Networks(Option<Vec<NetworkInterface>>),
    Processes(Option<Vec<ProcessRecord>>),
    Gpu(Option<Vec<GpuStats>>),
}

impl Payload {
    pub fn decode(kind: MetricKind, body: &[u8]) -> Result<Self> {
        Ok(match kind {
            MetricKind::Cpu => Payload::Cpu(decode_body(kind, body)?),
            MetricKind::Memory => Payload::Memory(decode_body(kind, body)?),
            MetricKind::System => Payload::System(decode_body(kind, body)?),
            MetricKind::Networks => {
                Payload::Networks(decode_body::<NetworksBody>(kind, body)?.networks)
            }
            MetricKind::Processes => {
                Payload::Processes(decode_body::<ProcessesBody>(kind, body)?.processes)
            }
            MetricKind::Gpu => Payload::Gpu(decode_body::<GpusBody>(kind, body)?.gpus),
        })
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Payload::Cpu(_) => MetricKind::Cpu,
            Payload::Memory(_) => MetricKind::Memory,
            Payload::System(_) => MetricKind::System,
            Payload::Networks(_) => MetricKind::Networks,
            Payload::Processes(_) => MetricKind::Processes,
            Payload::Gpu(_) => MetricKind::Gpu,
        }
    }
}

fn decode_body<T: DeserializeOwned>(kind: MetricKind, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| WebtopError::decode(kind.path(), err.to_string()))
}
