use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One process as reported by the `/proc` endpoint.
///
/// Every field is optional on the wire, and a value of the wrong type reads
/// as missing instead of failing the whole list. A record with holes still
/// renders; the table shows a placeholder for whatever is missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessRecord {
    #[serde(deserialize_with = "deserialize_pid")]
    pub pid: Option<u32>,
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_f64")]
    pub cpu_usage: Option<f64>,
    #[serde(deserialize_with = "deserialize_u64")]
    pub memory: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_u64")]
    pub run_time: Option<u64>,
}

impl ProcessRecord {
    pub fn new(pid: u32) -> Self {
        Self {
            pid: Some(pid),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_cpu(mut self, cpu_usage: f64) -> Self {
        self.cpu_usage = Some(cpu_usage);
        self
    }

    pub fn with_memory(mut self, memory: u64) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_run_time(mut self, run_time: u64) -> Self {
        self.run_time = Some(run_time);
        self
    }
}

fn lenient<'de, D, T>(
    deserializer: D,
    read: impl FnOnce(Value) -> Option<T>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(read))
}

// The server serializes pids as strings; older builds sent numbers.
fn deserialize_pid<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, |value| match value {
        Value::Number(number) => number.as_u64().and_then(|pid| u32::try_from(pid).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, |value| value.as_u64())
}

fn deserialize_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, |value| value.as_f64())
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, |value| match value {
        Value::String(text) => Some(text),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_accepts_string_and_number() {
        let record: ProcessRecord = serde_json::from_str(r#"{"pid":"42"}"#).unwrap();
        assert_eq!(record.pid, Some(42));

        let record: ProcessRecord = serde_json::from_str(r#"{"pid":7}"#).unwrap();
        assert_eq!(record.pid, Some(7));

        let record: ProcessRecord = serde_json::from_str(r#"{"pid":"init"}"#).unwrap();
        assert_eq!(record.pid, None);
    }

    #[test]
    fn missing_and_null_fields_default_to_none() {
        let record: ProcessRecord =
            serde_json::from_str(r#"{"pid":"1","name":null,"cpu_usage":0.25}"#).unwrap();
        assert_eq!(record.pid, Some(1));
        assert_eq!(record.name, None);
        assert_eq!(record.cpu_usage, Some(0.25));
        assert_eq!(record.memory, None);
        assert_eq!(record.run_time, None);
    }

    #[test]
    fn wrong_typed_fields_read_as_missing() {
        let record: ProcessRecord = serde_json::from_str(
            r#"{"pid":"9","name":5,"cpu_usage":"0.5","memory":-1,"status":[],"run_time":1.5}"#,
        )
        .unwrap();
        assert_eq!(record, ProcessRecord::new(9));

        let record: ProcessRecord = serde_json::from_str(r#"{"pid":-4}"#).unwrap();
        assert_eq!(record.pid, None);
        let record: ProcessRecord = serde_json::from_str(r#"{"pid":true}"#).unwrap();
        assert_eq!(record.pid, None);
    }

    #[test]
    fn full_record_decodes() {
        let record: ProcessRecord = serde_json::from_str(
            r#"{"pid":"300","name":"/usr/bin/bash","memory":4096000,"cpu_usage":0.5,"run_time":12,"status":"Sleep"}"#,
        )
        .unwrap();
        assert_eq!(
            record,
            ProcessRecord::new(300)
                .with_name("/usr/bin/bash")
                .with_memory(4_096_000)
                .with_cpu(0.5)
                .with_run_time(12)
                .with_status("Sleep")
        );
    }
}
