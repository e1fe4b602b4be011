use serde::{Deserialize, Serialize};

/// Endpoint reachability probes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshEvent {
    ProbeStarted { endpoint: String },
    ProbeCompleted { endpoint: String, reachable: bool },
}
