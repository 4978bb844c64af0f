//! Entity identity keys and accumulator rows

use serde::Serialize;

/// Resource dimension carried by the `resource` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Cpu,
    Memory,
}

impl Resource {
    /// Parse a `resource` label value; anything but `cpu`/`memory` is ignored
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "cpu" => Some(Resource::Cpu),
            "memory" => Some(Resource::Memory),
            _ => None,
        }
    }
}

/// Which side of a container's resource spec a sample describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Requirement {
    Request,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PodKey {
    pub namespace: String,
    pub pod: String,
    pub container: String,
}

impl PodKey {
    pub fn new(
        namespace: impl Into<String>,
        pod: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            pod: pod.into(),
            container: container.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeploymentKey {
    pub namespace: String,
    pub deployment: String,
}

impl DeploymentKey {
    pub fn new(namespace: impl Into<String>, deployment: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            deployment: deployment.into(),
        }
    }
}

/// Node rows are keyed by bare node name
pub type NodeKey = String;

/// Summed requests and limits; cpu in cores, memory in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResourceTotals {
    pub cpu_request: f64,
    pub cpu_limit: f64,
    pub memory_request: f64,
    pub memory_limit: f64,
}

impl ResourceTotals {
    pub fn slot_mut(&mut self, requirement: Requirement, resource: Resource) -> &mut f64 {
        match (requirement, resource) {
            (Requirement::Request, Resource::Cpu) => &mut self.cpu_request,
            (Requirement::Request, Resource::Memory) => &mut self.memory_request,
            (Requirement::Limit, Resource::Cpu) => &mut self.cpu_limit,
            (Requirement::Limit, Resource::Memory) => &mut self.memory_limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PodRow {
    /// Node the container was first reported on; never updated afterwards
    pub node: String,
    pub resources: ResourceTotals,
}

/// Capacity figures of one node
///
/// Each value is the last gauge seen for it; nodes report one sample per
/// resource, so nothing is summed here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeCapacity {
    pub cpu_capacity: f64,
    pub cpu_allocatable: f64,
    pub memory_capacity: f64,
    pub memory_allocatable: f64,
}

/// Whether a capacity sample is the raw capacity or the schedulable share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CapacityKind {
    Capacity,
    Allocatable,
}

impl NodeCapacity {
    pub fn slot_mut(&mut self, kind: CapacityKind, resource: Resource) -> &mut f64 {
        match (kind, resource) {
            (CapacityKind::Capacity, Resource::Cpu) => &mut self.cpu_capacity,
            (CapacityKind::Capacity, Resource::Memory) => &mut self.memory_capacity,
            (CapacityKind::Allocatable, Resource::Cpu) => &mut self.cpu_allocatable,
            (CapacityKind::Allocatable, Resource::Memory) => &mut self.memory_allocatable,
        }
    }
}

/// Pod requests scheduled on a node next to what the node offers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeRow {
    pub resources: ResourceTotals,
    pub capacity: NodeCapacity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeploymentRow {
    pub requested_replicas: f64,
    pub available_replicas: f64,
    pub unavailable_replicas: f64,
}

/// Replica counter a deployment sample feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReplicaField {
    Requested,
    Available,
    Unavailable,
}

impl DeploymentRow {
    pub fn slot_mut(&mut self, field: ReplicaField) -> &mut f64 {
        match field {
            ReplicaField::Requested => &mut self.requested_replicas,
            ReplicaField::Available => &mut self.available_replicas,
            ReplicaField::Unavailable => &mut self.unavailable_replicas,
        }
    }
}
