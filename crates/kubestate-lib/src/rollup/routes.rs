//! Routing table from metric family name to accumulator slot

use crate::models::{CapacityKind, ReplicaField, Requirement, Resource};

/// Which entity a family feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupKind {
    /// Per-container requests/limits, namespace scoped
    Container,
    /// Node capacity figures, cluster global
    Node,
    Deployment,
}

/// Accumulator field a sample lands in
///
/// `None` for the resource means it is read from the sample's `resource` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Resources(Requirement, Option<Resource>),
    Capacity(CapacityKind, Option<Resource>),
    Replicas(ReplicaField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Sum,
    Overwrite,
}

impl Combine {
    pub fn apply(self, slot: &mut f64, value: f64) {
        match self {
            Combine::Sum => *slot += value,
            Combine::Overwrite => *slot = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub family: &'static str,
    pub kind: RollupKind,
    pub target: Target,
    pub combine: Combine,
}

const fn resources(family: &'static str, requirement: Requirement, resource: Option<Resource>) -> Route {
    Route {
        family,
        kind: RollupKind::Container,
        target: Target::Resources(requirement, resource),
        combine: Combine::Sum,
    }
}

const fn capacity(family: &'static str, kind: CapacityKind, resource: Option<Resource>) -> Route {
    Route {
        family,
        kind: RollupKind::Node,
        target: Target::Capacity(kind, resource),
        combine: Combine::Overwrite,
    }
}

const fn replicas(family: &'static str, field: ReplicaField) -> Route {
    Route {
        family,
        kind: RollupKind::Deployment,
        target: Target::Replicas(field),
        combine: Combine::Sum,
    }
}

pub const ROUTES: &[Route] = &[
    resources("kube_pod_container_resource_requests", Requirement::Request, None),
    resources("kube_pod_container_resource_limits", Requirement::Limit, None),
    // kube-state-metrics v1 names
    resources(
        "kube_pod_container_resource_requests_cpu_cores",
        Requirement::Request,
        Some(Resource::Cpu),
    ),
    resources(
        "kube_pod_container_resource_requests_memory_bytes",
        Requirement::Request,
        Some(Resource::Memory),
    ),
    resources(
        "kube_pod_container_resource_limits_cpu_cores",
        Requirement::Limit,
        Some(Resource::Cpu),
    ),
    resources(
        "kube_pod_container_resource_limits_memory_bytes",
        Requirement::Limit,
        Some(Resource::Memory),
    ),
    capacity(
        "kube_node_status_capacity_cpu_cores",
        CapacityKind::Capacity,
        Some(Resource::Cpu),
    ),
    capacity(
        "kube_node_status_capacity_memory_bytes",
        CapacityKind::Capacity,
        Some(Resource::Memory),
    ),
    capacity(
        "kube_node_status_allocatable_cpu_cores",
        CapacityKind::Allocatable,
        Some(Resource::Cpu),
    ),
    capacity(
        "kube_node_status_allocatable_memory_bytes",
        CapacityKind::Allocatable,
        Some(Resource::Memory),
    ),
    // kube-state-metrics v2 names
    capacity("kube_node_status_capacity", CapacityKind::Capacity, None),
    capacity("kube_node_status_allocatable", CapacityKind::Allocatable, None),
    replicas("kube_deployment_spec_replicas", ReplicaField::Requested),
    replicas(
        "kube_deployment_status_replicas_available",
        ReplicaField::Available,
    ),
    replicas(
        "kube_deployment_status_replicas_unavailable",
        ReplicaField::Unavailable,
    ),
];

/// Route for a family name, `None` when the rollups ignore it
pub fn route(family: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.family == family)
}

/// Resolve the resource a sample describes
pub fn resolve_resource(fixed: Option<Resource>, resource_label: &str) -> Option<Resource> {
    fixed.or_else(|| Resource::from_label(resource_label))
}
