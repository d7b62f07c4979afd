use std::collections::BTreeMap;

use kospect_types::{DeploymentInfo, FieldValue, ResourceSummary, ServiceInfo};

/// Build the extended summary for a deployment.
///
/// Status is the type of the first reported condition, "Unknown" when the
/// deployment has none. An unset replica count reads as "0".
pub fn analyze_deployment(info: DeploymentInfo) -> ResourceSummary {
    let status = info
        .conditions
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());

    let mut fields = BTreeMap::new();
    fields.insert(
        "containers".to_string(),
        FieldValue::List(info.containers.iter().map(|c| c.name.clone()).collect()),
    );
    fields.insert(
        "images".to_string(),
        FieldValue::List(info.containers.iter().filter_map(|c| c.image.clone()).collect()),
    );
    fields.insert(
        "replicas".to_string(),
        FieldValue::Text(info.replicas.unwrap_or(0).to_string()),
    );
    fields.insert("selector".to_string(), FieldValue::Map(info.selector));

    let mut summary = ResourceSummary::new(info.namespace, info.name, status);
    summary.fields = Some(fields);
    summary
}

/// Build the extended summary for a service.
///
/// Ports map their name to "port/protocol"; an unnamed port falls under the
/// literal key "port", so a later unnamed port overwrites an earlier one.
/// Services always report the status "Active".
pub fn analyze_service(info: ServiceInfo) -> ResourceSummary {
    let mut ports = BTreeMap::new();
    for port in &info.ports {
        let key = port.name.clone().unwrap_or_else(|| "port".to_string());
        let protocol = port.protocol.clone().unwrap_or_else(|| "TCP".to_string());
        ports.insert(key, format!("{}/{}", port.port, protocol));
    }

    let mut fields = BTreeMap::new();
    fields.insert(
        "clusterIp".to_string(),
        FieldValue::Text(info.cluster_ip.clone().unwrap_or_default()),
    );
    fields.insert("ports".to_string(), FieldValue::Map(ports));
    fields.insert("selector".to_string(), FieldValue::Map(info.selector));

    let mut summary = ResourceSummary::new(info.namespace, info.name, "Active".to_string());
    summary.fields = Some(fields);
    summary
}
