//! Delimited record decoder
//!
//! The exporter answers the protobuf `Accept` header with back-to-back
//! varint-length-prefixed `MetricFamily` records. Decoding is all-or-nothing:
//! one bad record fails the whole batch and no prefix is handed downstream.

use crate::error::{KubestateError, Result};
use crate::proto::MetricFamily;
use prost::Message;
use tracing::debug;

/// Decode every length-prefixed family in `payload`, in stream order
pub fn decode_families(payload: &[u8]) -> Result<Vec<MetricFamily>> {
    let mut remaining = payload;
    let mut families = Vec::new();

    // End of buffer on a record boundary is the only clean stop
    while !remaining.is_empty() {
        let family = MetricFamily::decode_length_delimited(&mut remaining).map_err(|source| {
            KubestateError::Decode {
                index: families.len(),
                source,
            }
        })?;
        families.push(family);
    }

    debug!(
        families = families.len(),
        bytes = payload.len(),
        "Decoded metric families"
    );
    Ok(families)
}

/// Encode families back into the delimited stream format
pub fn encode_families(families: &[MetricFamily]) -> Vec<u8> {
    families
        .iter()
        .flat_map(|family| family.encode_length_delimited_to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{family, gauge};

    fn sample_families() -> Vec<MetricFamily> {
        vec![
            family(
                "kube_node_status_allocatable_cpu_cores",
                vec![gauge(&[("node", "n1")], 2.0)],
            ),
            family(
                "kube_pod_container_resource_requests",
                vec![
                    gauge(
                        &[
                            ("namespace", "a"),
                            ("pod", "p1"),
                            ("container", "c1"),
                            ("resource", "cpu"),
                        ],
                        0.5,
                    ),
                    gauge(&[("namespace", "a"), ("resource", "memory")], 1024.0),
                ],
            ),
            family("kube_deployment_spec_replicas", vec![]),
        ]
    }

    #[test]
    fn test_decode_preserves_count_and_order() {
        let families = sample_families();
        let payload = encode_families(&families);

        let decoded = decode_families(&payload).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded, families);
        assert_eq!(decoded[0].name(), "kube_node_status_allocatable_cpu_cores");
        assert_eq!(decoded[2].name(), "kube_deployment_spec_replicas");
    }

    #[test]
    fn test_empty_payload_is_clean_completion() {
        assert!(decode_families(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_record_fails_whole_batch() {
        let mut payload = encode_families(&sample_families());
        payload.truncate(payload.len() - 3);

        let err = decode_families(&payload).unwrap_err();
        match err {
            KubestateError::Decode { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupted_first_record_fails() {
        let mut payload = encode_families(&sample_families());
        // Field 1 with wire type 7, which does not exist
        payload[1] = 0x0F;

        assert!(matches!(
            decode_families(&payload),
            Err(KubestateError::Decode { index: 0, .. })
        ));
    }

    #[test]
    fn test_length_prefix_past_end_fails() {
        let mut payload = encode_families(&sample_families());
        payload.extend_from_slice(&[0x32, 0x0A]);

        assert!(matches!(
            decode_families(&payload),
            Err(KubestateError::Decode { index: 3, .. })
        ));
    }
}
