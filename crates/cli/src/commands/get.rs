//! `get`: metric families as JSON, raw text or a sample table

use anyhow::{Context, Result};
use kubestate_lib::exposition::filter_exposition;
use kubestate_lib::report::{render_families_json, render_samples, select_families};
use kubestate_lib::{fetch_families, MetricsSource, Selector};

use crate::output::OutputFormat;

pub async fn get_metrics(
    source: &dyn MetricsSource,
    format: OutputFormat,
    filter: &Selector,
    namespace: &Selector,
) -> Result<String> {
    match format {
        OutputFormat::Raw => {
            let body = source.fetch_text().await?;
            Ok(filter_exposition(&body, filter, namespace))
        }
        OutputFormat::Json => {
            let families = fetch_families(source).await?;
            let selected = select_families(&families, filter);
            render_families_json(&selected).context("Failed to serialize metric families")
        }
        OutputFormat::Table => {
            let families = fetch_families(source).await?;
            let selected = select_families(&families, filter);
            Ok(render_samples(&selected, namespace))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{cluster, FixtureSource};

    #[tokio::test]
    async fn test_get_json_all_families() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(&source, OutputFormat::Json, &Selector::All, &Selector::All)
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), cluster().len());
    }

    #[tokio::test]
    async fn test_get_json_filter_matches_nothing() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(
            &source,
            OutputFormat::Json,
            &Selector::from_flag("kube_missing_family"),
            &Selector::All,
        )
        .await
        .unwrap();
        assert_eq!(out, "[]");
    }

    #[tokio::test]
    async fn test_get_json_single_family() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(
            &source,
            OutputFormat::Json,
            &Selector::from_flag("kube_deployment_spec_replicas"),
            &Selector::All,
        )
        .await
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["name"], "kube_deployment_spec_replicas");
    }

    #[tokio::test]
    async fn test_get_raw_passes_body_through() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(&source, OutputFormat::Raw, &Selector::All, &Selector::All)
            .await
            .unwrap();
        assert_eq!(out, source.text);
    }

    #[tokio::test]
    async fn test_get_raw_filtered() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(
            &source,
            OutputFormat::Raw,
            &Selector::from_flag("kube_deployment_spec_replicas"),
            &Selector::from_flag("a"),
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            "kube_deployment_spec_replicas{namespace=\"a\",deployment=\"web\"} 3\n"
        );
    }

    #[tokio::test]
    async fn test_get_table_honors_namespace() {
        let source = FixtureSource::new(cluster());
        let out = get_metrics(
            &source,
            OutputFormat::Table,
            &Selector::All,
            &Selector::from_flag("b"),
        )
        .await
        .unwrap();

        assert!(out.contains("Labels"));
        assert!(out.contains(r#"pod="p2""#));
        assert!(!out.contains(r#"pod="p1""#));
    }
}
