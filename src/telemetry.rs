use std::{collections::HashMap, io};

use anyhow::{anyhow, Context, Result};
use opentelemetry::{
    global,
    propagation::TextMapPropagator,
    sdk::{
        propagation::{BaggagePropagator, TextMapCompositePropagator, TraceContextPropagator},
        trace as sdktrace, Resource,
    },
    KeyValue,
};
use opentelemetry_otlp::WithExportConfig;
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use url::Url;

const ENDPOINT: &str = "OTLP_ENDPOINT";
const HEADER_PREFIX: &str = "OTLP_";
const SERVICE_NAME: &str = "lens-artistry";

/// Installs the global subscriber. Spans are only exported when
/// `OTLP_ENDPOINT` is set; logs always go to stderr.
pub(crate) fn init() -> Result<()> {
    let propagator = new_propagator();
    global::set_text_map_propagator(propagator);

    let fmt_env_filter = env_filter_merge_from_environment("info", "LENS_ARTISTRY_LOG_LEVEL")?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_filter(fmt_env_filter);

    let otel_layer = match std::env::var(ENDPOINT) {
        Ok(endpoint) => {
            let tracer = new_tracer(&endpoint).context("Failed to create tracer")?;
            let otel_env_filter = env_filter_merge_from_environment(
                "trace,polling=off",
                "LENS_ARTISTRY_TRACE_LEVEL",
            )?;
            Some(
                tracing_opentelemetry::layer()
                    .with_tracer(tracer)
                    .with_filter(otel_env_filter),
            )
        },
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .context("Failed to set global default tracing subscriber")?;

    Ok(())
}

fn env_filter_merge_from_environment(
    default_directives: &'static str,
    env_var: &'static str,
) -> Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .parse(default_directives)
        .with_context(|| anyhow!("Default directives were invalid: {default_directives}"))?;

    if let Ok(env_value) = std::env::var(env_var) {
        for env_directive in env_value.split(',') {
            match env_directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(err) => eprintln!("WARN ignoring log directive: {env_directive:?}: {err}"),
            }
        }
    }

    Ok(filter)
}

fn new_propagator() -> impl TextMapPropagator {
    let bagage_propagator = BaggagePropagator::new();
    let trace_context_propagator = TraceContextPropagator::new();

    TextMapCompositePropagator::new(vec![
        Box::new(bagage_propagator),
        Box::new(trace_context_propagator),
    ])
}

/// Collects `OTLP_*` variables (other than the endpoint) as exporter
/// headers, `OTLP_API_KEY` becoming `api-key`.
fn otlp_headers(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(name, _)| name.starts_with(HEADER_PREFIX) && name != ENDPOINT)
        .filter_map(|(name, value)| {
            let header_name = name
                .strip_prefix(HEADER_PREFIX)?
                .replace('_', "-")
                .to_ascii_lowercase();
            Some((header_name, value))
        })
        .collect()
}

fn new_tracer(endpoint: &str) -> Result<sdktrace::Tracer> {
    let endpoint = Url::parse(endpoint).context("Invalid OTLP endpoint URL")?;
    let host = endpoint
        .host_str()
        .ok_or_else(|| anyhow!("OTLP endpoint has no host: {endpoint}"))?;
    let port = endpoint
        .port_or_known_default()
        .ok_or_else(|| anyhow!("OTLP endpoint has no port: {endpoint}"))?;

    let exporter = opentelemetry_otlp::new_exporter()
        .grpcio()
        .with_endpoint(format!("{host}:{port}"))
        .with_headers(otlp_headers(std::env::vars()))
        .with_tls(true);

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            sdktrace::config().with_resource(Resource::new(vec![KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                SERVICE_NAME,
            )])),
        )
        .install_batch(opentelemetry::runtime::AsyncStd)?;

    Ok(tracer)
}
