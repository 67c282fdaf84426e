use anyhow::Result;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig as _;
use opentelemetry_otlp::WithHttpConfig as _;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Identity of the service reported in every exported span and metric.
#[derive(Clone, Copy, Debug)]
pub struct ServiceIdentity {
    pub name: &'static str,
    pub version: &'static str,
}

/// Owns the OpenTelemetry providers for the lifetime of the process.
///
/// Dropping the handler flushes and shuts down the exporters, so it must be
/// kept alive until `main` returns.
pub struct OpentelemetryHandler {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl OpentelemetryHandler {
    const SDK_DISABLED_ENV_VAR: &str = "OTEL_SDK_DISABLED";
    const DEFAULT_LOG_FILTER: &str = "info";

    pub fn new(identity: ServiceIdentity) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();

        if Self::sdk_disabled(&lookup) {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer())
                .with(Self::env_filter(&lookup))
                .try_init()?;

            tracing::debug!("OpenTelemetry export disabled, logging locally only");

            return Ok(Self {
                tracer_provider: None,
                meter_provider: None,
            });
        }

        let tracer_provider = Self::create_trace_exporter(identity)?;
        let meter_provider = Self::create_metric_exporter(identity)?;

        let tracer = tracer_provider.tracer(identity.name);

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(Self::env_filter(&lookup))
            .with(tracing_opentelemetry::MetricsLayer::new(
                meter_provider.clone(),
            ))
            .with(tracing_opentelemetry::OpenTelemetryLayer::new(tracer))
            .try_init()?;

        Ok(Self {
            tracer_provider: Some(tracer_provider),
            meter_provider: Some(meter_provider),
        })
    }

    fn sdk_disabled(lookup: &impl Fn(&str) -> Option<String>) -> bool {
        lookup(Self::SDK_DISABLED_ENV_VAR)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    /// Uses `RUST_LOG` when it holds valid directives, `info` otherwise.
    fn env_filter(lookup: &impl Fn(&str) -> Option<String>) -> EnvFilter {
        lookup(EnvFilter::DEFAULT_ENV)
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(Self::DEFAULT_LOG_FILTER))
    }

    fn create_metric_exporter(identity: ServiceIdentity) -> Result<SdkMeterProvider> {
        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_http()
            .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
            .with_compression(opentelemetry_otlp::Compression::Gzip)
            .build()?;

        let meter_provider = SdkMeterProvider::builder()
            .with_resource(Self::create_resource(identity))
            .with_periodic_exporter(exporter)
            .build();
        opentelemetry::global::set_meter_provider(meter_provider.clone());

        Ok(meter_provider)
    }

    fn create_trace_exporter(identity: ServiceIdentity) -> Result<SdkTracerProvider> {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
            .with_compression(opentelemetry_otlp::Compression::Gzip)
            .build()?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(Self::create_resource(identity))
            .with_batch_exporter(exporter)
            .build();
        opentelemetry::global::set_tracer_provider(tracer_provider.clone());

        opentelemetry::global::set_text_map_propagator(
            opentelemetry_sdk::propagation::TraceContextPropagator::new(),
        );

        Ok(tracer_provider)
    }

    fn create_resource(identity: ServiceIdentity) -> opentelemetry_sdk::Resource {
        opentelemetry_sdk::Resource::builder()
            .with_service_name(identity.name)
            .with_attribute(opentelemetry::KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                identity.version,
            ))
            .with_detectors(&[
                Box::new(opentelemetry_resource_detectors::OsResourceDetector),
                Box::new(opentelemetry_resource_detectors::ProcessResourceDetector),
                Box::new(opentelemetry_resource_detectors::K8sResourceDetector),
            ])
            .build()
    }
}

impl Drop for OpentelemetryHandler {
    fn drop(&mut self) {
        if let Some(tracer_provider) = &self.tracer_provider
            && let Err(err) = tracer_provider.shutdown()
        {
            eprintln!("{err:?}");
        }
        if let Some(meter_provider) = &self.meter_provider
            && let Err(err) = meter_provider.shutdown()
        {
            eprintln!("{err:?}");
        }
    }
}
