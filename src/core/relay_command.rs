use crate::app_config::{EndpointConfig, RelayConfig};
use crate::camera_record::path_name_for;

/// Fixed parts of the relay command; only the camera path varies per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCommandTemplate {
    program: String,
    output_format: String,
    source_base: String,
    destination_base: String,
}

impl RelayCommandTemplate {
    pub fn new(relay: &RelayConfig) -> Self {
        RelayCommandTemplate {
            program: relay.program.clone(),
            output_format: relay.output_format.clone(),
            source_base: endpoint_base(&relay.source),
            destination_base: endpoint_base(&relay.destination),
        }
    }

    /// Builds the command that re-publishes `cam<id>` from the local server to
    /// the remote relay, copying the stream without transcoding.
    pub fn build_relay_command(&self, id: u64) -> String {
        let path = path_name_for(id);
        format!(
            "{} -i {}/{} -c copy -f {} {}/{}",
            self.program, self.source_base, path, self.output_format, self.destination_base, path
        )
    }
}

impl Default for RelayCommandTemplate {
    fn default() -> Self {
        RelayCommandTemplate::new(&RelayConfig::default())
    }
}

fn endpoint_base(endpoint: &EndpointConfig) -> String {
    format!("{}://{}:{}", endpoint.scheme, endpoint.host, endpoint.port)
}
