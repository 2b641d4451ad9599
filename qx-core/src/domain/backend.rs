//! Backend name resolution
//!
//! The platform has accumulated several generations of backend names. The
//! same user-facing alias resolves to a different canonical name depending
//! on which endpoint the request targets (experiments, jobs, queue status,
//! calibration). The alias tables live here as data so the client modules
//! stay free of name trivia.

/// Endpoint families that disagree on canonical backend names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Experiment,
    Job,
    Status,
    Calibration,
}

/// Resolves user-facing backend aliases to canonical platform names
#[derive(Debug, Clone)]
pub struct BackendResolver {
    v2_names: Vec<String>,
    v3_names: Vec<String>,
    simulator_names: Vec<String>,
}

impl Default for BackendResolver {
    fn default() -> Self {
        Self {
            v2_names: ["ibmqx5qv2", "ibmqx2", "qx5qv2", "qx5q", "real"]
                .map(String::from)
                .to_vec(),
            v3_names: vec!["ibmqx3".into()],
            simulator_names: ["simulator", "sim_trivial_2", "ibmqx_qasm_simulator"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl BackendResolver {
    /// Resolve a legacy alias for the given endpoint family.
    ///
    /// Returns `None` when the alias is not in the legacy tables; the caller
    /// is expected to fall back to the live backend list.
    pub fn resolve(&self, alias: &str, endpoint: EndpointKind) -> Option<String> {
        let alias = alias.to_lowercase();
        let family = if self.v2_names.contains(&alias) {
            Family::V2
        } else if self.v3_names.contains(&alias) {
            Family::V3
        } else if self.simulator_names.contains(&alias) {
            Family::Simulator
        } else {
            return None;
        };

        let name = match (family, endpoint) {
            (Family::V2, EndpointKind::Experiment) => "real",
            (Family::V2, _) => "ibmqx2",
            (Family::V3, _) => "ibmqx3",
            (Family::Simulator, EndpointKind::Experiment) => "sim_trivial_2",
            (Family::Simulator, EndpointKind::Job) => "simulator",
            (Family::Simulator, _) => "ibmqx_qasm_simulator",
        };
        Some(name.to_string())
    }

    /// Whether the alias names a simulator in the legacy tables
    pub fn is_simulator(&self, alias: &str) -> bool {
        self.simulator_names.contains(&alias.to_lowercase())
    }
}

enum Family {
    V2,
    V3,
    Simulator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_aliases() {
        let r = BackendResolver::default();
        assert_eq!(
            r.resolve("real", EndpointKind::Experiment).as_deref(),
            Some("real")
        );
        assert_eq!(
            r.resolve("qx5qv2", EndpointKind::Job).as_deref(),
            Some("ibmqx2")
        );
        assert_eq!(
            r.resolve("ibmqx2", EndpointKind::Status).as_deref(),
            Some("ibmqx2")
        );
    }

    #[test]
    fn test_simulator_aliases_per_endpoint() {
        let r = BackendResolver::default();
        assert_eq!(
            r.resolve("simulator", EndpointKind::Experiment).as_deref(),
            Some("sim_trivial_2")
        );
        assert_eq!(
            r.resolve("simulator", EndpointKind::Job).as_deref(),
            Some("simulator")
        );
        assert_eq!(
            r.resolve("simulator", EndpointKind::Calibration).as_deref(),
            Some("ibmqx_qasm_simulator")
        );
    }

    #[test]
    fn test_case_insensitive_alias() {
        let r = BackendResolver::default();
        assert_eq!(
            r.resolve("SIMULATOR", EndpointKind::Job).as_deref(),
            Some("simulator")
        );
    }

    #[test]
    fn test_unknown_alias() {
        let r = BackendResolver::default();
        assert!(r.resolve("ibm_brisbane", EndpointKind::Job).is_none());
    }

    #[test]
    fn test_is_simulator() {
        let r = BackendResolver::default();
        assert!(r.is_simulator("simulator"));
        assert!(r.is_simulator("ibmqx_qasm_simulator"));
        assert!(!r.is_simulator("ibmqx2"));
    }
}
