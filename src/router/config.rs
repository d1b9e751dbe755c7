//! Router Configuration

/// Router configuration
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Bind address
    pub bind: String,

    /// Port number
    pub port: u16,

    /// Virtual points generated per backend node
    pub replicas: usize,

    /// (node identity, base URL) pair for every backend
    pub backends: Vec<(String, String)>,

    /// Upstream request timeout in seconds
    pub dispatch_timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            replicas: 20,
            backends: vec![
                ("cache0".to_string(), "http://localhost:3000".to_string()),
                ("cache1".to_string(), "http://localhost:3001".to_string()),
                ("cache2".to_string(), "http://localhost:3002".to_string()),
            ],
            dispatch_timeout_secs: 5,
        }
    }
}

impl RouterConfig {
    /// Create a new config with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create a new config with custom bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Set virtual points per backend node
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Replace the backend set
    pub fn with_backends(mut self, backends: Vec<(String, String)>) -> Self {
        self.backends = backends;
        self
    }

    /// Set upstream request timeout
    pub fn with_dispatch_timeout(mut self, secs: u64) -> Self {
        self.dispatch_timeout_secs = secs;
        self
    }
}
