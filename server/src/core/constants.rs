// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "FleetWatch";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "fleetwatch";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".fleetwatch";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "fleetwatch.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FLEETWATCH_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "FLEETWATCH_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "FLEETWATCH_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "FLEETWATCH_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FLEETWATCH_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "FLEETWATCH_DATA_DIR";

// =============================================================================
// Environment Variables - Ingestion
// =============================================================================

/// Environment variable to toggle eBPF trace ingestion
pub const ENV_INGEST_ENABLED: &str = "FLEETWATCH_INGEST_ENABLED";

/// Environment variable holding the ingestion API key
pub const ENV_INGEST_API_KEY: &str = "FLEETWATCH_INGEST_API_KEY";

// =============================================================================
// Ingestion
// =============================================================================

/// Base path for OTLP trace ingestion
pub const INGEST_BASE_PATH: &str = "/api/traces/otlp";

/// Suffix some exporters append unconditionally
pub const INGEST_SIGNAL_SUFFIX: &str = "/v1/traces";

/// Dedicated API key header
pub const API_KEY_HEADER: &str = "x-api-key";

/// Service name used when the resource has no `service.name`
pub const UNKNOWN_SERVICE_NAME: &str = "unknown";

// =============================================================================
// API Limits
// =============================================================================

/// Max request body size for general API endpoints (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Max request body size for OTLP ingestion (64 MB)
pub const OTLP_BODY_LIMIT: usize = 64 * 1024 * 1024;

// =============================================================================
// SQLite Configuration
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "fleetwatch.db";

/// Maximum connections in the SQLite pool
pub const SQLITE_MAX_CONNECTIONS: u32 = 8;

/// Busy timeout for SQLite connections (seconds)
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// SQLite page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// Pages written before an automatic WAL checkpoint
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval between explicit WAL checkpoints (seconds)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Shutdown
// =============================================================================

/// Maximum time to wait for background tasks on shutdown (seconds)
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Debug
// =============================================================================

/// Debug dump file for decoded trace batches
pub const DEBUG_TRACES_FILE: &str = "traces.jsonl";
