//! Global constants used throughout the rcengine codebase.

/// Settings file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "rcengine.toml";

/// Definition file inside a per-resource directory.
pub const RESOURCE_FILE_NAME: &str = "resource.yml";

/// Default content folder (`folders.file`).
pub const DEFAULT_FILE_FOLDER: &str = "files";

/// Default resource definition folder (`folders.rc`).
pub const DEFAULT_RC_FOLDER: &str = "resources";

/// Key under which a non-mapping `with` value is exposed to templates.
pub const TEMPLATE_VALUE_KEY: &str = "value";
