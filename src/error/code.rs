/// Error codes with category prefix
///
/// Categories:
/// - PRJ: Project discovery and manifest
/// - PLT: Platform adapters and platform directories
/// - PRC: External processes (generators, plugin installer)
/// - VAL: Input validation errors
/// - CFG: Tool path configuration
/// - IO: File system operations
/// - INT: Unexpected internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Project errors (PRJ001-PRJ099)
    /// Not inside a project
    Prj001,
    /// Invalid manifest
    Prj002,

    // Platform errors (PLT001-PLT099)
    /// Platform already installed
    Plt001,
    /// Requirements not met
    Plt002,
    /// No adapter registered
    Plt003,
    /// Project update failed
    Plt004,

    // Process errors (PRC001-PRC099)
    /// Generator exited non-zero
    Prc001,
    /// Plugin installer exited non-zero
    Prc002,

    // Validation errors (VAL001-VAL099)
    /// Unknown command
    Val001,
    /// Invalid platform name
    Val002,
    /// Missing platform names
    Val003,

    // Config errors (CFG001-CFG099)
    /// Tool paths could not be resolved
    Cfg001,

    // I/O errors (IO001-IO099)
    /// File not found
    Io001,
    /// Permission denied
    Io002,
    /// Other I/O failure
    Io003,

    // Internal errors (INT001-INT099)
    /// Unexpected internal error
    Int001,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 16] = [
        ErrorCode::Prj001,
        ErrorCode::Prj002,
        ErrorCode::Plt001,
        ErrorCode::Plt002,
        ErrorCode::Plt003,
        ErrorCode::Plt004,
        ErrorCode::Prc001,
        ErrorCode::Prc002,
        ErrorCode::Val001,
        ErrorCode::Val002,
        ErrorCode::Val003,
        ErrorCode::Cfg001,
        ErrorCode::Io001,
        ErrorCode::Io002,
        ErrorCode::Io003,
        ErrorCode::Int001,
    ];

    /// Returns the error code string (e.g., "PLT001")
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Prj001 => "PRJ001",
            ErrorCode::Prj002 => "PRJ002",
            ErrorCode::Plt001 => "PLT001",
            ErrorCode::Plt002 => "PLT002",
            ErrorCode::Plt003 => "PLT003",
            ErrorCode::Plt004 => "PLT004",
            ErrorCode::Prc001 => "PRC001",
            ErrorCode::Prc002 => "PRC002",
            ErrorCode::Val001 => "VAL001",
            ErrorCode::Val002 => "VAL002",
            ErrorCode::Val003 => "VAL003",
            ErrorCode::Cfg001 => "CFG001",
            ErrorCode::Io001 => "IO001",
            ErrorCode::Io002 => "IO002",
            ErrorCode::Io003 => "IO003",
            ErrorCode::Int001 => "INT001",
        }
    }

    /// Returns the general cause description
    pub fn cause(&self) -> &'static str {
        match self {
            ErrorCode::Prj001 => "No .pfm directory was found in the working directory or any parent",
            ErrorCode::Prj002 => "The project manifest is missing or could not be parsed",
            ErrorCode::Plt001 => "A sub-project for this platform is already present under platforms/",
            ErrorCode::Plt002 => "The platform SDK required to create this platform is not available",
            ErrorCode::Plt003 => "No adapter is registered for the requested platform",
            ErrorCode::Plt004 => "The generated sub-project could not be configured from the manifest",
            ErrorCode::Prc001 => "The platform's create script exited with a non-zero status",
            ErrorCode::Prc002 => "The plugin installer exited with a non-zero status",
            ErrorCode::Val001 => "The platform command is not one of add, remove or list",
            ErrorCode::Val002 => "Platform names must be a single plain path segment",
            ErrorCode::Val003 => "The command requires at least one platform name",
            ErrorCode::Cfg001 => "The location of the platform tools could not be determined",
            ErrorCode::Io001 => "The specified file or directory was not found",
            ErrorCode::Io002 => "Permission denied when accessing the file or directory",
            ErrorCode::Io003 => "A file system operation failed",
            ErrorCode::Int001 => "An unexpected internal error occurred",
        }
    }

    /// Returns remediation steps
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorCode::Prj001 => "1. Run the command from inside a project\n2. Pass --project <DIR> explicitly",
            ErrorCode::Prj002 => "1. Check www/config.toml exists\n2. Make sure it defines `id` and `name`",
            ErrorCode::Plt001 => "1. Use 'pfm platform ls' to see installed platforms\n2. Remove it first with 'pfm platform rm <name>'",
            ErrorCode::Plt002 => "1. Install the platform SDK\n2. Make sure its tools are on PATH",
            ErrorCode::Plt003 => "1. Check the platform name for typos\n2. Use 'pfm platforms' to see supported platforms",
            ErrorCode::Plt004 => "1. Inspect the generated sub-project\n2. Run 'pfm platform rm <name>' and add it again",
            ErrorCode::Prc001 => "1. Read the create script output above\n2. Check --lib-dir points at the platform libraries\n3. Run 'pfm platform rm <name>' before retrying",
            ErrorCode::Prc002 => "1. Read the installer output above\n2. Check --plugin-installer points at a working installer",
            ErrorCode::Val001 => "1. Use one of: add, remove (rm), list (ls)\n2. Use 'pfm platform --help' for usage information",
            ErrorCode::Val002 => "1. Use a bare platform name such as 'android'\n2. Do not include path separators",
            ErrorCode::Val003 => "1. Name at least one platform\n2. Use 'pfm platforms' to see supported platforms",
            ErrorCode::Cfg001 => "1. Set HOME\n2. Or pass --lib-dir and --plugin-installer\n3. Or set PFM_LIB_DIR and PFM_PLUGIN_INSTALLER",
            ErrorCode::Io001 => "1. Verify the path is correct\n2. Check if the file was moved or deleted",
            ErrorCode::Io002 => "1. Check file/directory permissions\n2. Verify ownership of the project directory",
            ErrorCode::Io003 => "1. Check free disk space\n2. Try the operation again",
            ErrorCode::Int001 => "1. Try the operation again\n2. Report the issue with debug logs (PFM_LOG=debug)",
        }
    }
}
