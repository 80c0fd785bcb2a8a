//! `system_tool`: system information and read-only filesystem inspection.
//!
//! # Operations
//!
//! | Operation | Uses `path` | Result |
//! |-----------|:---:|--------|
//! | `system_info` | No | OS, host, CPU and memory figures |
//! | `list_directory` | Yes (default `.`) | Entries, directories first, sorted by name |
//! | `file_info` | Yes (required) | Size, type, timestamps, MIME type |
//! | `disk_usage` | Yes (default `.`) | Space on the disk holding the path |
//!
//! Every path is canonicalized and must lie under one of the allowed roots
//! (the working directory when none are configured).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use sysinfo::{Disks, System};
use toolcall_domain::agent::rules::SYSTEM_TOOL;
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::debug;

use super::args::{opt_bool, opt_str, opt_u64, require_str};

const OPERATIONS: [&str; 4] = ["system_info", "list_directory", "file_info", "disk_usage"];
const DEFAULT_MAX_FILES: usize = 100;
const MAX_FILES_LIMIT: usize = 1000;

pub struct SystemTool {
    allowed_roots: Vec<PathBuf>,
}

impl SystemTool {
    /// Restrict path operations to `allowed_roots`. An empty list allows
    /// only the current working directory.
    pub fn new(allowed_roots: Vec<PathBuf>) -> Self {
        let allowed_roots = if allowed_roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            allowed_roots
        };
        Self { allowed_roots }
    }

    /// Build from configured path strings, expanding a leading `~`.
    pub fn from_config(paths: &[String]) -> Self {
        Self::new(paths.iter().map(|p| expand_home(p)).collect())
    }

    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.allowed_roots
    }

    /// Canonicalize `path` and check it against the allowed roots.
    fn resolve(&self, path: &str) -> Result<PathBuf, ToolError> {
        let candidate = expand_home(path);
        let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::not_found(path),
            std::io::ErrorKind::PermissionDenied => ToolError::permission_denied(path),
            _ => ToolError::execution_failed(format!("Cannot resolve '{}': {}", path, e)),
        })?;

        let allowed = self
            .allowed_roots
            .iter()
            .filter_map(|root| root.canonicalize().ok())
            .any(|root| resolved.starts_with(&root));

        if allowed {
            Ok(resolved)
        } else {
            Err(ToolError::permission_denied(format!(
                "{} is outside the allowed paths",
                path
            )))
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => dirs::home_dir()
            .map(|home| home.join(rest.trim_start_matches('/')))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

#[async_trait]
impl ToolHandler for SystemTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            SYSTEM_TOOL,
            "Get system information, directory listings, file details and disk usage (read-only, restricted paths)",
        )
        .with_parameter(
            ToolParameter::new("operation", "Operation to perform", true).with_enum(OPERATIONS),
        )
        .with_parameter(ToolParameter::new(
            "path",
            "File or directory path (required for file_info)",
            false,
        ))
        .with_parameter(
            ToolParameter::new("include_hidden", "Include hidden entries", false)
                .with_type(ParamType::Boolean)
                .with_default(false),
        )
        .with_parameter(
            ToolParameter::new("max_files", "Maximum entries to list", false)
                .with_type(ParamType::Integer)
                .with_range(Some(1.0), Some(MAX_FILES_LIMIT as f64))
                .with_default(DEFAULT_MAX_FILES),
        )
        .with_output(
            ToolParameter::new("result", "Operation result", true).with_type(ParamType::Object),
        )
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let operation = require_str(arguments, "operation")?.to_string();
        let path = opt_str(arguments, "path").map(String::from);
        let include_hidden = opt_bool(arguments, "include_hidden").unwrap_or(false);
        let max_files = opt_u64(arguments, "max_files")
            .map(|n| (n as usize).clamp(1, MAX_FILES_LIMIT))
            .unwrap_or(DEFAULT_MAX_FILES);

        debug!(operation = %operation, path = ?path, "Running system operation");

        let target = match operation.as_str() {
            "system_info" => None,
            "file_info" => {
                let path = path.as_deref().ok_or_else(|| {
                    ToolError::invalid_argument("'path' is required for file_info")
                })?;
                Some(self.resolve(path)?)
            }
            "list_directory" | "disk_usage" => Some(self.resolve(path.as_deref().unwrap_or("."))?),
            other => {
                return Err(ToolError::invalid_argument(format!(
                    "Unknown operation: {}",
                    other
                )));
            }
        };

        let result = tokio::task::spawn_blocking(move || match (operation.as_str(), target) {
            ("list_directory", Some(dir)) => list_directory(&dir, include_hidden, max_files),
            ("file_info", Some(path)) => file_info(&path),
            ("disk_usage", Some(path)) => disk_usage(&path),
            _ => Ok(system_info()),
        })
        .await
        .map_err(|e| ToolError::execution_failed(format!("System operation aborted: {}", e)))??;

        Ok(result)
    }
}

fn timestamp(time: std::io::Result<SystemTime>) -> Value {
    time.ok()
        .map(|t| json!(DateTime::<Utc>::from(t).to_rfc3339()))
        .unwrap_or(Value::Null)
}

fn gib(bytes: u64) -> f64 {
    (bytes as f64 / 1024f64.powi(3) * 100.0).round() / 100.0
}

/// Human-readable byte size ("1.5 KB").
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

fn mime_type(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "rs" => "text/x-rust",
        "py" => "text/x-python",
        "js" => "text/javascript",
        "html" => "text/html",
        "css" => "text/css",
        "json" => "application/json",
        "toml" => "application/toml",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

fn system_info() -> Value {
    let mut sys = System::new_all();
    // CPU usage is a delta between two refreshes
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu();

    let os = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| std::env::consts::OS.to_string());
    let host = System::host_name().unwrap_or_else(|| "unknown".to_string());
    let cores = sys.cpus().len();
    let total = sys.total_memory();
    let available = sys.available_memory();
    let used_percent = if total > 0 {
        ((total - available.min(total)) as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    json!({
        "operation": "system_info",
        "platform": {
            "os": os,
            "kernel_version": System::kernel_version(),
            "arch": std::env::consts::ARCH,
            "host_name": host,
        },
        "cpu": {
            "logical_cores": cores,
            "usage_percent": (sys.global_cpu_info().cpu_usage() * 10.0).round() / 10.0,
        },
        "memory": {
            "total_gb": gib(total),
            "available_gb": gib(available),
            "used_percent": used_percent,
        },
        "uptime_secs": System::uptime(),
        "current_directory": std::env::current_dir().ok().map(|d| d.display().to_string()),
        "summary": format!(
            "{} on {} ({}), {} CPUs, {:.1} GB of {:.1} GB memory available",
            os,
            host,
            std::env::consts::ARCH,
            cores,
            gib(available),
            gib(total)
        ),
    })
}

fn list_directory(dir: &Path, include_hidden: bool, max_files: usize) -> Result<Value, ToolError> {
    if !dir.is_dir() {
        return Err(ToolError::invalid_argument(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let read_dir = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ToolError::permission_denied(dir.display().to_string()),
        _ => ToolError::execution_failed(format!("Cannot read {}: {}", dir.display(), e)),
    })?;

    let mut entries: Vec<_> = read_dir
        .filter_map(Result::ok)
        .filter(|entry| include_hidden || !entry.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some((entry.file_name().to_string_lossy().into_owned(), entry.path(), metadata))
        })
        .collect();
    entries.sort_by(|a, b| b.2.is_dir().cmp(&a.2.is_dir()).then_with(|| a.0.cmp(&b.0)));

    let truncated = entries.len() > max_files;
    entries.truncate(max_files);

    let mut directories = Vec::new();
    let mut files = Vec::new();
    for (name, path, metadata) in &entries {
        let entry = json!({
            "name": name,
            "path": path.display().to_string(),
            "size": metadata.len(),
            "is_directory": metadata.is_dir(),
            "modified_time": timestamp(metadata.modified()),
        });
        if metadata.is_dir() {
            directories.push(entry);
        } else {
            files.push(entry);
        }
    }

    let mut summary = format!(
        "{} entries in {} ({} directories, {} files)",
        entries.len(),
        dir.display(),
        directories.len(),
        files.len()
    );
    if truncated {
        summary.push_str(", listing truncated");
    }

    Ok(json!({
        "operation": "list_directory",
        "path": dir.display().to_string(),
        "total_entries": entries.len(),
        "directories": directories,
        "files": files,
        "truncated": truncated,
        "summary": summary,
    }))
}

fn file_info(path: &Path) -> Result<Value, ToolError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        ToolError::execution_failed(format!("Cannot stat {}: {}", path.display(), e))
    })?;
    let is_symlink = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut info = json!({
        "operation": "file_info",
        "name": name,
        "path": path.display().to_string(),
        "size": metadata.len(),
        "size_human": human_size(metadata.len()),
        "is_directory": metadata.is_dir(),
        "is_file": metadata.is_file(),
        "is_symlink": is_symlink,
        "readonly": metadata.permissions().readonly(),
        "modified_time": timestamp(metadata.modified()),
        "created_time": timestamp(metadata.created()),
        "accessed_time": timestamp(metadata.accessed()),
    });

    let kind = if metadata.is_dir() {
        let count = std::fs::read_dir(path).map(|d| d.count()).ok();
        info["directory_contents_count"] = json!(count);
        "directory".to_string()
    } else {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        info["extension"] = json!(extension);
        info["mime_type"] = json!(mime_type(&extension));
        format!("file, {}", mime_type(&extension))
    };

    info["summary"] = json!(format!("{}: {}, {}", name, kind, human_size(metadata.len())));
    Ok(info)
}

fn disk_usage(path: &Path) -> Result<Value, ToolError> {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().components().count())
        .ok_or_else(|| {
            ToolError::execution_failed(format!("No disk found for {}", path.display()))
        })?;

    let total = disk.total_space();
    let free = disk.available_space();
    let used = total.saturating_sub(free);
    let used_percent = if total > 0 {
        (used as f64 / total as f64 * 10000.0).round() / 100.0
    } else {
        0.0
    };

    Ok(json!({
        "operation": "disk_usage",
        "path": path.display().to_string(),
        "mount_point": disk.mount_point().display().to_string(),
        "file_system": disk.file_system().to_string_lossy(),
        "total_bytes": total,
        "used_bytes": used,
        "free_bytes": free,
        "total_gb": gib(total),
        "used_gb": gib(used),
        "free_gb": gib(free),
        "used_percent": used_percent,
        "summary": format!(
            "{}: {:.1} GB free of {:.1} GB ({:.1}% used)",
            disk.mount_point().display(),
            gib(free),
            gib(total),
            used_percent
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(operation: &str, path: Option<&Path>) -> ToolArguments {
        let mut args = ToolArguments::new();
        args.insert("operation".into(), json!(operation));
        if let Some(path) = path {
            args.insert("path".into(), json!(path.display().to_string()));
        }
        args
    }

    fn sandbox() -> (tempfile::TempDir, SystemTool) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "hello").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        let tool = SystemTool::new(vec![dir.path().to_path_buf()]);
        (dir, tool)
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512.0 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp"), PathBuf::from("/tmp"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Documents"), home.join("Documents"));
        }
    }

    #[tokio::test]
    async fn test_list_directory_sorted_without_hidden() {
        let (dir, tool) = sandbox();
        let payload = tool
            .execute(&args("list_directory", Some(dir.path())))
            .await
            .unwrap();

        assert_eq!(payload["total_entries"], 3);
        assert_eq!(payload["directories"][0]["name"], "sub");
        assert_eq!(payload["files"][0]["name"], "a.json");
        assert_eq!(payload["files"][1]["name"], "b.txt");
        assert_eq!(payload["truncated"], false);
        assert!(payload["summary"].as_str().unwrap().starts_with("3 entries"));
    }

    #[tokio::test]
    async fn test_list_directory_hidden_and_truncated() {
        let (dir, tool) = sandbox();
        let mut arguments = args("list_directory", Some(dir.path()));
        arguments.insert("include_hidden".into(), json!(true));
        arguments.insert("max_files".into(), json!(2));

        let payload = tool.execute(&arguments).await.unwrap();
        assert_eq!(payload["total_entries"], 2);
        assert_eq!(payload["truncated"], true);
    }

    #[tokio::test]
    async fn test_file_info() {
        let (dir, tool) = sandbox();
        let payload = tool
            .execute(&args("file_info", Some(&dir.path().join("b.txt"))))
            .await
            .unwrap();

        assert_eq!(payload["name"], "b.txt");
        assert_eq!(payload["size"], 5);
        assert_eq!(payload["is_file"], true);
        assert_eq!(payload["mime_type"], "text/plain");
        assert_eq!(payload["summary"], "b.txt: file, text/plain, 5.0 B");
    }

    #[tokio::test]
    async fn test_file_info_requires_path() {
        let (_dir, tool) = sandbox();
        let err = tool.execute(&args("file_info", None)).await.unwrap_err();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);
    }

    #[tokio::test]
    async fn test_path_outside_allowed_roots_is_denied() {
        let (_dir, tool) = sandbox();
        let outside = tempfile::tempdir().unwrap();
        let err = tool
            .execute(&args("list_directory", Some(outside.path())))
            .await
            .unwrap_err();
        assert_eq!(err.code, ToolError::PERMISSION_DENIED);
    }

    #[tokio::test]
    async fn test_parent_traversal_is_denied() {
        let (dir, tool) = sandbox();
        let sneaky = dir.path().join("sub").join("..").join("..");
        let err = tool
            .execute(&args("list_directory", Some(&sneaky)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ToolError::PERMISSION_DENIED);
    }

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let (dir, tool) = sandbox();
        let err = tool
            .execute(&args("file_info", Some(&dir.path().join("nope.txt"))))
            .await
            .unwrap_err();
        assert_eq!(err.code, ToolError::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let (_dir, tool) = sandbox();
        let err = tool.execute(&args("format_disk", None)).await.unwrap_err();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);
    }

    #[tokio::test]
    async fn test_system_info_has_summary() {
        let (_dir, tool) = sandbox();
        let payload = tool.execute(&args("system_info", None)).await.unwrap();
        assert!(payload["cpu"]["logical_cores"].as_u64().is_some());
        assert!(payload["summary"].as_str().unwrap().contains("CPUs"));
    }

    #[test]
    fn test_default_roots_are_working_directory() {
        let tool = SystemTool::new(Vec::new());
        assert_eq!(tool.allowed_roots(), &[PathBuf::from(".")]);
    }
}
