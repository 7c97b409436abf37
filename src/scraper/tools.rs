// External tool detection (yt-dlp binary, Python interpreter)

use serde::{Deserialize, Serialize};
use std::process::Command;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ToolType {
    YtDlp,
    Python,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "yt-dlp",
            ToolType::Python => "python3",
        }
    }

    /// Environment variable that overrides detection
    fn override_var(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "YTDLP_PATH",
            ToolType::Python => "YTDLP_PYTHON",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub tool_type: ToolType,
    pub version: Option<String>,
    pub path: Option<String>,
    pub is_available: bool,
}

pub struct ToolManager;

impl ToolManager {
    pub fn new() -> Self {
        Self
    }

    pub fn get_tool_info(&self, tool_type: ToolType) -> ToolInfo {
        let name = tool_type.as_str().to_string();
        let path = self.locate(&tool_type);
        let version = path.as_deref().and_then(|p| self.get_version(p));

        ToolInfo {
            name,
            tool_type,
            is_available: version.is_some(),
            version,
            path,
        }
    }

    pub fn get_all_tools(&self) -> Vec<ToolInfo> {
        vec![
            self.get_tool_info(ToolType::YtDlp),
            self.get_tool_info(ToolType::Python),
        ]
    }

    /// Find the executable for a tool: env override, common paths, then PATH
    pub fn locate(&self, tool_type: &ToolType) -> Option<String> {
        if let Ok(custom) = std::env::var(tool_type.override_var()) {
            if !custom.trim().is_empty() {
                return Some(custom);
            }
        }

        let binary_name = tool_type.as_str();

        let common_paths = [
            format!("/opt/homebrew/bin/{}", binary_name),
            format!("/usr/local/bin/{}", binary_name),
            format!("/usr/bin/{}", binary_name),
        ];

        for path in common_paths {
            if std::path::Path::new(&path).exists() {
                return Some(path);
            }
        }

        if let Ok(output) = Command::new("which").arg(binary_name).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Some(path);
                }
            }
        }

        None
    }

    fn get_version(&self, path: &str) -> Option<String> {
        match Command::new(path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                // python2 printed its version on stderr
                let out = if output.stdout.is_empty() {
                    String::from_utf8_lossy(&output.stderr).trim().to_string()
                } else {
                    String::from_utf8_lossy(&output.stdout).trim().to_string()
                };
                Some(out)
            }
            _ => None,
        }
    }

    /// Quick import check, avoids noisy stderr when the module is missing
    pub fn python_has_module(python: &str, module: &str) -> bool {
        let code = format!("import {}", module);
        match Command::new(python).args(["-c", &code]).output() {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reports_unavailable() {
        let manager = ToolManager::new();
        assert_eq!(manager.get_version("/nonexistent/tool"), None);
        assert!(!ToolManager::python_has_module("/nonexistent/python", "yt_dlp"));
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(ToolType::YtDlp.as_str(), "yt-dlp");
        assert_eq!(ToolType::Python.override_var(), "YTDLP_PYTHON");
        assert_eq!(ToolManager::new().get_all_tools().len(), 2);
    }
}
