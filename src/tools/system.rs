//! [`ExternalTools`] backed by real processes.
//!
//! - region selection via slurp
//! - capture via grim
//! - clipboard via wl-copy
//! - window control via hyprctl
//! - editing via swappy

use std::io::Write;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};

use log::{debug, warn};

use super::{ExternalTools, ToolError, ToolResult};
use crate::app::ToolCommands;

pub struct SystemTools {
    commands: ToolCommands,
}

impl SystemTools {
    pub fn new(commands: ToolCommands) -> Self {
        Self { commands }
    }

    fn spawn(program: &str, command: &mut Command) -> ToolResult<Child> {
        command.spawn().map_err(|source| ToolError::SpawnFailed {
            program: program.to_string(),
            source,
        })
    }

    fn run(program: &str, command: &mut Command) -> ToolResult<ExitStatus> {
        let status = command.status().map_err(|source| ToolError::SpawnFailed {
            program: program.to_string(),
            source,
        })?;

        if !status.success() {
            warn!("{} exited with {}", program, status);
        }
        Ok(status)
    }

    fn feed_stdin(program: &str, child: &mut Child, bytes: &[u8]) -> ToolResult<()> {
        // Taking stdin out of the child closes the pipe once it is dropped.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(bytes)
                .map_err(|source| ToolError::PipeFailed {
                    program: program.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl ExternalTools for SystemTools {
    fn select_region(&self) -> ToolResult<Option<String>> {
        let program = &self.commands.selector;
        let output = Command::new(program)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::SpawnFailed {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!("{} exited with {}", program, output.status);
            return Ok(None);
        }

        let geometry = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(geometry))
    }

    fn capture_region(&self, geometry: &str) -> ToolResult<Vec<u8>> {
        let program = &self.commands.capture;
        let output = Command::new(program)
            .args(capture_args(geometry))
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::SpawnFailed {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!("{} exited with {}", program, output.status);
        }
        Ok(output.stdout)
    }

    fn set_clipboard_image(&self, png: &[u8]) -> ToolResult<()> {
        let program = &self.commands.clipboard;
        let mut child = Self::spawn(
            program,
            Command::new(program)
                .args(["--type", "image/png"])
                .stdin(Stdio::piped()),
        )?;

        Self::feed_stdin(program, &mut child, png)?;

        let status = child.wait().map_err(|source| ToolError::PipeFailed {
            program: program.clone(),
            source,
        })?;
        if !status.success() {
            warn!("{} exited with {}", program, status);
        }
        Ok(())
    }

    fn resize_active_window(&self, width: i32, height: i32) -> ToolResult<()> {
        let program = &self.commands.compositor;
        Self::run(program, Command::new(program).args(resize_args(width, height)))?;
        Ok(())
    }

    fn pin_window(&self, pid: u32) -> ToolResult<()> {
        let program = &self.commands.compositor;
        Self::run(program, Command::new(program).args(pin_args(pid)))?;
        Ok(())
    }

    fn launch_editor(&self, png: &[u8]) -> ToolResult<()> {
        let program = &self.commands.editor;
        // Own process group so the editor outlives us.
        let mut child = Self::spawn(
            program,
            Command::new(program)
                .args(["-f", "-"])
                .stdin(Stdio::piped())
                .process_group(0),
        )?;

        Self::feed_stdin(program, &mut child, png)?;
        debug!("{} started with pid {}", program, child.id());
        Ok(())
    }
}

fn capture_args(geometry: &str) -> [&str; 3] {
    ["-g", geometry, "-"]
}

fn resize_args(width: i32, height: i32) -> Vec<String> {
    vec![
        "-q".to_string(),
        "dispatch".to_string(),
        "resizeactive".to_string(),
        "exact".to_string(),
        width.to_string(),
        height.to_string(),
    ]
}

/// Addresses the window by pid; `active` may still be the previously focused client.
fn pin_args(pid: u32) -> Vec<String> {
    vec![
        "-q".to_string(),
        "--batch".to_string(),
        format!(
            "dispatch setfloating pid:{} ; dispatch pin pid:{}",
            pid, pid
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_args_pass_geometry_verbatim() {
        let geometry = "10,20 300x200";
        assert_eq!(capture_args(geometry), ["-g", "10,20 300x200", "-"]);
    }

    #[test]
    fn test_resize_args_use_exact_dimensions() {
        assert_eq!(
            resize_args(840, 420),
            ["-q", "dispatch", "resizeactive", "exact", "840", "420"]
        );
    }

    #[test]
    fn test_pin_args_select_window_by_pid() {
        let args = pin_args(4242);

        assert_eq!(args[..2], ["-q", "--batch"]);
        assert_eq!(
            args[2],
            "dispatch setfloating pid:4242 ; dispatch pin pid:4242"
        );
        assert!(!args[2].contains("active"));
    }

    #[test]
    fn test_missing_program_reports_spawn_failure() {
        let tools = SystemTools::new(ToolCommands {
            selector: "pinshot-test-no-such-program".to_string(),
            ..ToolCommands::default()
        });

        match tools.select_region() {
            Err(ToolError::SpawnFailed { program, .. }) => {
                assert_eq!(program, "pinshot-test-no-such-program");
            }
            other => panic!("expected spawn failure, got {:?}", other),
        }
    }

    #[test]
    fn test_selector_failure_is_cancellation() {
        // `false` exits non-zero without printing anything.
        let tools = SystemTools::new(ToolCommands {
            selector: "false".to_string(),
            ..ToolCommands::default()
        });

        assert!(matches!(tools.select_region(), Ok(None)));
    }

    #[test]
    fn test_selector_output_is_trimmed() {
        let tools = SystemTools::new(ToolCommands {
            selector: "pwd".to_string(),
            ..ToolCommands::default()
        });

        let result = tools.select_region();
        assert!(matches!(result, Ok(Some(_))), "got {:?}", result);

        let geometry = result.unwrap().unwrap();
        assert!(geometry.starts_with('/'));
        assert!(!geometry.ends_with('\n'));
    }
}
