/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Parse problems are returned alongside the defaults so they can be logged
/// once logging is up (the config decides where the log goes).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct WizardConfig {
    pub timing: TimingConfig,
    pub audio: AudioConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub interstitial_ms: u64,
    pub typewriter_ms: u64,
    pub ramp_ms: u64,
    pub install_dwell_ms: u64,
    pub sweep_ms: u64,
    pub blink_ms: u64,
    pub bounce_ms: u64,
}

#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    /// `None` = logging disabled.
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame")]
    frame_ms: u64,
    #[serde(default = "default_interstitial")]
    interstitial_ms: u64,
    #[serde(default = "default_typewriter")]
    typewriter_ms: u64,
    #[serde(default = "default_ramp")]
    ramp_ms: u64,
    #[serde(default = "default_install_dwell")]
    install_dwell_ms: u64,
    #[serde(default = "default_sweep")]
    sweep_ms: u64,
    #[serde(default = "default_blink")]
    blink_ms: u64,
    #[serde(default = "default_bounce")]
    bounce_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_audio_enabled")]
    enabled: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default = "default_log_file")]
    file: String,
}

// ── Defaults ──

fn default_frame() -> u64 { 16 }          // ~60fps input/render cadence
fn default_interstitial() -> u64 { 2000 }
fn default_typewriter() -> u64 { 25 }
fn default_ramp() -> u64 { 60 }
fn default_install_dwell() -> u64 { 600 }
fn default_sweep() -> u64 { 1000 }
fn default_blink() -> u64 { 500 }
fn default_bounce() -> u64 { 50 }
fn default_audio_enabled() -> bool { true }
fn default_log_level() -> String { "info".into() }
fn default_log_file() -> String { "uninstall2025.log".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            frame_ms: default_frame(),
            interstitial_ms: default_interstitial(),
            typewriter_ms: default_typewriter(),
            ramp_ms: default_ramp(),
            install_dwell_ms: default_install_dwell(),
            sweep_ms: default_sweep(),
            blink_ms: default_blink(),
            bounce_ms: default_bounce(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio { enabled: default_audio_enabled() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TomlTiming::default().into()
    }
}

impl From<TomlTiming> for TimingConfig {
    fn from(t: TomlTiming) -> Self {
        // Zero periods would spin the scheduler; clamp to 1ms.
        TimingConfig {
            frame_ms: t.frame_ms.max(1),
            interstitial_ms: t.interstitial_ms,
            typewriter_ms: t.typewriter_ms.max(1),
            ramp_ms: t.ramp_ms.max(1),
            install_dwell_ms: t.install_dwell_ms,
            sweep_ms: t.sweep_ms.max(1),
            blink_ms: t.blink_ms.max(1),
            bounce_ms: t.bounce_ms.max(1),
        }
    }
}

// ── Loading ──

impl WizardConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) ~/.local/share/uninstall2025, (4) /usr/share/uninstall2025.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> (Self, Vec<AppError>) {
        let search_dirs = candidate_dirs();
        let mut problems = Vec::new();
        for dir in &search_dirs {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => match Self::parse(&text, &path, &search_dirs) {
                    Ok(cfg) => return (cfg, problems),
                    Err(e) => {
                        problems.push(e);
                        break;
                    }
                },
                Err(e) => problems.push(AppError::Io(e)),
            }
        }
        (Self::from_toml(TomlConfig::default(), &search_dirs), problems)
    }

    /// Parse one config document. `origin` names it in errors; relative log
    /// paths resolve against the first of `search_dirs`.
    pub fn parse(text: &str, origin: &Path, search_dirs: &[PathBuf]) -> Result<Self, AppError> {
        let cfg = toml::from_str::<TomlConfig>(text).map_err(|e| AppError::Config {
            path: origin.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_toml(cfg, search_dirs))
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        WizardConfig {
            timing: toml_cfg.timing.into(),
            audio: AudioConfig {
                enabled: toml_cfg.audio.enabled,
            },
            log: LogConfig {
                level: toml_cfg.log.level,
                file: resolve_log_file(&toml_cfg.log.file, search_dirs),
            },
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), &[])
    }
}

/// Relative log paths land next to the first candidate directory (usually
/// the executable). An empty string disables the log file.
fn resolve_log_file(file: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let file = file.trim();
    if file.is_empty() {
        return None;
    }
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return Some(path);
    }
    Some(match search_dirs.first() {
        Some(dir) => dir.join(path),
        None => path,
    })
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/uninstall2025");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/uninstall2025");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = WizardConfig::parse("", &origin(), &[]).unwrap();
        assert_eq!(cfg.timing, TimingConfig::default());
        assert_eq!(cfg.timing.interstitial_ms, 2000);
        assert!(cfg.audio.enabled);
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.log.file, Some(PathBuf::from("uninstall2025.log")));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = WizardConfig::parse(
            "[timing]\ninterstitial_ms = 500\n[audio]\nenabled = false\n",
            &origin(),
            &[],
        )
        .unwrap();
        assert_eq!(cfg.timing.interstitial_ms, 500);
        assert_eq!(cfg.timing.ramp_ms, 60);
        assert!(!cfg.audio.enabled);
    }

    #[test]
    fn zero_periods_are_clamped() {
        let cfg = WizardConfig::parse("[timing]\nramp_ms = 0\nbounce_ms = 0\n", &origin(), &[]).unwrap();
        assert_eq!(cfg.timing.ramp_ms, 1);
        assert_eq!(cfg.timing.bounce_ms, 1);
    }

    #[test]
    fn empty_log_file_disables_logging() {
        let cfg = WizardConfig::parse("[log]\nfile = \"\"\n", &origin(), &[]).unwrap();
        assert_eq!(cfg.log.file, None);
    }

    #[test]
    fn relative_log_file_joins_first_dir() {
        let dirs = vec![PathBuf::from("/opt/wizard"), PathBuf::from("/tmp")];
        assert_eq!(
            resolve_log_file("w.log", &dirs),
            Some(PathBuf::from("/opt/wizard/w.log"))
        );
        assert_eq!(resolve_log_file("/var/log/w.log", &dirs), Some(PathBuf::from("/var/log/w.log")));
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = WizardConfig::parse("[timing\n", &origin(), &[]).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
