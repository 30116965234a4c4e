#[cfg(feature = "cli")]
use std::sync::{Arc, Mutex};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Lightweight resource monitor for engine phases.
///
/// Disabled by default; when enabled it samples the current process after each
/// phase so long leaderboard runs can be profiled from the log alone.
#[cfg(feature = "cli")]
pub struct PhaseMonitor {
    system: Arc<Mutex<System>>,
    pid: Pid,
    start_time: Instant,
    peak_memory: Arc<Mutex<u64>>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
        system.refresh_all();

        Self {
            system: Arc::new(Mutex::new(system)),
            pid,
            start_time: Instant::now(),
            peak_memory: Arc::new(Mutex::new(0)),
            enabled,
        }
    }

    fn snapshot(&self) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(PhaseStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str, experts: usize) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "📊 {} - {} experts, CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                phase,
                experts,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_summary(&self) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "📊 Run complete - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when the cli feature (and sysinfo) is absent.
#[cfg(not(feature = "cli"))]
pub struct PhaseMonitor;

#[cfg(not(feature = "cli"))]
impl PhaseMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str, _experts: usize) {}

    pub fn log_summary(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
