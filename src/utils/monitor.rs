use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// 單一階段的量測結果
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
}

/// 記錄每個階段（抓取目錄、下載結果、匯出）的耗時與記憶體
pub struct RunMonitor {
    enabled: bool,
    started: Instant,
    last_checkpoint: Instant,
    phases: Vec<PhaseStats>,
    #[cfg(feature = "cli")]
    system: Option<(System, Pid)>,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            last_checkpoint: now,
            phases: Vec::new(),
            #[cfg(feature = "cli")]
            system: if enabled {
                sysinfo::get_current_pid().ok().map(|pid| (System::new(), pid))
            } else {
                None
            },
        }
    }

    pub fn checkpoint(&mut self, phase: &str) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let stats = PhaseStats {
            phase: phase.to_string(),
            elapsed: now.duration_since(self.last_checkpoint),
            memory_mb: self.current_memory_mb(),
        };
        self.last_checkpoint = now;

        match stats.memory_mb {
            Some(memory) => tracing::info!(
                "📊 {} - Time: {:?}, Memory: {}MB",
                stats.phase,
                stats.elapsed,
                memory
            ),
            None => tracing::info!("📊 {} - Time: {:?}", stats.phase, stats.elapsed),
        }
        self.phases.push(stats);
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak = self.phases.iter().filter_map(|p| p.memory_mb).max();
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Phases: {}, Peak Memory: {}",
            self.started.elapsed(),
            self.phases.len(),
            peak.map(|m| format!("{}MB", m))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }

    #[cfg(feature = "cli")]
    fn current_memory_mb(&mut self) -> Option<u64> {
        let (system, pid) = self.system.as_mut()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[*pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(*pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn current_memory_mb(&mut self) -> Option<u64> {
        None
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
