use instant::Instant;

/// Which phase of a scene step is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StepPhase {
    Input = 0,
    Flock = 1,
    Objects = 2,
    Shading = 3,
}

impl StepPhase {
    pub const ALL: [StepPhase; 4] = [Self::Input, Self::Flock, Self::Objects, Self::Shading];

    pub fn label(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Flock => "flock",
            Self::Objects => "objects",
            Self::Shading => "shading",
        }
    }
}

/// Smoothing factor for the moving average.
const EMA_ALPHA: f64 = 0.1;

/// Per-phase timing with exponential moving average smoothing.
#[derive(Debug)]
pub struct StepTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 4],
    start: Instant,
}

impl StepTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 4],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: StepPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let idx = phase as usize;
        self.durations_us[idx] = self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line summary for logs, e.g. `input 1.2us | flock 30.5us | ...`.
    pub fn summary(&self) -> String {
        StepPhase::ALL
            .iter()
            .map(|p| format!("{} {:.1}us", p.label(), self.durations_us[*p as usize]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for StepTimers {
    fn default() -> Self {
        Self::new()
    }
}
