/*
 * Debug Information Module
 *
 * Frame timing and population figures shown in the control panel and the
 * on-screen overlay.
 */

use std::time::Duration;

use crate::simulation::FrameSnapshot;
use crate::spawn::SpawnReport;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_per_frame: usize,
    pub alive: usize,
    pub immortal: usize,
    pub mortal: usize,
    pub spawn_batches: u64,
    pub last_spawn: Option<SpawnReport>,
    pub expired_total: u64,
}

impl DebugInfo {
    // Fold one tick's results into the running totals
    pub fn record(&mut self, snapshot: &FrameSnapshot) {
        self.alive = snapshot.alive;
        self.immortal = snapshot.immortal;
        self.mortal = snapshot.mortal;
        self.expired_total += snapshot.expired as u64;
        if let Some(report) = snapshot.spawned {
            self.spawn_batches += 1;
            self.last_spawn = Some(report);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_per_frame),
            format!("Alive: {} ({} anchors, {} mortal)", self.alive, self.immortal, self.mortal),
            format!("Generations spawned: {}", self.spawn_batches),
            format!("Expired: {}", self.expired_total),
        ];
        if let Some(report) = self.last_spawn {
            lines.push(format!("Last generation: {} offspring", report.offspring));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_spawns_and_deaths() {
        let mut info = DebugInfo::default();
        let report = SpawnReport {
            group_size: 700,
            anchors: 1,
            offspring: 350,
        };
        info.record(&FrameSnapshot {
            alive: 351,
            immortal: 1,
            mortal: 350,
            expired: 2,
            spawned: Some(report),
            ..FrameSnapshot::default()
        });
        info.record(&FrameSnapshot {
            alive: 349,
            immortal: 1,
            mortal: 348,
            expired: 2,
            ..FrameSnapshot::default()
        });

        assert_eq!(info.alive, 349);
        assert_eq!(info.spawn_batches, 1);
        assert_eq!(info.expired_total, 4);
        assert_eq!(info.last_spawn, Some(report));
        assert!(info.lines().iter().any(|line| line.contains("350 offspring")));
    }
}
