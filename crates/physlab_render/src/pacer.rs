//! Frame pacing
//!
//! Stages are driven at a fixed target rate. The pacer tracks when the next
//! frame is due, measures delta time and keeps a short moving average of the
//! achieved frame rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames averaged for the fps estimate
const FPS_WINDOW: usize = 10;

/// Longest delta reported to a stage, in seconds
const MAX_DT: f32 = 0.25;

/// Timing handed to a stage each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    /// Seconds since the previous frame, capped
    pub dt: f32,
    /// Frames drawn so far, starting at 0
    pub frame: u64,
    /// Average frame rate over the last few frames
    pub fps: f32,
}

pub struct FramePacer {
    interval: Duration,
    last_frame: Instant,
    next_frame: Instant,
    frame: u64,
    recent: VecDeque<f32>,
}

impl FramePacer {
    /// Pacer targeting `fps` frames per second (at least 1)
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    fn starting_at(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last_frame: now,
            next_frame: now,
            frame: 0,
            recent: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame should be drawn
    pub fn next_deadline(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Mark a frame as started
    pub fn tick(&mut self) -> FrameClock {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameClock {
        let raw_dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        let dt = raw_dt.min(MAX_DT);
        self.last_frame = now;
        self.next_frame = now + self.interval;

        if raw_dt > 0.0 {
            if self.recent.len() == FPS_WINDOW {
                self.recent.pop_front();
            }
            self.recent.push_back(raw_dt);
        }

        let clock = FrameClock {
            dt,
            frame: self.frame,
            fps: self.average_fps(),
        };
        self.frame += 1;
        clock
    }

    fn average_fps(&self) -> f32 {
        let total: f32 = self.recent.iter().sum();
        if total > 0.0 {
            self.recent.len() as f32 / total
        } else {
            0.0
        }
    }
}
