use log::{info, trace};

use crate::icon::Icon;

/// Milliseconds.
pub type Millis = u32;

/// How long each frame stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDurations<'a> {
    Uniform(Millis),
    PerFrame(&'a [Millis]),
}

impl FrameDurations<'_> {
    /// Uniform duration for assets declared by frame rate.
    pub const fn from_fps(fps: u8) -> Self {
        assert!(fps > 0, "frame rate must be positive");
        FrameDurations::Uniform(1000 / fps as Millis)
    }
}

/// What happens once playback runs past the last frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::EnumIter, rotate_enum::RotateEnum,
)]
pub enum LoopPolicy {
    #[default]
    Loop,
    HoldLast,
    Hide,
}

impl LoopPolicy {
    pub fn repr(self) -> &'static str {
        match self {
            LoopPolicy::Loop => "Loop",
            LoopPolicy::HoldLast => "Hold last",
            LoopPolicy::Hide => "Hide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Running,
    Finished,
}

/// Outcome of a single [`IconAnimation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Not running, nothing changed.
    Idle,
    Unchanged,
    FrameChanged,
    /// Playback reached the end and stopped consuming time.
    Finished,
}

impl TickResult {
    pub fn needs_redraw(self) -> bool {
        matches!(self, TickResult::FrameChanged | TickResult::Finished)
    }
}

/// Immutable description of a frame sequence. Shared by every view that
/// plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation<'a> {
    frames: &'a [Icon<'a>],
    durations: FrameDurations<'a>,
    policy: LoopPolicy,
    cycle: u64,
}

impl<'a> Animation<'a> {
    pub const fn new(frames: &'a [Icon<'a>], durations: FrameDurations<'a>, policy: LoopPolicy) -> Self {
        assert!(!frames.is_empty(), "animation needs at least one frame");
        let cycle = match durations {
            FrameDurations::Uniform(duration) => {
                assert!(duration > 0, "frame duration must be positive");
                duration as u64 * frames.len() as u64
            }
            FrameDurations::PerFrame(table) => {
                assert!(table.len() == frames.len(), "one duration per frame");
                let mut total = 0u64;
                let mut i = 0;
                while i < table.len() {
                    assert!(table[i] > 0, "frame duration must be positive");
                    total += table[i] as u64;
                    i += 1;
                }
                total
            }
        };
        Self { frames, durations, policy, cycle }
    }

    /// Same frames and timing, different end-of-sequence behaviour.
    pub const fn with_policy(self, policy: LoopPolicy) -> Self {
        Self { policy, ..self }
    }

    pub const fn frames(&self) -> &'a [Icon<'a>] {
        self.frames
    }

    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub const fn policy(&self) -> LoopPolicy {
        self.policy
    }

    pub const fn durations(&self) -> FrameDurations<'a> {
        self.durations
    }

    pub fn duration(&self, index: usize) -> Millis {
        match self.durations {
            FrameDurations::Uniform(duration) => duration,
            FrameDurations::PerFrame(table) => table[index],
        }
    }

    /// Length of one pass over all frames.
    pub const fn total_duration(&self) -> u64 {
        self.cycle
    }

    /// Largest decoded frame, for sizing a scratch buffer.
    pub fn max_frame_buffer_size(&self) -> usize {
        self.frames.iter().map(Icon::buffer_size).max().unwrap_or(0)
    }

    /// Time from the start of the sequence to the start of frame `index`.
    fn offset_of(&self, index: usize) -> u64 {
        match self.durations {
            FrameDurations::Uniform(duration) => duration as u64 * index as u64,
            FrameDurations::PerFrame(table) => table[..index].iter().map(|&d| d as u64).sum(),
        }
    }

    /// Frame index and time into that frame for a position inside one cycle.
    fn locate(&self, position: u64) -> (usize, Millis) {
        debug_assert!(position < self.cycle);
        match self.durations {
            FrameDurations::Uniform(duration) => {
                let duration = duration as u64;
                ((position / duration) as usize, (position % duration) as Millis)
            }
            FrameDurations::PerFrame(table) => {
                let mut remaining = position;
                for (index, &duration) in table.iter().enumerate() {
                    if remaining < duration as u64 {
                        return (index, remaining as Millis);
                    }
                    remaining -= duration as u64;
                }
                unreachable!("position inside cycle")
            }
        }
    }
}

/// Playback position of one animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub frame: usize,
    pub elapsed: Millis,
    pub status: PlaybackStatus,
    /// Set when a hiding animation finishes, cleared only by `start`.
    pub hidden: bool,
}

/// A playing instance of an [`Animation`], owned by the view that shows it.
#[derive(Debug, Clone, Copy)]
pub struct IconAnimation<'a> {
    animation: Animation<'a>,
    state: PlaybackState,
}

impl<'a> IconAnimation<'a> {
    pub fn new(animation: Animation<'a>) -> Self {
        Self { animation, state: PlaybackState::default() }
    }

    pub fn animation(&self) -> &Animation<'a> {
        &self.animation
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn frame_index(&self) -> usize {
        self.state.frame
    }

    pub fn elapsed(&self) -> Millis {
        self.state.elapsed
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.status == PlaybackStatus::Running
    }

    pub fn is_last_frame(&self) -> bool {
        self.state.frame + 1 == self.animation.frame_count()
    }

    /// True once a play-once-then-hide animation has finished, even if it was
    /// stopped afterwards.
    pub fn is_hidden(&self) -> bool {
        self.state.hidden
    }

    /// Restarts playback from the first frame, whatever the current status.
    pub fn start(&mut self) {
        info!(
            "Starting animation ({} frames, {})",
            self.animation.frame_count(),
            self.animation.policy.repr()
        );
        self.state = PlaybackState {
            frame: 0,
            elapsed: 0,
            status: PlaybackStatus::Running,
            hidden: false,
        };
    }

    /// Freezes playback on the current frame. A hidden animation stays hidden.
    pub fn stop(&mut self) {
        if self.state.status == PlaybackStatus::Stopped {
            trace!("Animation already stopped");
            return;
        }
        info!("Stopping animation at frame {}", self.state.frame);
        self.state.status = PlaybackStatus::Stopped;
    }

    /// Advances playback by `delta` milliseconds.
    pub fn tick(&mut self, delta: Millis) -> TickResult {
        if self.state.status != PlaybackStatus::Running {
            return TickResult::Idle;
        }
        let previous = self.state.frame;
        let position =
            self.animation.offset_of(self.state.frame) + self.state.elapsed as u64 + delta as u64;
        let cycle = self.animation.cycle;

        let (frame, elapsed) = match self.animation.policy {
            LoopPolicy::Loop => self.animation.locate(position % cycle),
            LoopPolicy::HoldLast | LoopPolicy::Hide if position >= cycle => {
                self.state = PlaybackState {
                    frame: self.animation.frame_count() - 1,
                    elapsed: 0,
                    status: PlaybackStatus::Finished,
                    hidden: self.animation.policy == LoopPolicy::Hide,
                };
                info!("Animation finished ({})", self.animation.policy.repr());
                return TickResult::Finished;
            }
            LoopPolicy::HoldLast | LoopPolicy::Hide => self.animation.locate(position),
        };
        self.state.frame = frame;
        self.state.elapsed = elapsed;

        if frame != previous {
            trace!("Frame {} -> {}", previous, frame);
            TickResult::FrameChanged
        } else {
            TickResult::Unchanged
        }
    }

    /// The frame to show, or `None` once a hiding animation has finished.
    pub fn current_frame(&self) -> Option<&Icon<'a>> {
        if self.is_hidden() {
            return None;
        }
        self.animation.frames.get(self.state.frame)
    }
}
