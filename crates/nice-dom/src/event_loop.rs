//! Event Loop
//!
//! Timers and animation frame callbacks on a virtual clock. The embedder
//! advances time with [`EventLoop::tick`] and runs a frame with
//! [`EventLoop::take_frame_callbacks`].

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Animation frame handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: u32,
    task: T,
    due_at: u64,
}

#[derive(Debug, Clone)]
struct FrameCallback<T> {
    id: u32,
    task: T,
}

/// Event loop
#[derive(Debug)]
pub struct EventLoop<T> {
    timers: Vec<Timer<T>>,
    frames: Vec<FrameCallback<T>>,
    next_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            frames: Vec::new(),
            next_id: 1,
            current_time: 0,
        }
    }

    /// Current timestamp (ms)
    pub fn now(&self) -> u64 {
        self.current_time
    }

    /// Run `task` once `delay_ms` have elapsed
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerId {
        let id = self.allocate_id();
        self.timers.push(Timer {
            id,
            task,
            due_at: self.current_time + delay_ms,
        });
        TimerId(id)
    }

    /// Cancel a timer. Returns false if it already fired or was cleared.
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id.0);
        self.timers.len() != before
    }

    /// Run `task` before the next frame is painted
    pub fn request_animation_frame(&mut self, task: T) -> FrameId {
        let id = self.allocate_id();
        self.frames.push(FrameCallback { id, task });
        FrameId(id)
    }

    pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| f.id != id.0);
        self.frames.len() != before
    }

    /// Advance time and return the tasks of timers that became due,
    /// earliest first
    pub fn tick(&mut self, delta_ms: u64) -> Vec<T> {
        self.current_time += delta_ms;
        let now = self.current_time;

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.due_at <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.due_at, t.id));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Take the callbacks registered for the next frame. Callbacks requested
    /// while these run belong to the frame after.
    pub fn take_frame_callbacks(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|f| f.task)
            .collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty() || !self.frames.is_empty()
    }

    /// Drop every pending timer and frame callback
    pub fn clear(&mut self) {
        self.timers.clear();
        self.frames.clear();
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_fires_once() {
        let mut event_loop = EventLoop::new();
        event_loop.set_timeout("a", 10);

        assert!(event_loop.tick(9).is_empty());
        assert_eq!(event_loop.tick(1), vec!["a"]);
        assert!(event_loop.tick(100).is_empty());
        assert!(!event_loop.has_pending());
    }

    #[test]
    fn test_due_order() {
        let mut event_loop = EventLoop::new();
        event_loop.set_timeout("late", 20);
        event_loop.set_timeout("early", 5);
        event_loop.set_timeout("also-early", 5);

        assert_eq!(event_loop.tick(30), vec!["early", "also-early", "late"]);
    }

    #[test]
    fn test_clear_timer() {
        let mut event_loop = EventLoop::new();
        let id = event_loop.set_timeout(1, 10);

        assert!(event_loop.clear_timer(id));
        assert!(!event_loop.clear_timer(id));
        assert!(event_loop.tick(10).is_empty());
    }

    #[test]
    fn test_animation_frames() {
        let mut event_loop = EventLoop::new();
        let first = event_loop.request_animation_frame("measure");
        event_loop.request_animation_frame("prune");

        assert!(event_loop.cancel_animation_frame(first));
        assert_eq!(event_loop.take_frame_callbacks(), vec!["prune"]);
        assert!(event_loop.take_frame_callbacks().is_empty());
    }
}
