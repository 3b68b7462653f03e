//! Deferral of scroll writes to the next display refresh.

use std::collections::VecDeque;

use crate::host::DragHost;

/// A scroll offset write waiting for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWrite {
    pub scroll_left: u16,
}

impl ScrollWrite {
    pub fn new(scroll_left: u16) -> Self {
        Self { scroll_left }
    }

    pub fn apply<H: DragHost + ?Sized>(self, host: &mut H) {
        host.set_scroll_left(self.scroll_left);
    }
}

/// Schedules a write for the next display refresh.
pub trait FrameScheduler {
    fn request_frame<H: DragHost + ?Sized>(&mut self, write: ScrollWrite, host: &mut H);
}

/// Queues writes until the host runs a frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<ScrollWrite>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Writes waiting for the next frame, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &ScrollWrite> {
        self.pending.iter()
    }

    /// Apply every queued write in request order.
    /// Returns the number of writes applied.
    pub fn run_frame<H: DragHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let count = self.pending.len();
        for write in self.pending.drain(..) {
            log::trace!("Frame write: scroll_left={}", write.scroll_left);
            write.apply(host);
        }
        count
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame<H: DragHost + ?Sized>(&mut self, write: ScrollWrite, _host: &mut H) {
        self.pending.push_back(write);
    }
}

/// Applies writes as soon as they are requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl FrameScheduler for Immediate {
    fn request_frame<H: DragHost + ?Sized>(&mut self, write: ScrollWrite, host: &mut H) {
        write.apply(host);
    }
}
