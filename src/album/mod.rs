//! Full-screen photo viewer navigation.
//!
//! The controller owns the current index and the transition window. Starting
//! a transition never touches the index; instead it hands the host an
//! [`Effect::ScheduleSettle`] carrying a [`SettleTicket`], and the index only
//! changes once that ticket is delivered back through
//! [`AlbumController::settle`]. Closing or reopening the viewer invalidates
//! every outstanding ticket, so a late timer can never mutate a discarded or
//! reinitialized album.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub mod session;

pub use session::AlbumSession;

/// Length of the page-flip animation.
pub const SETTLE_DELAY: Duration = Duration::from_millis(600);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: i32,
    pub title: String,
    pub url: String,
}

/// Edge the incoming photo enters from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumState {
    pub current_index: usize,
    pub is_transitioning: bool,
    /// Only meaningful while `is_transitioning` is set.
    pub direction: Direction,
}

/// Identifies one scheduled settle. Tickets from a previous opening, or from
/// a transition that already settled, are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SettleTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Deliver `ticket` to [`AlbumController::settle`] once `after` has elapsed.
    ScheduleSettle { ticket: SettleTicket, after: Duration },
    /// The viewer was closed.
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    JumpTo(usize),
    Close,
}

impl Intent {
    /// Keyboard surface of the viewer.
    pub fn from_key(key: &str) -> Option<Intent> {
        match key {
            "ArrowRight" => Some(Intent::Next),
            "ArrowLeft" => Some(Intent::Previous),
            "Escape" => Some(Intent::Close),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OpenError {
    #[error("cannot open an album without photos")]
    Empty,
    #[error("start index {index} is out of range for {len} photos")]
    StartOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug)]
struct PendingSettle {
    ticket: SettleTicket,
    target: usize,
}

#[derive(Debug)]
struct OpenAlbum {
    photos: Vec<Photo>,
    state: AlbumState,
    pending: Option<PendingSettle>,
}

#[derive(Debug, Default)]
pub struct AlbumController {
    album: Option<OpenAlbum>,
    next_ticket: u64,
}

impl AlbumController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the viewer over `photos`, replacing any album that was open.
    pub fn open(&mut self, photos: Vec<Photo>, start_index: usize) -> Result<&AlbumState, OpenError> {
        if photos.is_empty() {
            return Err(OpenError::Empty);
        }
        if start_index >= photos.len() {
            return Err(OpenError::StartOutOfRange {
                index: start_index,
                len: photos.len(),
            });
        }

        tracing::debug!(photos = photos.len(), start_index, "opening album");
        let album = self.album.insert(OpenAlbum {
            photos,
            state: AlbumState {
                current_index: start_index,
                is_transitioning: false,
                direction: Direction::default(),
            },
            pending: None,
        });
        Ok(&album.state)
    }

    /// Discards the album. Any transition in flight is abandoned.
    pub fn close(&mut self) {
        if self.album.take().is_some() {
            tracing::debug!("closing album");
        }
    }

    pub fn is_open(&self) -> bool {
        self.album.is_some()
    }

    pub fn state(&self) -> Option<&AlbumState> {
        self.album.as_ref().map(|album| &album.state)
    }

    pub fn next(&mut self) -> Effect {
        match self.album.as_ref() {
            Some(album) if album.state.current_index + 1 < album.photos.len() => {
                let target = album.state.current_index + 1;
                self.begin(target, Direction::Next)
            },
            _ => Effect::None,
        }
    }

    pub fn previous(&mut self) -> Effect {
        match self.album.as_ref() {
            Some(album) if album.state.current_index > 0 => {
                let target = album.state.current_index - 1;
                self.begin(target, Direction::Prev)
            },
            _ => Effect::None,
        }
    }

    /// Moves straight to `target` in a single transition, whatever the distance.
    pub fn jump_to(&mut self, target: usize) -> Effect {
        match self.album.as_ref() {
            Some(album) if target < album.photos.len() && target != album.state.current_index => {
                let direction = if target > album.state.current_index {
                    Direction::Next
                } else {
                    Direction::Prev
                };
                self.begin(target, direction)
            },
            _ => Effect::None,
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::JumpTo(target) => self.jump_to(target),
            Intent::Close => {
                self.close();
                Effect::Closed
            },
        }
    }

    /// Ends the transition identified by `ticket`. Returns whether the ticket
    /// was current; stale tickets leave the album untouched.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        let album = match self.album.as_mut() {
            Some(album) => album,
            None => {
                tracing::debug!(?ticket, "dropping settle for closed album");
                return false;
            },
        };

        match album.pending.take() {
            Some(pending) if pending.ticket == ticket => {
                album.state.current_index = pending.target;
                album.state.is_transitioning = false;
                true
            },
            other => {
                album.pending = other;
                tracing::debug!(?ticket, "dropping stale settle");
                false
            },
        }
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.album
            .as_ref()
            .map(|album| &album.photos[album.state.current_index])
    }

    /// 1-based ordinal of the current photo and the total count.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.album
            .as_ref()
            .map(|album| (album.state.current_index + 1, album.photos.len()))
    }

    pub fn has_previous(&self) -> bool {
        self.album
            .as_ref()
            .map_or(false, |album| album.state.current_index > 0)
    }

    pub fn has_next(&self) -> bool {
        self.album
            .as_ref()
            .map_or(false, |album| album.state.current_index + 1 < album.photos.len())
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        match self.album.as_ref() {
            Some(album) => (0..album.photos.len())
                .map(|index| Indicator {
                    index,
                    active: index == album.state.current_index,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn begin(&mut self, target: usize, direction: Direction) -> Effect {
        let album = match self.album.as_mut() {
            Some(album) if !album.state.is_transitioning => album,
            _ => return Effect::None,
        };

        let ticket = SettleTicket(self.next_ticket);
        self.next_ticket += 1;

        album.state.is_transitioning = true;
        album.state.direction = direction;
        album.pending = Some(PendingSettle { ticket, target });
        tracing::trace!(?direction, target, "transition started");

        Effect::ScheduleSettle {
            ticket,
            after: SETTLE_DELAY,
        }
    }
}
