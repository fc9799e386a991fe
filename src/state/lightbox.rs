//! Lightbox navigation state
//!
//! The lightbox shows one image at a time from a project's image sequence,
//! layered above the detail panel. Every user action is turned into a
//! [`Command`] and dispatched synchronously into the single [`Navigator`]
//! owned by the application.
//!
//! Two states: closed and open. Opening clamps the start index into range,
//! navigating wraps around both ends.

/// An image reference: a path relative to the site root, an absolute path or a URL
pub type ImageRef = String;

/// Navigation direction for prev/next controls and arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Signed index step for this direction
    pub fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// A user action addressed to the lightbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show `sequence` starting at `start_index` (clamped, may be negative)
    Open {
        sequence: Vec<ImageRef>,
        start_index: isize,
    },
    /// Hide the overlay and give the detail panel back its regions
    Close,
    /// Move one image in the given direction, wrapping at both ends
    Navigate(Direction),
}

/// Visibility of the detail panel regions that the overlay covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub header: bool,
    pub body: bool,
    pub close_control: bool,
}

impl PanelVisibility {
    /// Every region hidden (while the lightbox is open)
    pub const HIDDEN: Self = Self {
        header: false,
        body: false,
        close_control: false,
    };

    /// Every region shown
    pub const VISIBLE: Self = Self {
        header: true,
        body: true,
        close_control: true,
    };
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// What the overlay displays for the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Reference of the image to draw
    pub image: &'a str,
    /// 1-based position within the sequence
    pub position: usize,
    /// Length of the sequence
    pub total: usize,
}

impl Frame<'_> {
    /// Position label shown between the prev/next controls, e.g. "2 / 3"
    pub fn label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }

    /// Accessible description of the drawn image, e.g. "Image 2 of 3"
    pub fn alt(&self) -> String {
        format!("Image {} of {}", self.position, self.total)
    }
}

/// The lightbox state machine
///
/// Invariant: when open, the sequence is non-empty and
/// `current_index < sequence.len()`.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    sequence: Vec<ImageRef>,
    current_index: usize,
    is_open: bool,
    /// Detail panel regions as currently shown
    panel: PanelVisibility,
    /// Panel regions captured when the overlay went from closed to open
    saved_panel: Option<PanelVisibility>,
}

impl Navigator {
    /// Create a closed navigator with every detail panel region visible
    pub fn new() -> Self {
        Self::with_panel(PanelVisibility::VISIBLE)
    }

    /// Create a closed navigator with the given detail panel visibility
    pub fn with_panel(panel: PanelVisibility) -> Self {
        Self {
            panel,
            ..Self::default()
        }
    }

    /// Apply one command. Never fails: bad input is clamped, wrapped or ignored.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Open {
                sequence,
                start_index,
            } => self.open(sequence, start_index),
            Command::Close => self.close(),
            Command::Navigate(direction) => self.navigate(direction),
        }
    }

    /// Open the overlay on `sequence`.
    ///
    /// An empty sequence leaves the navigator untouched. The start index is
    /// clamped (not wrapped) into `[0, len - 1]`.
    pub fn open(&mut self, sequence: Vec<ImageRef>, start_index: isize) {
        if sequence.is_empty() {
            tracing::debug!("Ignoring lightbox open with an empty image sequence");
            return;
        }

        let last = sequence.len() as isize - 1;
        self.current_index = start_index.clamp(0, last) as usize;
        self.sequence = sequence;

        // Re-opening keeps the visibility captured by the first open
        if !self.is_open {
            self.saved_panel = Some(self.panel);
        }
        self.panel = PanelVisibility::HIDDEN;
        self.is_open = true;

        tracing::debug!(
            index = self.current_index,
            total = self.sequence.len(),
            "Lightbox opened"
        );
    }

    /// Close the overlay and restore the detail panel regions. Idempotent.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }

        self.is_open = false;
        self.sequence.clear();
        self.current_index = 0;
        self.panel = self.saved_panel.take().unwrap_or_default();

        tracing::debug!("Lightbox closed");
    }

    /// Move exactly one image in `direction`, wrapping circularly
    pub fn navigate(&mut self, direction: Direction) {
        if self.sequence.is_empty() {
            return;
        }

        let len = self.sequence.len() as isize;
        let mut next = self.current_index as isize + direction.step();
        if next < 0 {
            next = len - 1;
        } else if next >= len {
            next = 0;
        }
        self.current_index = next as usize;
    }

    /// Whether the overlay is shown
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Index of the displayed image (0-based)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Detail panel regions as they should currently be drawn
    pub fn panel_visibility(&self) -> PanelVisibility {
        self.panel
    }

    /// The frame to render, or `None` while closed
    pub fn frame(&self) -> Option<Frame<'_>> {
        if !self.is_open {
            return None;
        }

        self.sequence.get(self.current_index).map(|image| Frame {
            image,
            position: self.current_index + 1,
            total: self.sequence.len(),
        })
    }
}
