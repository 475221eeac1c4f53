//! Navigation chrome state: page scroll locking, the mobile menu and the
//! condensed header.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::options::NavigationOptions;

/// Counted page-scroll lock.
///
/// Scrolling is locked while at least one [`ScrollLockGuard`] lives. Clones
/// share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    /// Unlocked scroll lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a hold on the lock. Scrolling stays locked until the guard drops.
    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.holders.get() + 1;
        self.holders.set(holders);
        if holders == 1 {
            log::debug!("page scroll locked");
        }
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    /// Whether any guard is alive.
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    /// Number of live guards.
    pub fn holders(&self) -> usize {
        self.holders.get()
    }
}

/// Keeps its [`ScrollLock`] held until dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let holders = self.holders.get().saturating_sub(1);
        self.holders.set(holders);
        if holders == 0 {
            log::debug!("page scroll unlocked");
        }
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("holders", &self.holders.get())
            .finish()
    }
}

/// Mobile menu that locks page scrolling while open.
#[derive(Debug)]
pub struct MenuController {
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl MenuController {
    /// Closed menu sharing `lock` with the rest of the page.
    pub fn new(lock: ScrollLock) -> Self {
        Self { lock, guard: None }
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Open the menu. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        if self.guard.is_some() {
            return false;
        }
        self.guard = Some(self.lock.acquire());
        true
    }

    /// Close the menu. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        self.guard.take().is_some()
    }

    /// Flip the menu and return the new open state.
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            let _ = self.close();
        } else {
            let _ = self.open();
        }
        self.is_open()
    }

    /// The lock this menu holds while open.
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.lock
    }
}

/// Header that condenses once the page scrolls past a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderState {
    threshold: f32,
    scrolled: bool,
}

impl HeaderState {
    /// Header at the top of the page with the given threshold in px.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    /// Header configured from the `[navigation]` options section.
    pub fn from_options(options: &NavigationOptions) -> Self {
        Self::new(options.scroll_threshold)
    }

    /// Whether the header is in its condensed state.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current vertical scroll offset. Returns whether the
    /// condensed flag changed.
    pub fn on_scroll(&mut self, y: f32) -> bool {
        let scrolled = y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}

impl Default for HeaderState {
    fn default() -> Self {
        Self::from_options(&NavigationOptions::default())
    }
}
