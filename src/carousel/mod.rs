//! Clamped pagination for a card carousel.
//!
//! The paginator owns `(current_index, items_per_page, total_items)` and keeps
//! `current_index` within `0..=max(0, total_items - items_per_page)` after
//! every command. There is no wraparound.

mod breakpoints;

use std::fmt;
use std::ops::Range;

pub use breakpoints::{Breakpoint, Breakpoints};

use crate::animation::TransitionKind;
use crate::error::ConfigurationError;
use crate::options::CarouselOptions;

/// Receives the new `current_index` whenever it changes.
pub trait PageObserver {
    /// Called after a command moved the current index.
    fn on_page_change(&mut self, current_index: usize);
}

impl<F: FnMut(usize)> PageObserver for F {
    fn on_page_change(&mut self, current_index: usize) {
        self(current_index);
    }
}

/// Carousel paging state plus the responsive page-size table.
pub struct Paginator {
    current_index: usize,
    items_per_page: usize,
    total_items: usize,
    breakpoints: Breakpoints,
    transition: TransitionKind,
    observer: Option<Box<dyn PageObserver>>,
}

impl Paginator {
    /// Paginator over `total_items` cards, `items_per_page` at a time.
    pub fn new(
        total_items: usize,
        items_per_page: usize,
    ) -> Result<Self, ConfigurationError> {
        if items_per_page == 0 {
            return Err(ConfigurationError::ZeroItemsPerPage);
        }
        Ok(Self {
            current_index: 0,
            items_per_page,
            total_items,
            breakpoints: Breakpoints::default(),
            transition: TransitionKind::CAROUSEL_SPRING,
            observer: None,
        })
    }

    /// Paginator configured from the `[carousel]` options section.
    pub fn from_options(
        total_items: usize,
        options: &CarouselOptions,
    ) -> Result<Self, ConfigurationError> {
        options.breakpoints.validate()?;
        options.transition.validate()?;
        let mut paginator = Self::new(total_items, options.items_per_page)?;
        paginator.breakpoints = options.breakpoints.clone();
        paginator.transition = options.transition;
        Ok(paginator)
    }

    /// Replace the responsive page-size table.
    pub fn with_breakpoints(
        mut self,
        breakpoints: Breakpoints,
    ) -> Result<Self, ConfigurationError> {
        breakpoints.validate()?;
        self.breakpoints = breakpoints;
        Ok(self)
    }

    /// Attach an observer.
    pub fn with_observer(
        mut self,
        observer: impl PageObserver + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Index of the first visible card.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Cards visible at once.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Total card count.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Curve the track should animate with between pages.
    pub fn transition(&self) -> TransitionKind {
        self.transition
    }

    /// Largest valid `current_index`.
    pub fn max_index(&self) -> usize {
        self.total_items.saturating_sub(self.items_per_page)
    }

    /// Whether `next()` would move.
    pub fn can_next(&self) -> bool {
        self.current_index < self.max_index()
    }

    /// Whether `prev()` would move.
    pub fn can_prev(&self) -> bool {
        self.current_index > 0
    }

    /// Advance one card. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        let target = (self.current_index + 1).min(self.max_index());
        self.move_to(target)
    }

    /// Go back one card. Returns whether the index moved.
    pub fn prev(&mut self) -> bool {
        self.move_to(self.current_index.saturating_sub(1))
    }

    /// Jump to `index`, clamped into range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.move_to(index.min(self.max_index()))
    }

    /// Change the page size and re-clamp the index.
    ///
    /// Returns whether the index moved.
    pub fn set_items_per_page(
        &mut self,
        items_per_page: usize,
    ) -> Result<bool, ConfigurationError> {
        if items_per_page == 0 {
            return Err(ConfigurationError::ZeroItemsPerPage);
        }
        self.items_per_page = items_per_page;
        Ok(self.reclamp())
    }

    /// Pick the page size for a viewport `width` px wide.
    pub fn set_viewport_width(&mut self, width: u32) -> bool {
        let items_per_page = self.breakpoints.items_per_page(width);
        if items_per_page != self.items_per_page {
            log::debug!(
                "carousel: {width}px viewport shows {items_per_page} per page"
            );
        }
        self.items_per_page = items_per_page;
        self.reclamp()
    }

    /// Change the card count and re-clamp the index.
    pub fn set_total_items(&mut self, total_items: usize) -> bool {
        self.total_items = total_items;
        self.reclamp()
    }

    /// Indices of the cards currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let end =
            (self.current_index + self.items_per_page).min(self.total_items);
        self.current_index..end
    }

    /// Distinct positions the carousel can rest at.
    pub fn page_count(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.max_index() + 1
        }
    }

    /// Horizontal track offset for cards `card_width` wide separated by
    /// `gap`, in the same unit. Negative moves the track left.
    pub fn track_offset(&self, card_width: f32, gap: f32) -> f32 {
        -(self.current_index as f32) * (card_width + gap)
    }

    fn reclamp(&mut self) -> bool {
        self.move_to(self.current_index.min(self.max_index()))
    }

    fn move_to(&mut self, index: usize) -> bool {
        if index == self.current_index {
            return false;
        }
        self.current_index = index;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_page_change(index);
        }
        true
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("current_index", &self.current_index)
            .field("items_per_page", &self.items_per_page)
            .field("total_items", &self.total_items)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
