use serde::{Deserialize, Serialize};

/// Which side of the bar a slot is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSide {
    Left,
    #[default]
    Right,
}

/// Host display surface the driver renders into.
///
/// This abstracts whatever actually draws the bar (a terminal line, a
/// desktop widget, a test double). Implementations are provided outside
/// the core, mirroring how GPU probes live in the platform layer.
pub trait StatusHost: Send + 'static {
    type Item: StatusItem + 'static;

    /// Create a positioned, prioritized display slot. Slots start hidden.
    fn create_item(&mut self, side: BarSide, priority: i32) -> Self::Item;

    /// Commit pending slot mutations to the display.
    ///
    /// Called once per tick after every slot has been written, and after
    /// lifecycle transitions. Hosts that paint eagerly can ignore it.
    fn refresh(&mut self) {}
}

/// A single display slot owned by the driver.
pub trait StatusItem: Send {
    fn set_text(&mut self, text: &str);

    fn set_tooltip(&mut self, tooltip: &str);

    /// Make the slot visible. Idempotent.
    fn show(&mut self);

    /// Release the slot. The driver calls this exactly once, on teardown.
    fn dispose(&mut self);
}
