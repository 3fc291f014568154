//! Read-only navigation state handed from the stepper to each step

use std::time::Duration;

use super::types::{DisplayMode, Orientation, TextDirection};

/// Configuration a step needs to derive its flags and render itself.
///
/// Rebuilt by the stepper for every render or dispatch and borrowed by each
/// step for that pass only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperContext<'a> {
    /// Committed step index, owned by the caller
    pub value: usize,
    pub linear: bool,
    pub display_mode: DisplayMode,
    pub orientation: Orientation,
    pub dir: TextDirection,
    pub num_steps: usize,
    pub success_icon: Option<&'a str>,
    pub error_icon: Option<&'a str>,
    /// Resolved indicator transition
    pub transition: Duration,
    /// Whether a custom renderer replaces the default composition
    pub custom_item: bool,
    /// Whether input focus is inside the stepper
    pub has_focus: bool,
}

impl StepperContext<'_> {
    /// Adjacency estimate used for pointer styling
    pub fn allows_click(&self, index: usize) -> bool {
        !self.linear || index.abs_diff(self.value) <= 1
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(linear: bool, value: usize) -> StepperContext<'static> {
        StepperContext {
            value,
            linear,
            display_mode: DisplayMode::Steps,
            orientation: Orientation::Horizontal,
            dir: TextDirection::Ltr,
            num_steps: 5,
            success_icon: None,
            error_icon: None,
            transition: Duration::ZERO,
            custom_item: false,
            has_focus: false,
        }
    }

    #[test]
    fn test_non_linear_allows_every_click() {
        let ctx = context(false, 0);
        assert!((0..5).all(|i| ctx.allows_click(i)));
    }

    #[test]
    fn test_linear_allows_only_neighbours() {
        let ctx = context(true, 2);
        let allowed: Vec<usize> = (0..5).filter(|&i| ctx.allows_click(i)).collect();
        assert_eq!(allowed, vec![1, 2, 3]);
    }

    #[test]
    fn test_linear_at_first_step() {
        let ctx = context(true, 0);
        assert!(ctx.allows_click(0));
        assert!(ctx.allows_click(1));
        assert!(!ctx.allows_click(2));
    }
}
