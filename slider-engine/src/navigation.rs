//! Step targets under the loop policy.

/// Where a navigation request came from. Only user-initiated sources apply
/// the autoplay interaction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource {
    Button,
    Pagination,
    Gesture,
    Programmatic,
    Autoplay,
}

impl NavigationSource {
    pub fn is_user(self) -> bool {
        !matches!(self, NavigationSource::Autoplay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

/// Target for one step from `current`. At a closed edge the target is
/// `current` itself, which the transition lock refuses as a no-op.
pub fn step_target(
    step: Step,
    current: usize,
    count: usize,
    loop_slides: bool,
) -> usize {
    let last = count.saturating_sub(1);
    match step {
        Step::Next if current >= last => {
            if loop_slides {
                0
            } else {
                current
            }
        }
        Step::Next => current + 1,
        Step::Prev if current == 0 => {
            if loop_slides {
                last
            } else {
                current
            }
        }
        Step::Prev => current - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_edges_return_current() {
        assert_eq!(step_target(Step::Next, 4, 5, false), 4);
        assert_eq!(step_target(Step::Prev, 0, 5, false), 0);
    }

    #[test]
    fn looping_wraps_both_ways() {
        assert_eq!(step_target(Step::Next, 4, 5, true), 0);
        assert_eq!(step_target(Step::Prev, 0, 5, true), 4);
    }

    #[test]
    fn interior_steps_move_by_one() {
        assert_eq!(step_target(Step::Next, 2, 5, false), 3);
        assert_eq!(step_target(Step::Prev, 2, 5, true), 1);
    }

    #[test]
    fn single_slide_never_moves() {
        assert_eq!(step_target(Step::Next, 0, 1, true), 0);
        assert_eq!(step_target(Step::Prev, 0, 1, true), 0);
    }

    #[test]
    fn only_autoplay_is_not_user_initiated() {
        assert!(NavigationSource::Gesture.is_user());
        assert!(NavigationSource::Pagination.is_user());
        assert!(!NavigationSource::Autoplay.is_user());
    }
}
