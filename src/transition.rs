use crate::section::Section;

/// One of the four directional snap commands a user can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapCommand {
    Left,
    Right,
    Up,
    Down,
}

pub const COMMANDS: [SnapCommand; 4] = [
    SnapCommand::Left,
    SnapCommand::Right,
    SnapCommand::Up,
    SnapCommand::Down,
];

/// Outcome of a transition: a section to move to, or minimize the window
/// instead of repositioning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Section(Section),
    Minimize,
}

/// The cycling state machine: which section a command moves a window to,
/// given the section it currently occupies.
///
/// This is authored behavior, not derived geometry — e.g. pressing down while
/// already in the bottom row minimizes rather than doing nothing, and
/// `Section::None` targets are the centered break rect. Every
/// (command, section) pair is covered.
pub fn next_section(command: SnapCommand, current: Section) -> SnapTarget {
    use Section::*;

    let go = SnapTarget::Section;
    match command {
        SnapCommand::Left => match current {
            None | Full => go(LeftHalf),
            LeftHalf => go(LeftHalf),
            RightHalf => go(None), // break out toward the center
            TopHalf => go(TopLeft),
            BottomHalf => go(BottomLeft),
            TopLeft => go(TopLeft),
            TopRight => go(TopRight),
            BottomLeft => go(BottomLeft),
            BottomRight => go(BottomRight),
        },
        SnapCommand::Right => match current {
            None | Full => go(RightHalf),
            LeftHalf => go(None), // break out toward the center
            RightHalf => go(RightHalf),
            TopHalf => go(TopRight),
            BottomHalf => go(BottomRight),
            TopLeft => go(TopRight),
            TopRight => go(TopRight),
            BottomLeft => go(BottomRight),
            BottomRight => go(BottomRight),
        },
        SnapCommand::Up => match current {
            None => go(None),
            Full => go(TopHalf),
            LeftHalf => go(TopLeft),
            RightHalf => go(TopRight),
            TopHalf => go(Full),
            BottomHalf => go(None),
            TopLeft | TopRight => go(Full),
            BottomLeft => go(LeftHalf),
            BottomRight => go(RightHalf),
        },
        SnapCommand::Down => match current {
            None | Full => go(BottomHalf),
            LeftHalf => go(BottomLeft),
            RightHalf => go(BottomRight),
            TopLeft => go(LeftHalf),
            TopRight => go(RightHalf),
            // The bottom row (and a collapsed top half) has nowhere lower to
            // go; minimize instead.
            TopHalf | BottomHalf | BottomLeft | BottomRight => SnapTarget::Minimize,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SECTIONS;
    use assert_matches::assert_matches;

    fn all_sections() -> Vec<Section> {
        let mut v = vec![Section::None];
        v.extend(SECTIONS);
        v
    }

    #[test]
    fn every_pair_has_a_defined_outcome() {
        let mut minimize_count = 0;
        for command in COMMANDS {
            for section in all_sections() {
                if next_section(command, section) == SnapTarget::Minimize {
                    minimize_count += 1;
                }
            }
        }
        // Only down-from-the-bottom-row outcomes minimize.
        assert_eq!(minimize_count, 4);
    }

    #[test]
    fn unsnapped_window_moves_to_halves() {
        assert_eq!(
            next_section(SnapCommand::Left, Section::None),
            SnapTarget::Section(Section::LeftHalf)
        );
        assert_eq!(
            next_section(SnapCommand::Right, Section::None),
            SnapTarget::Section(Section::RightHalf)
        );
        assert_eq!(
            next_section(SnapCommand::Down, Section::None),
            SnapTarget::Section(Section::BottomHalf)
        );
        // Up from nowhere stays in the break state.
        assert_eq!(
            next_section(SnapCommand::Up, Section::None),
            SnapTarget::Section(Section::None)
        );
    }

    #[test]
    fn opposite_direction_breaks_out_of_a_half() {
        assert_eq!(
            next_section(SnapCommand::Right, Section::LeftHalf),
            SnapTarget::Section(Section::None)
        );
        assert_eq!(
            next_section(SnapCommand::Left, Section::RightHalf),
            SnapTarget::Section(Section::None)
        );
    }

    #[test]
    fn up_from_quadrants_fills_the_screen() {
        assert_eq!(
            next_section(SnapCommand::Up, Section::TopLeft),
            SnapTarget::Section(Section::Full)
        );
        assert_eq!(
            next_section(SnapCommand::Up, Section::TopRight),
            SnapTarget::Section(Section::Full)
        );
    }

    #[test]
    fn down_in_the_bottom_row_minimizes() {
        assert_matches!(
            next_section(SnapCommand::Down, Section::BottomLeft),
            SnapTarget::Minimize
        );
        assert_matches!(
            next_section(SnapCommand::Down, Section::BottomRight),
            SnapTarget::Minimize
        );
        assert_matches!(
            next_section(SnapCommand::Down, Section::BottomHalf),
            SnapTarget::Minimize
        );
    }

    #[test]
    fn snapping_into_your_own_edge_is_sticky() {
        assert_eq!(
            next_section(SnapCommand::Left, Section::LeftHalf),
            SnapTarget::Section(Section::LeftHalf)
        );
        assert_eq!(
            next_section(SnapCommand::Right, Section::TopRight),
            SnapTarget::Section(Section::TopRight)
        );
        // Left from the top-right quadrant stays put as well.
        assert_eq!(
            next_section(SnapCommand::Left, Section::TopRight),
            SnapTarget::Section(Section::TopRight)
        );
    }

    #[test]
    fn down_steps_quadrants_back_to_halves() {
        assert_eq!(
            next_section(SnapCommand::Down, Section::TopLeft),
            SnapTarget::Section(Section::LeftHalf)
        );
        assert_eq!(
            next_section(SnapCommand::Down, Section::TopRight),
            SnapTarget::Section(Section::RightHalf)
        );
    }
}
