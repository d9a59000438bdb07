//! Container layouts.
//!
//! A layout does two things for a container:
//!
//! 1. **Placement**: computes where each child goes, relative to the
//!    container's origin. `Absolute` leaves children where they are.
//! 2. **Hit-testing**: decides which children are "under" a point.
//!
//! The catalog is closed, so layouts are a tagged variant rather than a
//! trait. In every layout a higher z-order child wins when bounds overlap.
//!
//! ```
//! use rust_tabletop::core::{Dimension, Point, Rectangle};
//! use rust_tabletop::strategies::{AccordianDirection, ContainerLayout};
//!
//! let layout = ContainerLayout::accordian(AccordianDirection::Up);
//! assert_eq!(layout.offset_for(3), Some(Dimension::new(0, -54)));
//!
//! let children = [Rectangle::new(0, 0, 10, 10), Rectangle::new(0, -18, 10, 10)];
//! assert_eq!(layout.component_index_at(&children, Point::new(5, 5)), Some(0));
//! assert_eq!(layout.component_index_at(&children, Point::new(5, -15)), Some(1));
//! ```

use smallvec::SmallVec;

use crate::core::{ContainerLayoutId, Dimension, Point, Rectangle};

/// Registry id of the absolute layout.
pub const ABSOLUTE: &str = "absolute";
/// Registry id of the stacked layout.
pub const STACKED: &str = "stacked";
/// Registry id of the upward accordian layout.
pub const ACCORDIAN_UP: &str = "accordian_up";
/// Registry id of the downward accordian layout.
pub const ACCORDIAN_DOWN: &str = "accordian_down";
/// Registry id of the leftward accordian layout.
pub const ACCORDIAN_LEFT: &str = "accordian_left";
/// Registry id of the rightward accordian layout.
pub const ACCORDIAN_RIGHT: &str = "accordian_right";

/// Offset per stack level of the default stacked layout.
pub const DEFAULT_STACK_STEP: Dimension = Dimension::new(2, 1);
/// Number of levels after which the default stacked layout stops offsetting.
pub const DEFAULT_STACK_MAX_STEPS: usize = 10;
/// Per-child distance of vertical accordians.
pub const VERTICAL_ACCORDIAN_DISTANCE: i32 = 18;
/// Per-child distance of horizontal accordians.
pub const HORIZONTAL_ACCORDIAN_DISTANCE: i32 = 16;

/// Direction an accordian fans out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccordianDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AccordianDirection {
    /// Unit vector of this direction (y grows downward).
    #[must_use]
    pub const fn unit(self) -> Dimension {
        match self {
            Self::Up => Dimension::new(0, -1),
            Self::Down => Dimension::new(0, 1),
            Self::Left => Dimension::new(-1, 0),
            Self::Right => Dimension::new(1, 0),
        }
    }
}

/// Placement and hit-testing algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Children keep their own coordinates.
    Absolute,
    /// Children cascade by `step` per index, up to `max_steps` steps.
    /// Only the top child is ever hit.
    Stacked { step: Dimension, max_steps: usize },
    /// Child `k` sits `k * distance` from the origin along `direction`.
    Accordian { direction: AccordianDirection, distance: i32 },
}

/// A registered layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerLayout {
    id: ContainerLayoutId,
    kind: LayoutKind,
}

impl ContainerLayout {
    /// Create a layout.
    pub fn new(id: impl Into<ContainerLayoutId>, kind: LayoutKind) -> Self {
        Self { id: id.into(), kind }
    }

    /// The default absolute layout.
    #[must_use]
    pub fn absolute() -> Self {
        Self::new(ABSOLUTE, LayoutKind::Absolute)
    }

    /// The default stacked layout.
    #[must_use]
    pub fn stacked() -> Self {
        Self::new(
            STACKED,
            LayoutKind::Stacked {
                step: DEFAULT_STACK_STEP,
                max_steps: DEFAULT_STACK_MAX_STEPS,
            },
        )
    }

    /// The default accordian layout for `direction`.
    #[must_use]
    pub fn accordian(direction: AccordianDirection) -> Self {
        let (id, distance) = match direction {
            AccordianDirection::Up => (ACCORDIAN_UP, VERTICAL_ACCORDIAN_DISTANCE),
            AccordianDirection::Down => (ACCORDIAN_DOWN, VERTICAL_ACCORDIAN_DISTANCE),
            AccordianDirection::Left => (ACCORDIAN_LEFT, HORIZONTAL_ACCORDIAN_DISTANCE),
            AccordianDirection::Right => (ACCORDIAN_RIGHT, HORIZONTAL_ACCORDIAN_DISTANCE),
        };
        Self::new(id, LayoutKind::Accordian { direction, distance })
    }

    /// Registry key.
    #[must_use]
    pub fn id(&self) -> &ContainerLayoutId {
        &self.id
    }

    /// The algorithm.
    #[must_use]
    pub fn kind(&self) -> &LayoutKind {
        &self.kind
    }

    /// Offset of child `index` from the container origin.
    ///
    /// `None` means the layout does not place children.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> Option<Dimension> {
        match self.kind {
            LayoutKind::Absolute => None,
            LayoutKind::Stacked { step, max_steps } => Some(step.scale(index.min(max_steps))),
            LayoutKind::Accordian { direction, distance } => {
                let unit = direction.unit();
                let per_step = Dimension::new(unit.width * distance, unit.height * distance);
                Some(per_step.scale(index))
            }
        }
    }

    /// Location of child `index` for a container whose origin is `origin`.
    #[must_use]
    pub fn location_for(&self, origin: Point, index: usize) -> Option<Point> {
        self.offset_for(index).map(|offset| origin.translate(offset))
    }

    /// Indices of every child under `location`, bottom to top.
    ///
    /// `children` holds the bounds of each child in z-order.
    #[must_use]
    pub fn component_indices_at(&self, children: &[Rectangle], location: Point) -> SmallVec<[usize; 8]> {
        match self.kind {
            LayoutKind::Absolute | LayoutKind::Accordian { .. } => children
                .iter()
                .enumerate()
                .filter(|(_, bounds)| bounds.contains(location))
                .map(|(i, _)| i)
                .collect(),
            LayoutKind::Stacked { .. } => {
                let mut hit = SmallVec::new();
                if children.iter().any(|bounds| bounds.contains(location)) {
                    hit.push(children.len() - 1);
                }
                hit
            }
        }
    }

    /// Index of the topmost child under `location`.
    #[must_use]
    pub fn component_index_at(&self, children: &[Rectangle], location: Point) -> Option<usize> {
        match self.kind {
            LayoutKind::Absolute | LayoutKind::Accordian { .. } => {
                children.iter().rposition(|bounds| bounds.contains(location))
            }
            LayoutKind::Stacked { .. } => self.component_indices_at(children, location).last().copied(),
        }
    }
}

impl std::fmt::Display for ContainerLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
