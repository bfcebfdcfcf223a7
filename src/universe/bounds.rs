use crate::{LifeError, Pos2, Result};

/// Topology of a [`Universe`](super::Universe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// Every representable coordinate is a valid cell.
    #[default]
    Unbounded,
    /// Only `[0, width) x [0, height)` is valid.
    ///
    /// With `wrap` the box becomes a torus and any coordinate is folded back
    /// into it.
    Bounded { width: i32, height: i32, wrap: bool },
}

impl Bounds {
    /// Creates a bounded topology, rejecting empty boxes.
    pub fn bounded(width: i32, height: i32, wrap: bool) -> Result<Self> {
        let bounds = Self::Bounded {
            width,
            height,
            wrap,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Self::Bounded { width, height, .. } if width <= 0 || height <= 0 => {
                Err(LifeError::invalid_argument(format!(
                    "universe dimensions must be positive, got {width}x{height}"
                )))
            }
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn wraps(&self) -> bool {
        matches!(self, Self::Bounded { wrap: true, .. })
    }

    /// Maps `pos` to the cell it addresses, or `None` if it addresses nothing.
    ///
    /// An empty box addresses nothing, even with `wrap`.
    #[inline]
    pub fn normalize(&self, pos: Pos2) -> Option<Pos2> {
        match *self {
            Self::Unbounded => Some(pos),
            Self::Bounded { width, height, .. } if width <= 0 || height <= 0 => None,
            Self::Bounded {
                width,
                height,
                wrap: true,
            } => Some(Pos2 {
                x: pos.x.rem_euclid(width),
                y: pos.y.rem_euclid(height),
            }),
            Self::Bounded { width, height, .. } => {
                let inside = (0..width).contains(&pos.x) && (0..height).contains(&pos.y);
                inside.then_some(pos)
            }
        }
    }

    /// Like [`Bounds::normalize`], but reports why a coordinate was rejected.
    pub fn resolve(&self, pos: Pos2) -> Result<Pos2> {
        match *self {
            Self::Unbounded => Ok(pos),
            Self::Bounded { width, height, .. } => {
                self.normalize(pos).ok_or(LifeError::OutOfBounds {
                    pos,
                    width,
                    height,
                })
            }
        }
    }
}
