use bonsai_common::Pose;

/// Pose tracker that commands are interpreted against.
///
/// The interpreter only ever calls these five operations. None of them can
/// fail; headings are not wrapped.
pub trait Cursor {
    /// Opaque saved state. Must capture at least the pose.
    type Snapshot;

    fn pose(&self) -> Pose;

    /// Add `degrees` to the heading.
    fn turn(&mut self, degrees: f64);

    /// Move `distance` along the current heading.
    fn advance(&mut self, distance: f64);

    fn snapshot(&self) -> Self::Snapshot;

    /// Return to exactly the captured state. Restoring the same snapshot
    /// twice has the same effect as restoring it once.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}

/// Saved [`Turtle`] state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleSnapshot {
    pub pose: Pose,
    pub pen_down: bool,
}

/// Headless 2D turtle: the reference [`Cursor`].
///
/// Tracks a pose and a pen flag. Drawing is left to renderers, which
/// replay finished command sequences themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    pose: Pose,
    pen_down: bool,
}

impl Turtle {
    /// Turtle at `(x, y)` facing `heading`, pen up.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self::from_pose(Pose::new(x, y, heading))
    }

    pub fn from_pose(pose: Pose) -> Self {
        Self {
            pose,
            pen_down: false,
        }
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }
}

impl Default for Turtle {
    fn default() -> Self {
        Self::from_pose(Pose::default())
    }
}

impl Cursor for Turtle {
    type Snapshot = TurtleSnapshot;

    fn pose(&self) -> Pose {
        self.pose
    }

    fn turn(&mut self, degrees: f64) {
        self.pose.heading += degrees;
    }

    fn advance(&mut self, distance: f64) {
        self.pose = self.pose.turned_and_advanced(0.0, distance);
    }

    fn snapshot(&self) -> TurtleSnapshot {
        TurtleSnapshot {
            pose: self.pose,
            pen_down: self.pen_down,
        }
    }

    fn restore(&mut self, snapshot: &TurtleSnapshot) {
        self.pose = snapshot.pose;
        self.pen_down = snapshot.pen_down;
    }
}
